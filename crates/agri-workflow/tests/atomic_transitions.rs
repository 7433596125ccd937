mod common;

use agri_domain::{CropType, InMemorySessionStore, SessionStore};
use agri_workflow::{CompletionOutcome, TrainingFlow, TrainingPhase, TrainingSessionFactory, WorkflowConfig,
                    WorkflowError};
use common::satisfy_current_step;
use flow::domain::{FlowData, FlowMeta, PersistResult, SnapshotMeta};
use flow::errors::{FlowError, Result as FlowResult};
use flow::repository::{ArtifactStore, FlowRepository};
use flow::stubs::{InMemoryArtifactStore, InMemoryFlowRepository};
use serde_json::Value as JsonValue;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Repositorio en memoria que falla a pedido. `home` es el primer flow
/// creado; `fail_other_runs` rechaza registros de cualquier otro.
#[derive(Default)]
struct FlakyRepository {
  inner: InMemoryFlowRepository,
  home: Mutex<Option<Uuid>>,
  fail_other_runs: AtomicBool,
  fail_records: AtomicBool,
  fail_status: AtomicBool,
  fail_snapshots: AtomicBool,
}

fn disk_full() -> FlowError {
  FlowError::Storage("disco lleno".into())
}

impl FlowRepository for FlakyRepository {
  fn get_flow_meta(&self, flow_id: &Uuid) -> FlowResult<FlowMeta> {
    self.inner.get_flow_meta(flow_id)
  }

  fn create_flow(&self, name: Option<String>, status: Option<String>, metadata: JsonValue) -> FlowResult<Uuid> {
    let id = self.inner.create_flow(name, status, metadata)?;
    self.home.lock().unwrap().get_or_insert(id);
    Ok(id)
  }

  fn persist_data(&self, data: &FlowData, expected_version: i64) -> FlowResult<PersistResult> {
    let foreign = *self.home.lock().unwrap() != Some(data.flow_id);
    if self.fail_records.load(Ordering::SeqCst) || (foreign && self.fail_other_runs.load(Ordering::SeqCst)) {
      return Err(disk_full());
    }
    self.inner.persist_data(data, expected_version)
  }

  fn read_data(&self, flow_id: &Uuid, from_cursor: i64) -> FlowResult<Vec<FlowData>> {
    self.inner.read_data(flow_id, from_cursor)
  }

  fn count_steps(&self, flow_id: &Uuid) -> FlowResult<i64> {
    self.inner.count_steps(flow_id)
  }

  fn load_latest_snapshot(&self, flow_id: &Uuid) -> FlowResult<Option<SnapshotMeta>> {
    self.inner.load_latest_snapshot(flow_id)
  }

  fn save_snapshot(&self, flow_id: &Uuid, cursor: i64, state: JsonValue) -> FlowResult<Uuid> {
    if self.fail_snapshots.load(Ordering::SeqCst) {
      return Err(disk_full());
    }
    self.inner.save_snapshot(flow_id, cursor, state)
  }

  fn get_flow_status(&self, flow_id: &Uuid) -> FlowResult<Option<String>> {
    self.inner.get_flow_status(flow_id)
  }

  fn set_flow_status(&self, flow_id: &Uuid, new_status: Option<String>) -> FlowResult<FlowMeta> {
    if self.fail_status.load(Ordering::SeqCst) {
      return Err(disk_full());
    }
    self.inner.set_flow_status(flow_id, new_status)
  }

  fn list_flow_ids(&self) -> FlowResult<Vec<Uuid>> {
    self.inner.list_flow_ids()
  }

  fn set_meta(&self, flow_id: &Uuid, key: &str, value: JsonValue) -> FlowResult<()> {
    self.inner.set_meta(flow_id, key, value)
  }

  fn del_meta(&self, flow_id: &Uuid, key: &str) -> FlowResult<()> {
    self.inner.del_meta(flow_id, key)
  }

  fn delete_flow(&self, flow_id: &Uuid) -> FlowResult<()> {
    self.inner.delete_flow(flow_id)
  }
}

fn flaky_factory() -> (Arc<FlakyRepository>, TrainingSessionFactory) {
  let repo = Arc::new(FlakyRepository::default());
  let repo_dyn: Arc<dyn FlowRepository> = repo.clone();
  let artifacts: Arc<dyn ArtifactStore> = Arc::new(InMemoryArtifactStore::new());
  let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
  (repo.clone(), TrainingSessionFactory::new(repo_dyn, artifacts, store, WorkflowConfig::default()))
}

/// Sesión con potato-1 completado.
fn potato_after_first_step(factory: &TrainingSessionFactory) -> TrainingFlow {
  let mut flow = factory.create::<TrainingFlow>("atomic").expect("create session");
  flow.select_crop(CropType::Potato).expect("select");
  satisfy_current_step(&mut flow);
  flow.complete_current_step().expect("complete");
  flow
}

#[test]
fn failed_crop_switch_keeps_the_current_run() -> Result<(), WorkflowError> {
  let (repo, factory) = flaky_factory();
  let mut flow = potato_after_first_step(&factory);
  let old = flow.id;

  repo.fail_other_runs.store(true, Ordering::SeqCst);
  let err = flow.select_crop(CropType::Wheat).unwrap_err();
  assert!(matches!(err, WorkflowError::Flow(_) | WorkflowError::Persistence(_)), "{:?}", err);

  assert_eq!(flow.id, old);
  assert_eq!(flow.selected_crop(), Some(CropType::Potato));
  assert_eq!(flow.completed_steps().len(), 1);
  assert_eq!(flow.state().previous_run, None);
  assert_eq!(repo.get_flow_status(&old)?.as_deref(), Some("in_training"));
  assert!(repo.get_meta(&old, "superseded_by")?.is_null());
  assert_eq!(repo.list_flow_ids()?, vec![old]);

  // la corrida sigue usable
  repo.fail_other_runs.store(false, Ordering::SeqCst);
  satisfy_current_step(&mut flow);
  match flow.complete_current_step()? {
    CompletionOutcome::Advanced { step_id, .. } => assert_eq!(step_id, "potato-2"),
    other => panic!("inesperado: {:?}", other),
  }
  Ok(())
}

#[test]
fn switch_is_rolled_back_when_the_old_run_cannot_be_abandoned() -> Result<(), WorkflowError> {
  let (repo, factory) = flaky_factory();
  let mut flow = potato_after_first_step(&factory);
  let old = flow.id;

  repo.fail_status.store(true, Ordering::SeqCst);
  assert!(flow.select_crop(CropType::Wheat).is_err());
  repo.fail_status.store(false, Ordering::SeqCst);

  assert_eq!(flow.id, old);
  assert_eq!(flow.selected_crop(), Some(CropType::Potato));
  assert_eq!(repo.list_flow_ids()?, vec![old]);
  assert!(repo.get_meta(&old, "superseded_by")?.is_null());
  assert_ne!(repo.get_flow_status(&old)?.as_deref(), Some("abandoned"));

  // reintentar con el repositorio sano abre la corrida nueva
  flow.select_crop(CropType::Wheat)?;
  assert_ne!(flow.id, old);
  assert_eq!(repo.get_flow_status(&old)?.as_deref(), Some("abandoned"));
  assert_eq!(repo.list_flow_ids()?.len(), 2);
  Ok(())
}

#[test]
fn unsaved_step_leaves_state_untouched() -> Result<(), WorkflowError> {
  let (repo, factory) = flaky_factory();
  let mut flow = potato_after_first_step(&factory);
  satisfy_current_step(&mut flow);

  repo.fail_records.store(true, Ordering::SeqCst);
  assert!(flow.complete_current_step().is_err());
  assert_eq!(flow.completed_steps().len(), 1);
  assert_eq!(flow.phase(), TrainingPhase::InTraining { step_index: 1 });
  assert_eq!(repo.count_steps(&flow.id)?, 2);
  Ok(())
}

#[test]
fn completion_survives_status_and_snapshot_failures() -> Result<(), WorkflowError> {
  let (repo, factory) = flaky_factory();
  let mut flow = potato_after_first_step(&factory);
  while flow.current_step_index() + 1 < CropType::Potato.steps().len() {
    satisfy_current_step(&mut flow);
    flow.complete_current_step()?;
  }

  repo.fail_status.store(true, Ordering::SeqCst);
  repo.fail_snapshots.store(true, Ordering::SeqCst);
  satisfy_current_step(&mut flow);
  let outcome = flow.complete_current_step()?;
  assert!(matches!(outcome, CompletionOutcome::Finished { .. }));
  assert_eq!(flow.phase(), TrainingPhase::TrainingComplete);

  // el registro quedó guardado: la rehidratación llega al mismo punto
  repo.fail_snapshots.store(false, Ordering::SeqCst);
  let loaded: TrainingFlow = factory.load(&flow.id)?;
  assert_eq!(loaded.phase(), TrainingPhase::TrainingComplete);
  assert_eq!(loaded.completed_steps().len(), CropType::Potato.steps().len());
  Ok(())
}
