mod common;

use agri_domain::CropType;
use agri_workflow::step::{command_id_for, StepContext, StepInfo, STEP_STATE_PREFIX};
use agri_workflow::{SnapshotPolicy, TrainingFlow, TrainingFlowEngine, TrainingPhase, WorkflowConfig, WorkflowError,
                    WorkflowType};
use common::{harness, new_session, photo, satisfy_current_step};
use flow::repository::FlowRepository;
use serde_json::json;
use std::sync::Arc;

#[test]
fn load_restores_profile_progress_and_history() -> Result<(), WorkflowError> {
  let h = harness(WorkflowConfig::default());
  let mut flow = new_session(&h);
  flow.edit_profile(|p| p.set_mobile("9876543210"))?;
  flow.select_crop(CropType::Onion)?;
  for _ in 0..2 {
    satisfy_current_step(&mut flow);
    flow.complete_current_step()?;
  }
  flow.toggle_checklist_item("onion-3", 1, true)?;
  flow.save()?;

  let loaded: TrainingFlow = h.factory.load(&flow.id)?;
  assert_eq!(loaded.profile().mobile(), "9876543210");
  assert_eq!(loaded.completed_steps(), flow.completed_steps());
  assert_eq!(loaded.phase(), TrainingPhase::InTraining { step_index: 2 });
  assert_eq!(loaded.step_progress("onion-3").map(|p| p.checked[1]), Some(true));
  assert_eq!(loaded.completion_percentage(), 40);
  Ok(())
}

#[test]
fn records_after_the_snapshot_are_replayed() -> Result<(), WorkflowError> {
  let config = WorkflowConfig { snapshot_policy: SnapshotPolicy::Never,
                                ..WorkflowConfig::default() };
  let h = harness(config);
  let mut flow = new_session(&h);
  flow.save()?;
  flow.select_crop(CropType::Potato)?;
  satisfy_current_step(&mut flow);
  flow.complete_current_step()?;
  assert!(h.repo.load_latest_snapshot(&flow.id)?.map(|s| s.cursor) == Some(0));

  let loaded: TrainingFlow = h.factory.load(&flow.id)?;
  assert_eq!(loaded.selected_crop(), Some(CropType::Potato));
  assert_eq!(loaded.profile().selected_crop(), Some(CropType::Potato));
  assert_eq!(loaded.completed_steps().len(), 1);
  assert_eq!(loaded.current_step_index(), 1);
  Ok(())
}

#[test]
fn step_records_are_never_duplicated() -> Result<(), WorkflowError> {
  let h = harness(WorkflowConfig::default());
  let mut flow = new_session(&h);
  flow.select_crop(CropType::Wheat)?;
  satisfy_current_step(&mut flow);
  flow.complete_current_step()?;
  let before = h.repo.count_steps(&flow.id)?;

  // reintento del mismo comando (p. ej. doble envío)
  let repo: Arc<dyn FlowRepository> = h.repo.clone();
  let ctx = StepContext::new(flow.id, repo);
  let replay = StepInfo { payload: serde_json::to_value(&flow.completed_steps()[0])?,
                          metadata: json!({}) };
  ctx.save_step_result("wheat-1", replay, Some(command_id_for(&flow.id, "wheat-1")))?;
  assert_eq!(h.repo.count_steps(&flow.id)?, before);

  let stored: Vec<_> = h.repo
                        .read_data(&flow.id, 0)?
                        .into_iter()
                        .filter(|d| d.key == format!("{}wheat-1", STEP_STATE_PREFIX))
                        .collect();
  assert_eq!(stored.len(), 1);
  let done: agri_domain::CompletedStep = serde_json::from_value(stored[0].payload.clone())?;
  assert_eq!(Some(&done), flow.completed_steps().first());
  Ok(())
}

#[test]
fn same_crop_reselection_is_a_no_op() -> Result<(), WorkflowError> {
  let h = harness(WorkflowConfig::default());
  let mut flow = new_session(&h);
  flow.select_crop(CropType::Tomato)?;
  satisfy_current_step(&mut flow);
  flow.complete_current_step()?;
  let id = flow.id;
  let records = h.repo.count_steps(&id)?;

  flow.select_crop(CropType::Tomato)?;
  assert_eq!(flow.id, id);
  assert_eq!(flow.completed_steps().len(), 1);
  assert_eq!(h.repo.count_steps(&id)?, records);
  Ok(())
}

#[test]
fn switching_crop_without_progress_stays_in_the_same_run() -> Result<(), WorkflowError> {
  let h = harness(WorkflowConfig::default());
  let mut flow = new_session(&h);
  flow.select_crop(CropType::Tomato)?;
  flow.toggle_checklist_item("tomato-1", 0, true)?;
  let id = flow.id;

  flow.select_crop(CropType::Onion)?;
  assert_eq!(flow.id, id);
  assert!(flow.step_progress("tomato-1").is_none());
  assert_eq!(flow.current_step().map(|s| s.id), Some("onion-1"));
  Ok(())
}

#[test]
fn switching_crop_after_progress_abandons_the_run() -> Result<(), WorkflowError> {
  let h = harness(WorkflowConfig::default());
  let mut flow = new_session(&h);
  flow.edit_profile(|p| p.set_location("Cuttack, Odisha"))?;
  flow.select_crop(CropType::Potato)?;
  satisfy_current_step(&mut flow);
  flow.complete_current_step()?;
  let old = flow.id;

  flow.select_crop(CropType::Wheat)?;
  assert_ne!(flow.id, old);
  assert!(flow.completed_steps().is_empty());
  assert_eq!(flow.completion_percentage(), 0);
  assert_eq!(flow.state().previous_run, Some(old));
  assert_eq!(flow.profile().location(), "Cuttack, Odisha");
  assert_eq!(h.repo.get_flow_status(&old)?.as_deref(), Some("abandoned"));

  // la corrida abandonada conserva su historial
  let abandoned: TrainingFlow = h.factory.load(&old)?;
  assert_eq!(abandoned.completed_steps().len(), 1);
  assert_eq!(abandoned.selected_crop(), Some(CropType::Potato));

  // y la nueva se rehidrata con el perfil
  let current: TrainingFlow = h.factory.load(&flow.id)?;
  assert_eq!(current.selected_crop(), Some(CropType::Wheat));
  assert_eq!(current.profile().location(), "Cuttack, Odisha");

  let sessions = h.factory.list_sessions()?;
  assert_eq!(sessions.len(), 2);
  assert!(sessions.iter().all(|s| s.workflow_type == WorkflowType::CropTraining));
  Ok(())
}

#[test]
fn loading_a_foreign_flow_is_rejected() -> Result<(), WorkflowError> {
  let h = harness(WorkflowConfig::default());
  let id = h.repo.create_flow(Some("otro".into()), None, json!({}))?;
  let res = h.factory.load::<TrainingFlow>(&id);
  assert!(matches!(res, Err(WorkflowError::Validation(_))));
  Ok(())
}

#[test]
fn snapshot_roundtrip_through_engine_trait() -> Result<(), WorkflowError> {
  let h = harness(WorkflowConfig::default());
  let mut flow = new_session(&h);
  flow.select_crop(CropType::Onion)?;
  let snap = flow.snapshot()?;

  let mut other = new_session(&h);
  other.apply_snapshot(&snap)?;
  assert_eq!(other.state(), flow.state());
  assert!(other.apply_snapshot(&json!({"phase": 3})).is_err());
  assert_eq!(other.selected_crop(), Some(CropType::Onion));
  Ok(())
}

#[test]
fn saved_photo_and_location_survive_a_reload() -> Result<(), WorkflowError> {
  let h = harness(WorkflowConfig::default());
  let mut flow = new_session(&h);
  let key = flow.set_profile_photo(photo("yo.png"))?;
  flow.edit_profile(|p| p.set_location("Nashik, Maharashtra"))?;
  flow.save()?;

  let loaded: TrainingFlow = h.factory.load(&flow.id)?;
  assert_eq!(loaded.profile().profile_photo(), Some(key.as_str()));
  assert_eq!(loaded.profile().location(), "Nashik, Maharashtra");
  Ok(())
}
