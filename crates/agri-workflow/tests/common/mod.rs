#![allow(dead_code)]

use agri_domain::{InMemorySessionStore, SessionStore};
use agri_workflow::{CompletionOutcome, EvidenceUpload, TrainingFlow, TrainingSessionFactory, WorkflowConfig};
use flow::repository::{ArtifactStore, FlowRepository};
use flow::stubs::{InMemoryArtifactStore, InMemoryFlowRepository};
use std::sync::Arc;

pub struct Harness {
  pub repo: Arc<InMemoryFlowRepository>,
  pub artifacts: Arc<InMemoryArtifactStore>,
  pub store: Arc<InMemorySessionStore>,
  pub factory: TrainingSessionFactory,
}

pub fn harness(config: WorkflowConfig) -> Harness {
  let repo = Arc::new(InMemoryFlowRepository::new());
  let artifacts = Arc::new(InMemoryArtifactStore::new());
  let store = Arc::new(InMemorySessionStore::new());
  let repo_dyn: Arc<dyn FlowRepository> = repo.clone();
  let artifacts_dyn: Arc<dyn ArtifactStore> = artifacts.clone();
  let store_dyn: Arc<dyn SessionStore> = store.clone();
  let factory = TrainingSessionFactory::new(repo_dyn, artifacts_dyn, store_dyn, config);
  Harness { repo, artifacts, store, factory }
}

pub fn new_session(h: &Harness) -> TrainingFlow {
  h.factory.create::<TrainingFlow>("test-session").expect("create session")
}

/// PNG mínimo relleno hasta `size` bytes.
pub fn png(size: usize) -> Vec<u8> {
  let mut bytes = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".to_vec();
  bytes.resize(size.max(bytes.len()), 0);
  bytes
}

pub fn photo(name: &str) -> EvidenceUpload {
  EvidenceUpload::new(name, "image/png", png(2048))
}

/// Marca todas las casillas del paso actual y adjunta evidencia.
pub fn satisfy_current_step(flow: &mut TrainingFlow) {
  let step = flow.current_step().expect("current step");
  for i in 0..step.checklist.len() {
    flow.toggle_checklist_item(step.id, i, true).expect("toggle");
  }
  flow.attach_evidence(step.id, photo(&format!("{}.png", step.id))).expect("attach");
}

/// Completa todos los pasos restantes del cultivo seleccionado.
pub fn finish_training(flow: &mut TrainingFlow) {
  while flow.current_step().is_some() {
    satisfy_current_step(flow);
    match flow.complete_current_step().expect("complete") {
      CompletionOutcome::Blocked(reason) => panic!("bloqueado: {:?}", reason),
      _ => {}
    }
  }
}
