use crate::config::WorkflowConfig;
use crate::engine::TrainingFlowEngine;
use crate::flows::training_flow::state::STATUS_CREATED;
use crate::flows::TrainingFlow;
use crate::handoff::{HandoffOutcome, IdentityHandoff, KEY_NAME};
use crate::workflow_type::WorkflowType;
use crate::WorkflowError;
use agri_domain::SessionStore;
use flow::repository::{ArtifactStore, FlowRepository};
use flow::stubs::InMemoryArtifactStore;
use log::info;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Resumen de una corrida registrada.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
  pub id: Uuid,
  pub name: Option<String>,
  pub status: Option<String>,
  pub workflow_type: WorkflowType,
}

/// Fábrica para crear o cargar sesiones de capacitación.
///
/// Reúne los repositorios que necesita cada sesión: el de flows (corridas
/// y snapshots), el almacén de evidencias y la caché de identidad.
#[derive(Clone)]
pub struct TrainingSessionFactory {
  flow_repo: Arc<dyn FlowRepository>,
  artifacts: Arc<dyn ArtifactStore>,
  session_store: Arc<dyn SessionStore>,
  config: WorkflowConfig,
}

impl TrainingSessionFactory {
  pub fn new(flow_repo: Arc<dyn FlowRepository>,
             artifacts: Arc<dyn ArtifactStore>,
             session_store: Arc<dyn SessionStore>,
             config: WorkflowConfig)
             -> Self {
    Self { flow_repo,
           artifacts,
           session_store,
           config }
  }

  /// Repositorios SQLite de `agri-persistence` y evidencias en memoria
  /// (solo viven durante la sesión).
  pub fn from_env() -> Result<Self, WorkflowError> {
    let repo = agri_persistence::new_from_env()?;
    let store = agri_persistence::new_session_store_from_env()?;
    Ok(Self::new(Arc::new(repo),
                 Arc::new(InMemoryArtifactStore::new()),
                 Arc::new(store),
                 WorkflowConfig::from_env()))
  }

  pub fn flow_repo(&self) -> &Arc<dyn FlowRepository> {
    &self.flow_repo
  }

  pub fn session_store(&self) -> &Arc<dyn SessionStore> {
    &self.session_store
  }

  pub fn config(&self) -> &WorkflowConfig {
    &self.config
  }

  /// Lista las corridas conocidas con su tipo y estado.
  pub fn list_sessions(&self) -> Result<Vec<SessionSummary>, WorkflowError> {
    let mut out = Vec::new();
    for id in self.flow_repo.list_flow_ids()? {
      let meta = self.flow_repo.get_flow_meta(&id)?;
      let workflow_type = meta.metadata
                              .get("workflow_type")
                              .and_then(|v| v.as_str())
                              .and_then(|s| s.parse::<WorkflowType>().ok())
                              .unwrap_or_default();
      out.push(SessionSummary { id,
                                name: meta.name,
                                status: meta.status,
                                workflow_type });
    }
    Ok(out)
  }

  /// Crea un flow nuevo y construye el motor `E` sobre él.
  pub fn create<E>(&self, create_name: &str) -> Result<E, WorkflowError>
    where E: TrainingFlowEngine
  {
    let workflow_type = E::engine_workflow_type();
    let id = self.flow_repo
                 .create_flow(Some(create_name.to_string()), Some(STATUS_CREATED.to_string()), json!({}))?;
    self.flow_repo.set_meta(&id, "workflow_type", json!(workflow_type.to_string()))?;
    info!("sesión {} creada ({})", id, workflow_type);
    Ok(E::construct_with_repos(id, self.flow_repo.clone(), self.artifacts.clone(), self.config.clone()))
  }

  /// Carga una sesión existente (snapshot + replay). Falla si el flow es
  /// de otro tipo.
  pub fn load<E>(&self, flow_id: &Uuid) -> Result<E, WorkflowError>
    where E: TrainingFlowEngine
  {
    let found = self.flow_repo
                    .get_meta(flow_id, "workflow_type")?
                    .as_str()
                    .and_then(|s| s.parse::<WorkflowType>().ok())
                    .unwrap_or_default();
    if found != E::engine_workflow_type() {
      return Err(WorkflowError::Validation(format!("el flow {} es de tipo {}", flow_id, found)));
    }
    E::rehydrate(*flow_id, self.flow_repo.clone(), self.artifacts.clone(), self.config.clone())
  }

  /// Abre una sesión de capacitación aplicando el hand-off de identidad; si
  /// trae un cultivo válido lo selecciona. Guarda un snapshot inicial.
  pub fn start_session(&self, handoff: &IdentityHandoff) -> Result<(TrainingFlow, HandoffOutcome), WorkflowError> {
    let name = handoff.get(KEY_NAME).unwrap_or("farmer-session").to_string();
    let mut session: TrainingFlow = self.create(&name)?;
    let store = self.session_store.clone();
    let outcome = session.edit_profile(|profile| handoff.apply(profile, store.as_ref()))?;
    if let Some(crop) = outcome.crop {
      session.select_crop(crop)?;
    }
    session.save()?;
    Ok((session, outcome))
  }
}
