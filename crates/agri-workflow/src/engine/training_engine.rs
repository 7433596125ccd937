use crate::config::WorkflowConfig;
use crate::errors::WorkflowError;
use crate::workflow_type::WorkflowType;
use flow::repository::{ArtifactStore, FlowRepository};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use uuid::Uuid;

/// Interfaz mínima de una sesión de capacitación respaldada por un flow.
///
/// La fábrica trabaja contra este trait: crea el flow, construye el motor
/// concreto y, al cargar, delega la rehidratación (snapshot + replay) en
/// `rehydrate`.
pub trait TrainingFlowEngine: Send + Sync + Sized {
  /// Identificador del flow (corrida) asociado a esta instancia.
  fn id(&self) -> Uuid;

  /// Tipo registrado en la metadata `workflow_type` del flow.
  fn engine_workflow_type() -> WorkflowType;

  /// Construye una sesión vacía sobre un flow ya creado.
  fn construct_with_repos(id: Uuid,
                          flow_repo: Arc<dyn FlowRepository>,
                          artifacts: Arc<dyn ArtifactStore>,
                          config: WorkflowConfig)
                          -> Self;

  /// Reconstruye la sesión desde el último snapshot y los registros
  /// posteriores.
  fn rehydrate(id: Uuid,
               flow_repo: Arc<dyn FlowRepository>,
               artifacts: Arc<dyn ArtifactStore>,
               config: WorkflowConfig)
               -> Result<Self, WorkflowError>;

  /// Estado serializado, autocontenido, que `apply_snapshot` acepta.
  fn snapshot(&self) -> Result<JsonValue, WorkflowError>;

  /// Reemplaza el estado con un snapshot producido por `snapshot`.
  fn apply_snapshot(&mut self, snapshot: &JsonValue) -> Result<(), WorkflowError>;

  /// Devuelve la configuracion activa.
  fn config(&self) -> &WorkflowConfig;
}
