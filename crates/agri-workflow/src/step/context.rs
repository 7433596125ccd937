use crate::errors::WorkflowError;
use crate::step::StepInfo;
use flow::engine::{FlowEngine, FlowEngineConfig};
use flow::errors::FlowError;
use flow::repository::FlowRepository;
use std::sync::Arc;
use uuid::Uuid;

/// Prefijo de las claves de registros de pasos completados.
pub const STEP_STATE_PREFIX: &str = "step_state:";

/// Command id determinista para `name` dentro del flow: el mismo paso de la
/// misma corrida produce siempre el mismo id, así el repositorio nunca lo
/// registra dos veces.
pub fn command_id_for(flow_id: &Uuid, name: &str) -> Uuid {
  Uuid::new_v5(flow_id, name.as_bytes())
}

/// Contexto pasado a los pasos para leer y guardar registros tipados de la
/// corrida.
pub struct StepContext {
  /// Identificador del flow (corrida) al que pertenece el contexto.
  pub flow_id: Uuid,
  /// Repositorio para leer/guardar `FlowData` y snapshots.
  pub flow_repo: Arc<dyn FlowRepository>,
}

impl StepContext {
  pub fn new(flow_id: Uuid, flow_repo: Arc<dyn FlowRepository>) -> Self {
    Self { flow_id, flow_repo }
  }

  fn engine(&self) -> FlowEngine<dyn FlowRepository> {
    FlowEngine::new(self.flow_repo.clone(), FlowEngineConfig::default())
  }

  /// Guarda el resultado de un paso como `step_state:{step_name}`.
  pub fn save_step_result(&self, step_name: &str, info: StepInfo, command_id: Option<Uuid>) -> Result<i64, WorkflowError> {
    self.save_record_or_fail(&format!("{}{}", STEP_STATE_PREFIX, step_name), info, command_id)
  }

  /// Anexa un registro en el siguiente cursor del flow. Un `Conflict` que
  /// persiste tras los reintentos del motor se convierte en error: la
  /// sesión tiene un solo escritor, así que indica que otra instancia
  /// modificó la corrida.
  pub fn save_record_or_fail(&self, key: &str, info: StepInfo, command_id: Option<Uuid>) -> Result<i64, WorkflowError> {
    match self.engine()
              .append_or_fail(self.flow_id, key, info.payload, info.metadata, command_id)
    {
      Ok(version) => Ok(version),
      Err(FlowError::Conflict(_)) => {
        Err(WorkflowError::Persistence(format!("conflicto de versión al guardar '{}' en {}", key, self.flow_id)))
      }
      Err(e) => Err(e.into()),
    }
  }
}
