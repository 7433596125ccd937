use crate::errors::WorkflowError;
use agri_domain::Evidence;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Resultado de ejecutar un paso, listo para persistirse en `FlowData`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepInfo {
  pub payload: JsonValue,
  pub metadata: JsonValue,
}

/// Progreso local (aún no completado) de un paso: casillas marcadas y la
/// última evidencia adjunta.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepProgress {
  pub checked: Vec<bool>,
  pub evidence: Option<Evidence>,
}

impl StepProgress {
  pub fn new(checklist_len: usize) -> Self {
    StepProgress { checked: vec![false; checklist_len],
                   evidence: None }
  }

  /// Índices de casillas sin marcar para una lista de `checklist_len`.
  /// Las casillas que nunca se tocaron cuentan como no marcadas.
  pub fn missing_items(&self, checklist_len: usize) -> Vec<usize> {
    (0..checklist_len).filter(|i| !self.checked.get(*i).copied().unwrap_or(false)).collect()
  }
}

/// Estado de la compuerta de un paso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateStatus {
  pub step_id: String,
  pub checklist_total: usize,
  pub missing_items: Vec<usize>,
  pub has_evidence: bool,
}

impl GateStatus {
  pub fn is_ready(&self) -> bool {
    self.missing_items.is_empty() && self.has_evidence
  }
}

/// Motivo por el que "completar paso" no está disponible. No es un error:
/// la acción simplemente no procede.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
  NoCropSelected,
  TrainingFinished,
  Gate(GateStatus),
}

/// Trait que representa un paso del flujo.
pub trait WorkflowStep: Send + Sync {
  /// Nombre o identificador del paso
  fn name(&self) -> &str;

  /// Evalúa la compuerta (casillas + evidencia) sobre el progreso local.
  fn gate(&self, progress: &StepProgress) -> GateStatus;

  /// Validacion previa a la ejecucion.
  fn validate(&self, progress: &StepProgress) -> Result<(), BlockReason> {
    let gate = self.gate(progress);
    if gate.is_ready() {
      Ok(())
    } else {
      Err(BlockReason::Gate(gate))
    }
  }

  /// Construye el registro del paso completado. No persiste nada.
  fn execute(&self, progress: &StepProgress, completed_at: DateTime<Utc>) -> Result<StepInfo, WorkflowError>;
}
