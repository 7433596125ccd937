// step_task.rs
//! Paso de capacitación ejecutable: envuelve un `CropStep` del catálogo y
//! aplica la compuerta (todas las casillas marcadas + evidencia adjunta)
//! antes de producir el `CompletedStep`.

use crate::errors::WorkflowError;
use crate::step::{GateStatus, StepInfo, StepProgress, WorkflowStep};
use agri_domain::{CompletedStep, CropStep, CropType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy)]
pub struct CropStepTask {
  step: &'static CropStep,
}

/// Metadatos legibles para auditoría / UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropStepMetadata {
  pub status: String,
  pub crop: CropType,
  pub title: String,
  pub checklist_total: usize,
  pub evidence_filename: Option<String>,
}

impl CropStepTask {
  pub fn new(step: &'static CropStep) -> Self {
    Self { step }
  }
}

impl WorkflowStep for CropStepTask {
  fn name(&self) -> &str {
    self.step.id
  }

  fn gate(&self, progress: &StepProgress) -> GateStatus {
    let total = self.step.checklist.len();
    GateStatus { step_id: self.step.id.to_string(),
                 checklist_total: total,
                 missing_items: progress.missing_items(total),
                 has_evidence: progress.evidence.is_some() }
  }

  fn execute(&self, progress: &StepProgress, completed_at: DateTime<Utc>) -> Result<StepInfo, WorkflowError> {
    if self.validate(progress).is_err() {
      return Err(WorkflowError::Validation(format!("el paso {} no cumple la compuerta", self.step.id)));
    }
    let record = CompletedStep { step_id: self.step.id.to_string(),
                                 completed_at,
                                 evidence: progress.evidence.clone() };
    let metadata = CropStepMetadata { status: "completed".to_string(),
                                      crop: self.step.crop,
                                      title: self.step.title.to_string(),
                                      checklist_total: self.step.checklist.len(),
                                      evidence_filename: progress.evidence.as_ref().map(|e| e.filename.clone()) };
    Ok(StepInfo { payload: serde_json::to_value(&record)?,
                  metadata: serde_json::to_value(&metadata)? })
  }
}
