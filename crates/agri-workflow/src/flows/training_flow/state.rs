// state.rs
//
// Estado derivado de una corrida de capacitación. Las mutaciones que
// también se registran en el flow (`crop_selected`, `step_state:*`,
// `certificate_issued`) pasan por los métodos `apply_*`, que son los mismos
// que usa el replay al rehidratar.
use crate::certificate::CertificateRecord;
use crate::errors::WorkflowError;
use crate::step::{StepProgress, STEP_STATE_PREFIX};
use agri_domain::{CompletedStep, CropType, FarmerProfile};
use flow::domain::FlowData;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

pub const CROP_SELECTED_KEY: &str = "crop_selected";
pub const CERTIFICATE_KEY: &str = "certificate_issued";

pub const STATUS_CREATED: &str = "created";
pub const STATUS_IN_TRAINING: &str = "in_training";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CERTIFIED: &str = "certificate_issued";
pub const STATUS_ABANDONED: &str = "abandoned";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
  NoCropSelected,
  InTraining { step_index: usize },
  TrainingComplete,
  CertificateIssued,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingState {
  pub profile: FarmerProfile,
  pub crop: Option<CropType>,
  pub phase: TrainingPhase,
  /// Historial append-only, en orden de la secuencia del cultivo.
  pub completed: Vec<CompletedStep>,
  /// Casillas y evidencia de pasos aún no completados.
  pub progress: BTreeMap<String, StepProgress>,
  pub certificate: Option<CertificateRecord>,
  /// Corrida abandonada al cambiar de cultivo, si la hubo.
  pub previous_run: Option<Uuid>,
}

impl Default for TrainingState {
  fn default() -> Self {
    TrainingState { profile: FarmerProfile::new(),
                    crop: None,
                    phase: TrainingPhase::NoCropSelected,
                    completed: Vec::new(),
                    progress: BTreeMap::new(),
                    certificate: None,
                    previous_run: None }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CropSelectedPayload {
  pub crop: CropType,
}

impl TrainingState {
  /// Índice del paso actual; igual a la longitud de la secuencia cuando la
  /// capacitación terminó y 0 sin cultivo.
  pub fn current_step_index(&self) -> usize {
    match (self.phase, self.crop) {
      (TrainingPhase::InTraining { step_index }, _) => step_index,
      (TrainingPhase::NoCropSelected, _) => 0,
      (_, Some(crop)) => crop.steps().len(),
      (_, None) => 0,
    }
  }

  pub fn is_step_completed(&self, step_id: &str) -> bool {
    self.completed.iter().any(|c| c.step_id == step_id)
  }

  /// Empieza la secuencia del cultivo desde el paso 0 y descarta el
  /// progreso local y el historial.
  pub fn apply_crop_selected(&mut self, crop: CropType) {
    self.crop = Some(crop);
    self.profile.set_selected_crop(Some(crop));
    self.phase = TrainingPhase::InTraining { step_index: 0 };
    self.completed.clear();
    self.progress.clear();
    self.certificate = None;
  }

  /// Añade el paso completado si es el paso actual. Devuelve `false` si ya
  /// estaba registrado.
  pub fn apply_step_completed(&mut self, done: CompletedStep) -> Result<bool, WorkflowError> {
    if self.is_step_completed(&done.step_id) {
      return Ok(false);
    }
    let crop = self.crop.ok_or_else(|| WorkflowError::Validation("paso completado sin cultivo".into()))?;
    let index = match self.phase {
      TrainingPhase::InTraining { step_index } => step_index,
      _ => return Err(WorkflowError::Validation(format!("paso {} fuera de capacitación", done.step_id))),
    };
    let steps = crop.steps();
    if steps.get(index).map(|s| s.id) != Some(done.step_id.as_str()) {
      return Err(WorkflowError::Validation(format!("paso {} fuera de orden (actual: {})", done.step_id, index)));
    }
    self.progress.remove(&done.step_id);
    self.completed.push(done);
    self.phase = if index + 1 >= steps.len() {
      TrainingPhase::TrainingComplete
    } else {
      TrainingPhase::InTraining { step_index: index + 1 }
    };
    Ok(true)
  }

  pub fn apply_certificate(&mut self, record: CertificateRecord) {
    self.certificate = Some(record);
    self.phase = TrainingPhase::CertificateIssued;
  }

  /// Aplica un registro del flow durante el replay. Claves desconocidas se
  /// ignoran.
  pub fn apply_record(&mut self, data: &FlowData) -> Result<(), WorkflowError> {
    if data.key == CROP_SELECTED_KEY {
      let payload: CropSelectedPayload = serde_json::from_value(data.payload.clone())?;
      self.apply_crop_selected(payload.crop);
    } else if data.key.starts_with(STEP_STATE_PREFIX) {
      let done: CompletedStep = serde_json::from_value(data.payload.clone())?;
      self.apply_step_completed(done)?;
    } else if data.key == CERTIFICATE_KEY {
      let record: CertificateRecord = serde_json::from_value(data.payload.clone())?;
      self.apply_certificate(record);
    } else {
      debug!("replay: clave ignorada {}", data.key);
    }
    Ok(())
  }
}
