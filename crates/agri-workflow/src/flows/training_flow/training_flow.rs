// training_flow.rs
//
// Sesión de capacitación de un agricultor (`TrainingFlow`). Es el contexto
// explícito que recibe cada operación: perfil, cultivo, progreso local,
// historial de pasos y certificado. Cada transición se registra primero en
// el flow y solo después se aplica al estado en memoria.
use crate::certificate::{assemble_certificate_data, CertificateRecord, CertificateRenderer, RenderedDocument};
use crate::config::{CertificatePolicy, SnapshotPolicy, WorkflowConfig};
use crate::engine::TrainingFlowEngine;
use crate::errors::WorkflowError;
use crate::evidence::{validate_image, EvidenceUpload};
use crate::flows::training_flow::state::{CropSelectedPayload, TrainingPhase, TrainingState, CERTIFICATE_KEY,
                                         CROP_SELECTED_KEY, STATUS_ABANDONED, STATUS_CERTIFIED, STATUS_COMPLETED,
                                         STATUS_IN_TRAINING};
use crate::flows::training_flow::step_task::CropStepTask;
use crate::flows::training_flow::timeline::{build_timeline, days_progress, DaysProgress, TimelineEntry};
use crate::step::{command_id_for, BlockReason, GateStatus, StepContext, StepInfo, StepProgress, WorkflowStep};
use crate::workflow_type::WorkflowType;
use agri_domain::{rank_eligible, CompletedStep, CropStep, CropType, Evidence, FarmerProfile, SubsidyScheme};
use chrono::Utc;
use flow::engine::{FlowEngine, FlowEngineConfig};
use flow::repository::{ArtifactStore, FlowRepository};
use log::{debug, info, warn};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use uuid::Uuid;

/// Resultado de "completar paso actual".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
  /// Paso registrado; la capacitación sigue en `next_step_index`.
  Advanced { step_id: String, next_step_index: usize },
  /// Era el último paso: capacitación completa.
  Finished { step_id: String },
  /// La acción no está disponible; nada cambió.
  Blocked(BlockReason),
}

/// Certificado emitido junto con su documento renderizado.
#[derive(Debug, Clone)]
pub struct IssuedCertificate {
  pub record: CertificateRecord,
  pub document: RenderedDocument,
  /// `true` si se devolvió el certificado ya emitido de la corrida.
  pub reused: bool,
}

#[derive(Clone)]
pub struct TrainingFlow {
  pub id: Uuid,
  pub flow_repo: Arc<dyn FlowRepository>,
  pub artifacts: Arc<dyn ArtifactStore>,
  state: TrainingState,
  config: WorkflowConfig,
}

impl TrainingFlow {
  pub fn state(&self) -> &TrainingState {
    &self.state
  }

  pub fn profile(&self) -> &FarmerProfile {
    &self.state.profile
  }

  pub fn phase(&self) -> TrainingPhase {
    self.state.phase
  }

  pub fn selected_crop(&self) -> Option<CropType> {
    self.state.crop
  }

  pub fn current_step_index(&self) -> usize {
    self.state.current_step_index()
  }

  /// Paso en curso; `None` sin cultivo o con la capacitación terminada.
  pub fn current_step(&self) -> Option<&'static CropStep> {
    match (self.state.phase, self.state.crop) {
      (TrainingPhase::InTraining { step_index }, Some(crop)) => crop.steps().get(step_index),
      _ => None,
    }
  }

  pub fn completed_steps(&self) -> &[CompletedStep] {
    &self.state.completed
  }

  pub fn step_progress(&self, step_id: &str) -> Option<&StepProgress> {
    self.state.progress.get(step_id)
  }

  pub fn certificate(&self) -> Option<&CertificateRecord> {
    self.state.certificate.as_ref()
  }

  fn context(&self) -> StepContext {
    StepContext::new(self.id, self.flow_repo.clone())
  }

  fn engine(&self) -> FlowEngine<dyn FlowRepository> {
    FlowEngine::new(self.flow_repo.clone(), FlowEngineConfig::default())
  }

  /// Paso `step_id` dentro del cultivo seleccionado.
  fn step_in_crop(&self, step_id: &str) -> Result<&'static CropStep, WorkflowError> {
    let crop = self.state
                   .crop
                   .ok_or_else(|| WorkflowError::Validation("no hay cultivo seleccionado".into()))?;
    crop.steps()
        .iter()
        .find(|s| s.id == step_id)
        .ok_or_else(|| WorkflowError::Validation(format!("el paso {} no pertenece a {}", step_id, crop)))
  }

  /// Edita el perfil de forma atómica: el cambio se aplica sobre una copia
  /// y solo se conserva si `edit` termina bien. El cultivo seleccionado no
  /// se puede cambiar por aquí.
  pub fn edit_profile<T, E, F>(&mut self, edit: F) -> Result<T, WorkflowError>
    where F: FnOnce(&mut FarmerProfile) -> Result<T, E>,
          E: Into<WorkflowError>
  {
    let mut draft = self.state.profile.clone();
    let out = edit(&mut draft).map_err(Into::into)?;
    draft.set_selected_crop(self.state.crop);
    self.state.profile = draft;
    Ok(out)
  }

  /// Foto de perfil: imagen de hasta `max_profile_photo_bytes`.
  pub fn set_profile_photo(&mut self, upload: EvidenceUpload) -> Result<String, WorkflowError> {
    let media_type = validate_image(&upload, self.config.max_profile_photo_bytes)?;
    let mut draft = self.state.profile.clone();
    draft.set_profile_photo(None)?;
    let key = self.artifacts.put(&upload.bytes, media_type)?;
    draft.set_profile_photo(Some(key.clone()))?;
    self.state.profile = draft;
    Ok(key)
  }

  /// Selecciona el cultivo y empieza su secuencia en el paso 0.
  ///
  /// Repetir el mismo cultivo no hace nada. Con pasos ya completados, otro
  /// cultivo abre una corrida nueva y la anterior queda `abandoned`.
  pub fn select_crop(&mut self, crop: CropType) -> Result<(), WorkflowError> {
    if self.state.phase == TrainingPhase::CertificateIssued {
      return Err(WorkflowError::Validation("la corrida ya está certificada; no se puede cambiar el cultivo".into()));
    }
    if self.state.crop == Some(crop) {
      debug!("select_crop: {} ya seleccionado en {}", crop, self.id);
      return Ok(());
    }
    if !self.state.completed.is_empty() {
      return self.switch_run(crop);
    }
    self.context()
        .save_record_or_fail(CROP_SELECTED_KEY, self.crop_selected_info(crop)?, None)?;
    self.state.apply_crop_selected(crop);
    self.mark_status(STATUS_IN_TRAINING);
    info!("flow {}: cultivo {} seleccionado", self.id, crop);
    Ok(())
  }

  fn crop_selected_info(&self, crop: CropType) -> Result<StepInfo, WorkflowError> {
    Ok(StepInfo { payload: serde_json::to_value(CropSelectedPayload { crop })?,
                  metadata: json!({ "previous_crop": self.state.crop }) })
  }

  /// Estado del flow tras una transición ya registrada. Si falla solo se
  /// registra el aviso: el estado se deriva de los registros.
  fn mark_status(&self, status: &str) {
    if let Err(e) = self.engine().set_status(&self.id, status) {
      warn!("flow {}: no se pudo marcar '{}': {}", self.id, status, e);
    }
  }

  /// Pasa la sesión a una corrida nueva con `crop`, conservando el perfil.
  ///
  /// La corrida nueva queda completa (registro de cultivo y snapshot) antes
  /// de tocar la anterior; la sesión solo cambia de flow cuando todo se
  /// guardó. Ante un error se borra la corrida nueva y la anterior sigue
  /// intacta.
  fn switch_run(&mut self, crop: CropType) -> Result<(), WorkflowError> {
    let old = self.id;
    let engine = self.engine();
    let old_meta = self.flow_repo.get_flow_meta(&old)?;
    let new_id = engine.start_flow(old_meta.name.clone(),
                                   Some(STATUS_IN_TRAINING.to_string()),
                                   json!({ "previous_run": old.to_string(),
                                           "workflow_type": Self::engine_workflow_type().to_string() }))?;

    let mut next = self.state.clone();
    next.apply_crop_selected(crop);
    next.previous_run = Some(old);

    let staged = (|| -> Result<(), WorkflowError> {
      engine.append_or_fail(new_id,
                            CROP_SELECTED_KEY,
                            serde_json::to_value(CropSelectedPayload { crop })?,
                            json!({ "previous_crop": self.state.crop, "previous_run": old.to_string() }),
                            None)?;
      engine.save_snapshot(&new_id, serde_json::to_value(&next)?)?;
      engine.save_snapshot(&old, self.snapshot()?)?;
      self.flow_repo.set_meta(&old, "superseded_by", json!(new_id.to_string()))?;
      engine.set_status(&old, STATUS_ABANDONED)?;
      Ok(())
    })();

    if let Err(e) = staged {
      warn!("flow {}: cambio a {} revertido: {}", old, crop, e);
      if let Err(del) = self.flow_repo.delete_flow(&new_id) {
        warn!("flow {}: no se pudo borrar la corrida parcial: {}", new_id, del);
      }
      if let Err(meta) = self.flow_repo.del_meta(&old, "superseded_by") {
        warn!("flow {}: no se pudo limpiar superseded_by: {}", old, meta);
      }
      if let Err(st) = self.flow_repo.set_flow_status(&old, old_meta.status) {
        warn!("flow {}: no se pudo restaurar el estado: {}", old, st);
      }
      return Err(e);
    }

    warn!("flow {} abandonado por cambio de cultivo; nueva corrida {}", old, new_id);
    self.id = new_id;
    self.state = next;
    info!("flow {}: cultivo {} seleccionado", self.id, crop);
    Ok(())
  }

  /// Marca o desmarca una casilla. No hace nada en pasos ya completados.
  pub fn toggle_checklist_item(&mut self, step_id: &str, item_index: usize, checked: bool) -> Result<(), WorkflowError> {
    let step = self.step_in_crop(step_id)?;
    if self.state.is_step_completed(step_id) {
      debug!("toggle ignorado: {} ya completado", step_id);
      return Ok(());
    }
    let len = step.checklist.len();
    if item_index >= len {
      return Err(WorkflowError::Validation(format!("casilla {} fuera de rango para {} ({} casillas)",
                                                   item_index, step_id, len)));
    }
    let entry = self.state
                    .progress
                    .entry(step_id.to_string())
                    .or_insert_with(|| StepProgress::new(len));
    if entry.checked.len() < len {
      entry.checked.resize(len, false);
    }
    entry.checked[item_index] = checked;
    Ok(())
  }

  /// Adjunta evidencia al paso (la última gana). En pasos completados
  /// devuelve `Ok(None)` sin cambios.
  pub fn attach_evidence(&mut self, step_id: &str, upload: EvidenceUpload) -> Result<Option<Evidence>, WorkflowError> {
    let step = self.step_in_crop(step_id)?;
    if self.state.is_step_completed(step_id) {
      debug!("evidencia ignorada: {} ya completado", step_id);
      return Ok(None);
    }
    let media_type = validate_image(&upload, self.config.max_evidence_bytes)?;
    let artifact_key = self.artifacts.put(&upload.bytes, media_type)?;
    let evidence = Evidence { artifact_key,
                              filename: upload.filename.clone(),
                              media_type: media_type.to_string(),
                              captured_at: upload.captured_at.unwrap_or_else(Utc::now),
                              file_size_bytes: upload.size() };
    self.state
        .progress
        .entry(step_id.to_string())
        .or_insert_with(|| StepProgress::new(step.checklist.len()))
        .evidence = Some(evidence.clone());
    debug!("evidencia {} adjunta a {}", evidence.artifact_key, step_id);
    Ok(Some(evidence))
  }

  /// Compuerta del paso actual; `None` si no hay paso en curso.
  pub fn gate_status(&self) -> Option<GateStatus> {
    let step = self.current_step()?;
    let empty = StepProgress::new(step.checklist.len());
    let progress = self.state.progress.get(step.id).unwrap_or(&empty);
    Some(CropStepTask::new(step).gate(progress))
  }

  pub fn can_complete_current_step(&self) -> bool {
    self.gate_status().map(|g| g.is_ready()).unwrap_or(false)
  }

  /// Completa el paso actual si la compuerta lo permite.
  pub fn complete_current_step(&mut self) -> Result<CompletionOutcome, WorkflowError> {
    let step = match self.state.phase {
      TrainingPhase::NoCropSelected => return Ok(CompletionOutcome::Blocked(BlockReason::NoCropSelected)),
      TrainingPhase::TrainingComplete | TrainingPhase::CertificateIssued => {
        return Ok(CompletionOutcome::Blocked(BlockReason::TrainingFinished))
      }
      TrainingPhase::InTraining { .. } => match self.current_step() {
        Some(step) => step,
        None => return Err(WorkflowError::Validation("índice de paso fuera de la secuencia".into())),
      },
    };
    let task = CropStepTask::new(step);
    let progress = self.state
                       .progress
                       .get(step.id)
                       .cloned()
                       .unwrap_or_else(|| StepProgress::new(step.checklist.len()));
    if let Err(reason) = task.validate(&progress) {
      debug!("completar {} bloqueado: {:?}", step.id, reason);
      return Ok(CompletionOutcome::Blocked(reason));
    }

    let info = task.execute(&progress, Utc::now())?;
    let done: CompletedStep = serde_json::from_value(info.payload.clone())?;
    let mut next = self.state.clone();
    next.apply_step_completed(done)?;
    self.context()
        .save_step_result(task.name(), info, Some(command_id_for(&self.id, task.name())))?;
    self.state = next;

    // Lo que sigue es derivable de los registros: los fallos solo se avisan.
    let outcome = match self.state.phase {
      TrainingPhase::InTraining { step_index } => CompletionOutcome::Advanced { step_id: step.id.to_string(),
                                                                                next_step_index: step_index },
      _ => {
        self.mark_status(STATUS_COMPLETED);
        CompletionOutcome::Finished { step_id: step.id.to_string() }
      }
    };
    info!("flow {}: paso {} completado ({}%)", self.id, step.id, self.completion_percentage());
    if let SnapshotPolicy::Every(n) = self.config.snapshot_policy {
      if n > 0 && self.state.completed.len() % n as usize == 0 {
        if let Err(e) = self.save() {
          warn!("flow {}: snapshot omitido: {}", self.id, e);
        }
      }
    }
    Ok(outcome)
  }

  /// `round(100 * completados / total)`; 0 sin cultivo.
  pub fn completion_percentage(&self) -> u8 {
    let total = match self.state.crop {
      Some(crop) => crop.steps().len(),
      None => return 0,
    };
    if total == 0 {
      return 0;
    }
    let done = self.state.completed.len().min(total);
    ((200 * done + total) / (2 * total)) as u8
  }

  /// Esquemas elegibles para la superficie del perfil, bandas más
  /// ajustadas primero.
  pub fn eligible_schemes(&self) -> Vec<&'static SubsidyScheme> {
    rank_eligible(self.state.profile.land_area_acres())
  }

  pub fn timeline(&self) -> Vec<TimelineEntry> {
    match self.state.crop {
      Some(crop) => build_timeline(crop, self.current_step_index(), &self.state.completed),
      None => Vec::new(),
    }
  }

  pub fn days_progress(&self) -> DaysProgress {
    days_progress(self.state.crop, &self.state.completed)
  }

  /// Datos del certificado con el estado actual, sin emitir nada.
  pub fn assemble_certificate_data(&self) -> Result<CertificateRecord, WorkflowError> {
    assemble_certificate_data(&self.state.profile, &self.state.completed, &self.eligible_schemes(), &self.config)
  }

  /// Emite el certificado de la corrida y lo entrega al renderizador.
  ///
  /// Con `OnePerRun` la primera emisión es canónica y se reutiliza; con
  /// `AlwaysFresh` cada llamada genera un identificador nuevo.
  pub fn generate_certificate(&mut self, renderer: &dyn CertificateRenderer) -> Result<IssuedCertificate, WorkflowError> {
    if self.state.completed.is_empty() {
      return Err(WorkflowError::NoCompletedSteps);
    }
    match self.state.phase {
      TrainingPhase::TrainingComplete | TrainingPhase::CertificateIssued => {}
      _ => return Err(WorkflowError::Validation("la capacitación no está completa".into())),
    }
    let policy = self.config.certificate_policy;
    if policy == CertificatePolicy::OnePerRun {
      if let Some(existing) = &self.state.certificate {
        let document = renderer.render(existing, self.artifacts.as_ref())?;
        return Ok(IssuedCertificate { record: existing.clone(),
                                      document,
                                      reused: true });
      }
    }

    let record = self.assemble_certificate_data()?;
    let document = renderer.render(&record, self.artifacts.as_ref())?;
    let command_id = match policy {
      CertificatePolicy::OnePerRun => Some(command_id_for(&self.id, CERTIFICATE_KEY)),
      CertificatePolicy::AlwaysFresh => None,
    };
    let info = StepInfo { payload: serde_json::to_value(&record)?,
                          metadata: json!({ "policy": policy.to_string(), "filename": document.filename }) };
    self.context().save_record_or_fail(CERTIFICATE_KEY, info, command_id)?;
    self.state.apply_certificate(record.clone());
    self.mark_status(STATUS_CERTIFIED);
    info!("flow {}: certificado {} emitido", self.id, record.certificate_id);
    Ok(IssuedCertificate { record,
                           document,
                           reused: false })
  }

  /// Guarda un snapshot del estado en el cursor actual del flow.
  pub fn save(&self) -> Result<Uuid, WorkflowError> {
    let state = self.snapshot()?;
    Ok(self.engine().save_snapshot(&self.id, state)?)
  }
}

impl TrainingFlowEngine for TrainingFlow {
  fn id(&self) -> Uuid {
    self.id
  }

  fn engine_workflow_type() -> WorkflowType {
    WorkflowType::CropTraining
  }

  fn construct_with_repos(id: Uuid,
                          flow_repo: Arc<dyn FlowRepository>,
                          artifacts: Arc<dyn ArtifactStore>,
                          config: WorkflowConfig)
                          -> Self {
    TrainingFlow { id,
                   flow_repo,
                   artifacts,
                   state: TrainingState::default(),
                   config }
  }

  fn rehydrate(id: Uuid,
               flow_repo: Arc<dyn FlowRepository>,
               artifacts: Arc<dyn ArtifactStore>,
               config: WorkflowConfig)
               -> Result<Self, WorkflowError> {
    let mut flow = Self::construct_with_repos(id, flow_repo, artifacts, config);
    let rehydration = flow.engine().rehydrate(&id)?;
    if let Some(snapshot) = &rehydration.snapshot {
      flow.apply_snapshot(&snapshot.state)?;
    }
    for data in &rehydration.replay {
      flow.state.apply_record(data)?;
    }
    debug!("flow {} rehidratado: {} registros reproducidos", id, rehydration.replay.len());
    Ok(flow)
  }

  fn snapshot(&self) -> Result<JsonValue, WorkflowError> {
    Ok(serde_json::to_value(&self.state)?)
  }

  fn apply_snapshot(&mut self, snapshot: &JsonValue) -> Result<(), WorkflowError> {
    let state: TrainingState = serde_json::from_value(snapshot.clone())?;
    self.state = state;
    Ok(())
  }

  fn config(&self) -> &WorkflowConfig {
    &self.config
  }
}
