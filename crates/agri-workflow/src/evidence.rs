// evidence.rs
//
// Validación de imágenes subidas (evidencia de pasos y foto de perfil)
// antes de tocar el almacén de artefactos.
use crate::errors::WorkflowError;
use agri_domain::{is_image_media_type, sniff_image_type};
use chrono::{DateTime, Utc};

/// Imagen tal como llega del dispositivo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceUpload {
  pub filename: String,
  /// Media type declarado por el cliente.
  pub media_type: String,
  pub bytes: Vec<u8>,
  /// Momento de captura; `None` usa la hora de adjuntar.
  pub captured_at: Option<DateTime<Utc>>,
}

impl EvidenceUpload {
  pub fn new(filename: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
    EvidenceUpload { filename: filename.into(),
                     media_type: media_type.into(),
                     bytes,
                     captured_at: None }
  }

  pub fn size(&self) -> u64 {
    self.bytes.len() as u64
  }
}

/// Comprueba tamaño y tipo, en ese orden, y devuelve el media type real
/// detectado por firma. El tipo declarado debe ser `image/*` y los bytes
/// deben ser una imagen reconocible.
pub fn validate_image(upload: &EvidenceUpload, max_bytes: u64) -> Result<&'static str, WorkflowError> {
  let size = upload.size();
  if size > max_bytes {
    return Err(WorkflowError::EvidenceTooLarge { size, limit: max_bytes });
  }
  if !is_image_media_type(&upload.media_type) {
    return Err(WorkflowError::UnsupportedEvidenceType(upload.media_type.clone()));
  }
  sniff_image_type(&upload.bytes).ok_or_else(|| {
                                   WorkflowError::UnsupportedEvidenceType(format!("{} (contenido no reconocido)",
                                                                                  upload.media_type))
                                 })
}
