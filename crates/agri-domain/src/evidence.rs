// evidence.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Foto de evidencia ya almacenada. `artifact_key` es la referencia opaca
/// devuelta por el almacén de artefactos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
  pub artifact_key: String,
  pub filename: String,
  pub media_type: String,
  pub captured_at: DateTime<Utc>,
  pub file_size_bytes: u64,
}

/// Registro inmutable de un paso completado. A lo sumo uno por paso y
/// corrida; nunca se reescribe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedStep {
  pub step_id: String,
  pub completed_at: DateTime<Utc>,
  pub evidence: Option<Evidence>,
}

/// Detecta el formato de imagen por firma (magic bytes). Devuelve el media
/// type canónico o `None` si los bytes no son una imagen conocida.
pub fn sniff_image_type(bytes: &[u8]) -> Option<&'static str> {
  match bytes {
    [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
    [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
    [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some("image/gif"),
    [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
    [b'B', b'M', ..] => Some("image/bmp"),
    _ => None,
  }
}

/// `true` si el media type declarado pertenece a la familia `image/*`.
pub fn is_image_media_type(media_type: &str) -> bool {
  media_type.trim().to_ascii_lowercase().starts_with("image/")
}
