// errors.rs
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
  #[error("Error de validación: {0}")]
  ValidationError(String),
  #[error("Campo de solo lectura: {0}")]
  ReadOnlyField(String),
  #[error("Cultivo desconocido: {0}")]
  UnknownCrop(String),
  #[error("Paso desconocido: {0}")]
  UnknownStep(String),
  #[error("Error de almacenamiento: {0}")]
  StorageError(String),
  #[error("Error de serialización: {0}")]
  SerializationError(String),
}

impl From<serde_json::Error> for DomainError {
  fn from(e: serde_json::Error) -> Self {
    Self::SerializationError(e.to_string())
  }
}
