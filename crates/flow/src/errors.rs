// Archivo: errors.rs
// Propósito: errores del crate `flow` y el alias Result<T> usado por el
// repositorio, el almacén de evidencias y el motor.
use thiserror::Error;

/// Errores comunes de la capa de registros.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Entidad no encontrada (flow, snapshot o artefacto).
    #[error("No encontrado: {0}")]
    NotFound(String),
    /// Conflicto de versión o de cursor.
    #[error("Conflicto: {0}")]
    Conflict(String),
    /// Error del almacenamiento subyacente (BD, mutex envenenado, etc.).
    #[error("Error de almacenamiento: {0}")]
    Storage(String),
    /// Error al (de)serializar payloads o snapshots.
    #[error("Error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlowError>;
