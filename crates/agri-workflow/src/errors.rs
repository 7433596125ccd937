use thiserror::Error;

// Errores comunes del motor de capacitación.
//
// Este enum centraliza los errores que pueden ocurrir durante una sesión:
// errores de persistencia (`FlowError`), del dominio (`DomainError`),
// rechazos de evidencia y validaciones locales. Ningún error deja el
// estado de la sesión a medio modificar.
#[derive(Error, Debug)]
pub enum WorkflowError {
  /// Errores originados por la capa de registros (`flow` crate).
  #[error("Error de flujo: {0}")]
  Flow(#[from] flow::errors::FlowError),

  /// Errores del dominio agrícola (perfil, catálogo, caché de sesión).
  #[error("Error de dominio: {0}")]
  Domain(#[from] agri_domain::DomainError),

  /// Errores de persistencia de alto nivel (mensajes simples).
  #[error("Error de persistencia: {0}")]
  Persistence(String),

  /// Errores de serializacion/deserializacion JSON.
  #[error("Error de serializacion: {0}")]
  Serialization(#[from] serde_json::Error),

  /// Validaciones locales (paso desconocido, índice fuera de rango,
  /// transición no permitida).
  #[error("Error de validacion: {0}")]
  Validation(String),

  /// La evidencia supera el tamaño máximo permitido.
  #[error("Evidencia demasiado grande: {size} bytes (máximo {limit})")]
  EvidenceTooLarge { size: u64, limit: u64 },

  /// La evidencia no es una imagen reconocible.
  #[error("Tipo de evidencia no soportado: {0}")]
  UnsupportedEvidenceType(String),

  /// Se pidió un certificado sin pasos completados.
  #[error("No hay pasos completados para certificar")]
  NoCompletedSteps,

  /// Fallo del sumidero de documentos al renderizar el certificado.
  #[error("Error de renderizado: {0}")]
  Render(String),
}
