// Archivo: errors.rs
// Propósito: errores de los colaboradores externos (HTTP, API, respuestas
// malformadas y configuración).
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Error HTTP: {0}")]
    Http(#[from] reqwest::Error),
    #[error("La API respondió {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Respuesta inválida: {0}")]
    InvalidResponse(String),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("La pregunta está vacía")]
    EmptyQuestion,
}

pub type Result<T> = std::result::Result<T, ProviderError>;
