//! Colaboradores externos del flujo de capacitación: asesoría por chat con
//! respuesta local de respaldo y geocodificación inversa para la ubicación
//! del perfil. Todo se configura con `ProviderConfig::from_env`.

pub mod advisory;
pub mod config;
pub mod errors;
pub mod fallback;
pub mod geocoding;
pub mod language;

pub use advisory::{build_prompt, Advice, AdviceSource, AdvisoryChat, AdvisoryService, GeminiAdvisoryClient};
pub use config::ProviderConfig;
pub use errors::ProviderError;
pub use fallback::fallback_response;
pub use geocoding::{format_address, NominatimAddress, NominatimGeocoder, ReverseGeocoder};
pub use language::Language;
