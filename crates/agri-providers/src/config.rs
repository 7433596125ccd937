// Archivo: config.rs
// Propósito: configuración de los proveedores leída del entorno (`.env`
// incluido). La clave de la API nunca se incrusta en el código.
use std::time::Duration;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// `None` desactiva el modelo: la asesoría usa solo respuestas locales.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub nominatim_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self { gemini_api_key: None,
               gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
               gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
               nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
               timeout: Duration::from_secs(20),
               user_agent: concat!("kisan-training/", env!("CARGO_PKG_VERSION")).to_string() }
    }
}

impl ProviderConfig {
    /// Variables: `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_BASE_URL`,
    /// `NOMINATIM_URL`, `AGRI_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut cfg = Self::default();
        cfg.gemini_api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty());
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            cfg.gemini_model = model;
        }
        if let Ok(url) = std::env::var("GEMINI_BASE_URL") {
            cfg.gemini_base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(url) = std::env::var("NOMINATIM_URL") {
            cfg.nominatim_url = url;
        }
        if let Some(secs) = std::env::var("AGRI_HTTP_TIMEOUT_SECS").ok().and_then(|v| v.parse::<u64>().ok()) {
            cfg.timeout = Duration::from_secs(secs);
        }
        cfg
    }
}
