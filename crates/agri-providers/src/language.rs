// Archivo: language.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Idiomas de la asesoría.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Hi,
    Or,
    #[default]
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Hi => "hi",
            Language::Or => "or",
            Language::En => "en",
        }
    }

    /// Nombre usado en el prompt del modelo.
    pub fn prompt_name(&self) -> &'static str {
        match self {
            Language::Hi => "Hindi (हिंदी)",
            Language::Or => "Odia (ଓଡ଼ିଆ)",
            Language::En => "English",
        }
    }

    /// Mensaje de bienvenida al abrir el chat o cambiar de idioma.
    pub fn welcome_message(&self) -> &'static str {
        match self {
            Language::Hi => "नमस्ते! मैं 20+ वर्ष के अनुभव के साथ आपका कृषि विशेषज्ञ हूँ। मुझसे फसल, मिट्टी, कीड़े, सिंचाई, खाद, या सब्सिडी के बारे में पूछिए। मैं 200 शब्दों में व्यावहारिक सलाह दूंगा।",
            Language::Or => "ନମସ୍କାର! ମୁଁ 20+ ବର୍ଷର ଅଭିଜ୍ଞତା ସହ ଆପଣଙ୍କ କୃଷି ବିଶେଷଜ୍ଞ। ମୋତେ ଫସଲ, ମାଟି, କୀଟପତଙ୍ଗ, ସିଙ୍ଚନ, ଖାଦ୍ୟ, କିମ୍ବା ସବସିଡି ବିଷୟରେ ପ୍ରଶ୍ନ କରନ୍ତୁ। ମୁଁ 200 ଶବ୍ଦରେ ବ୍ୟବହାରିକ ସଲାହ ଦେବି।",
            Language::En => "Hello! I'm your Agricultural Expert with 20+ years of farming experience. Ask me about crops, soil, pests, irrigation, fertilizers, or subsidies. I'll give you practical advice under 200 words.",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hi" | "hindi" => Ok(Language::Hi),
            "or" | "odia" | "oriya" => Ok(Language::Or),
            "en" | "english" => Ok(Language::En),
            other => Err(format!("idioma no soportado: {}", other)),
        }
    }
}
