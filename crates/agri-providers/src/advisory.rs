//! Asesoría agrícola por chat.
//!
//! `AdvisoryChat` es la costura hacia el modelo de lenguaje;
//! `GeminiAdvisoryClient` la implementa contra `generateContent`. El
//! `AdvisoryService` nunca deja al usuario sin respuesta: si el modelo falla
//! (red, cuota, respuesta vacía) devuelve la respuesta local del idioma.

use crate::config::ProviderConfig;
use crate::errors::{ProviderError, Result};
use crate::fallback::fallback_response;
use crate::language::Language;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[async_trait::async_trait]
pub trait AdvisoryChat: Send + Sync {
    /// Pregunta al modelo. Un `Err` activa la respuesta local.
    async fn ask(&self, question: &str, language: Language) -> Result<String>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
    candidate_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    total_token_count: Option<u32>,
}

/// Prompt del experto agrícola: idioma estricto, máximo 200 palabras y
/// texto plano.
pub fn build_prompt(question: &str, language: Language) -> String {
    let lang = language.prompt_name();
    format!("You are a highly experienced Agricultural Expert with 20+ years of farming expertise.\n\n\
             STRICT REQUIREMENTS:\n\
             - Respond ONLY in {lang} language\n\
             - Maximum 200 words response DON'T SAY THIS IN YOUR RESPONSE\n\
             - Provide ONLY practical, actionable advice\n\
             - Use simple, farmer-friendly language\n\
             - Be specific and accurate\n\
             - Focus on immediate solutions\n\
             - Don't use asterisk or other special characters and don't make any response bold\n\
             - Don't use any emojis or special characters\n\
             - If user asks in Hinglish, respond in {lang}\n\n\
             User Question: {question}\n\n\
             As an expert, give concise advice in {lang} on: crop cultivation, soil management, pest control, \
             irrigation, fertilizers, government schemes, or farming techniques. Provide direct answers farmers \
             can implement today.")
}

#[derive(Debug, Clone)]
pub struct GeminiAdvisoryClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiAdvisoryClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_key = config.gemini_api_key
                            .clone()
                            .ok_or_else(|| ProviderError::Config("GEMINI_API_KEY no definido".into()))?;
        let client = Client::builder().timeout(config.timeout)
                                      .user_agent(config.user_agent.clone())
                                      .build()?;
        Ok(Self { client,
                  api_key,
                  model: config.gemini_model.clone(),
                  base_url: config.gemini_base_url.clone() })
    }
}

#[async_trait::async_trait]
impl AdvisoryChat for GeminiAdvisoryClient {
    async fn ask(&self, question: &str, language: Language) -> Result<String> {
        let body = GeminiRequest { contents: vec![GeminiContent { parts: vec![GeminiPart { text: build_prompt(question, language) }] }],
                                   generation_config: GeminiGenerationConfig { temperature: 0.3,
                                                                               top_k: 20,
                                                                               top_p: 0.8,
                                                                               max_output_tokens: 200,
                                                                               candidate_count: 1 } };
        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        debug!("gemini: POST {} (lang={})", url, language);

        let response = self.client
                           .post(&url)
                           .query(&[("key", self.api_key.as_str())])
                           .json(&body)
                           .send()
                           .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            error!("gemini: HTTP {}", status);
            return Err(ProviderError::Api { status: status.as_u16(), body: text });
        }

        let parsed: GeminiResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::InvalidResponse(format!("json: {}", e)))?;
        if let Some(usage) = &parsed.usage_metadata {
            debug!("gemini: tokens totales {:?}", usage.total_token_count);
        }
        let answer = parsed.candidates
                           .into_iter()
                           .filter_map(|c| c.content)
                           .flat_map(|c| c.parts)
                           .map(|p| p.text)
                           .find(|t| !t.trim().is_empty())
                           .ok_or_else(|| ProviderError::InvalidResponse("sin candidatos con texto".into()))?;
        Ok(answer.trim().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceSource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advice {
    pub text: String,
    pub source: AdviceSource,
}

/// Fachada de asesoría con respuesta local garantizada.
#[derive(Clone)]
pub struct AdvisoryService {
    chat: Option<Arc<dyn AdvisoryChat>>,
}

impl AdvisoryService {
    pub fn new(chat: Arc<dyn AdvisoryChat>) -> Self {
        Self { chat: Some(chat) }
    }

    /// Sin modelo: todas las respuestas son locales.
    pub fn offline() -> Self {
        Self { chat: None }
    }

    /// Usa Gemini si hay clave configurada; si no, queda en modo local.
    pub fn from_config(config: &ProviderConfig) -> Self {
        match GeminiAdvisoryClient::new(config) {
            Ok(client) => Self::new(Arc::new(client)),
            Err(e) => {
                info!("asesoría en modo local: {}", e);
                Self::offline()
            }
        }
    }

    pub fn is_online(&self) -> bool {
        self.chat.is_some()
    }

    /// Solo falla con una pregunta vacía; cualquier error del modelo se
    /// registra y se sustituye por la respuesta local.
    pub async fn advise(&self, question: &str, language: Language) -> Result<Advice> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ProviderError::EmptyQuestion);
        }
        if let Some(chat) = &self.chat {
            match chat.ask(question, language).await {
                Ok(text) => return Ok(Advice { text, source: AdviceSource::Model }),
                Err(e) => warn!("asesoría: modelo no disponible, respuesta local ({})", e),
            }
        }
        Ok(Advice { text: fallback_response(question, language).to_string(),
                    source: AdviceSource::Fallback })
    }
}
