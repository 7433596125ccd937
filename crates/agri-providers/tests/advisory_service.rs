mod common;

use agri_providers::{fallback_response, AdviceSource, AdvisoryChat, AdvisoryService, GeminiAdvisoryClient, Language,
                     ProviderConfig, ProviderError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct FailingChat {
  calls: AtomicUsize,
}

#[async_trait::async_trait]
impl AdvisoryChat for FailingChat {
  async fn ask(&self, _question: &str, _language: Language) -> Result<String, ProviderError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Err(ProviderError::Api { status: 429, body: "quota".into() })
  }
}

struct EchoChat;

#[async_trait::async_trait]
impl AdvisoryChat for EchoChat {
  async fn ask(&self, question: &str, language: Language) -> Result<String, ProviderError> {
    Ok(format!("[{}] {}", language, question))
  }
}

#[tokio::test]
async fn model_failure_falls_back_to_canned_answer() {
  let chat = Arc::new(FailingChat { calls: AtomicUsize::new(0) });
  let service = AdvisoryService::new(chat.clone());
  let advice = service.advise("how to plant potato", Language::En).await.expect("advice");
  assert_eq!(advice.source, AdviceSource::Fallback);
  assert_eq!(advice.text, fallback_response("how to plant potato", Language::En));
  assert_eq!(chat.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn model_answer_is_returned_verbatim() {
  let service = AdvisoryService::new(Arc::new(EchoChat));
  let advice = service.advise("  sinchayee kab karein  ", Language::Hi).await.expect("advice");
  assert_eq!(advice.source, AdviceSource::Model);
  assert_eq!(advice.text, "[hi] sinchayee kab karein");
}

#[tokio::test]
async fn empty_question_is_rejected_before_any_call() {
  let chat = Arc::new(FailingChat { calls: AtomicUsize::new(0) });
  let service = AdvisoryService::new(chat.clone());
  assert!(matches!(service.advise("   ", Language::Or).await, Err(ProviderError::EmptyQuestion)));
  assert_eq!(chat.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn offline_service_without_api_key() {
  let service = AdvisoryService::from_config(&ProviderConfig::default());
  assert!(!service.is_online());
  let advice = service.advise("namaskar", Language::Or).await.expect("advice");
  assert_eq!(advice.source, AdviceSource::Fallback);
  assert!(advice.text.starts_with("ନମସ୍କାର"));
}

#[tokio::test]
async fn gemini_client_sends_generation_config_and_parses_candidates() {
  let body = r#"{"candidates":[{"content":{"parts":[{"text":"  Use drip irrigation.  "}]}}],"usageMetadata":{"totalTokenCount":42}}"#;
  let (base, handle) = common::serve_once("200 OK", body.to_string()).await;
  let cfg = ProviderConfig { gemini_api_key: Some("test-key".into()),
                             gemini_base_url: base,
                             ..ProviderConfig::default() };
  let client = GeminiAdvisoryClient::new(&cfg).expect("client");
  let answer = client.ask("water for onion", Language::En).await.expect("answer");
  assert_eq!(answer, "Use drip irrigation.");

  let request = handle.await.expect("server");
  assert!(request.starts_with("POST /gemini-2.0-flash:generateContent?key=test-key"));
  assert!(request.contains("\"maxOutputTokens\":200"));
  assert!(request.contains("\"topK\":20"));
  assert!(request.contains("Respond ONLY in English language"));
}

#[tokio::test]
async fn gemini_http_error_is_an_api_error() {
  let (base, handle) = common::serve_once("500 Internal Server Error", "{}".to_string()).await;
  let cfg = ProviderConfig { gemini_api_key: Some("k".into()),
                             gemini_base_url: base,
                             ..ProviderConfig::default() };
  let client = GeminiAdvisoryClient::new(&cfg).expect("client");
  match client.ask("crop", Language::Hi).await {
    Err(ProviderError::Api { status, .. }) => assert_eq!(status, 500),
    other => panic!("se esperaba Api error, fue {:?}", other),
  }
  handle.await.expect("server");
}

#[test]
fn client_requires_api_key() {
  assert!(matches!(GeminiAdvisoryClient::new(&ProviderConfig::default()), Err(ProviderError::Config(_))));
}
