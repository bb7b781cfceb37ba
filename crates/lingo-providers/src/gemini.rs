use std::sync::Arc;

use async_trait::async_trait;
use lingo_phonetic::PhoneticService;
use lingo_translator::prompt::{build_prompt, parse_llm_output};
use lingo_translator::transport::error_from_response;
use lingo_translator::{
    ServiceId, TranslateError, TranslationResult, Translator, enrich_with_phonetics,
    validate_params,
};
use serde_json::{Value, json};

/// Cloud LLM translator speaking the `generateContent` protocol
#[derive(Clone)]
pub struct GeminiTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    phonetics: Arc<PhoneticService>,
}

impl GeminiTranslator {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        api_url: String,
        phonetics: Arc<PhoneticService>,
    ) -> Self {
        Self {
            client,
            api_key,
            api_url,
            phonetics,
        }
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        _ui_language: &str,
    ) -> Result<TranslationResult, TranslateError> {
        validate_params(text, source_lang, target_lang)?;

        if self.api_key.trim().is_empty() {
            return Err(TranslateError::ApiKeyMissing);
        }

        let body = json!({
            "contents": [{ "parts": [{ "text": build_prompt(text, source_lang, target_lang) }] }]
        });

        tracing::debug!("Gemini translate {source_lang} -> {target_lang}");
        let response = self
            .client
            .post(&self.api_url)
            .header("X-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, true).await);
        }

        let json: Value = response.json().await?;
        let content = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                let reason = json["promptFeedback"]["blockReason"]
                    .as_str()
                    .unwrap_or("no candidates");
                TranslateError::Malformed(format!("Empty model response: {reason}"))
            })?;

        let parsed = parse_llm_output(content);
        let result = TranslationResult::new(parsed.translation)
            .with_phonetics(Some(parsed.source_phonetic), Some(parsed.target_phonetic));

        Ok(enrich_with_phonetics(result, text, source_lang, target_lang, &self.phonetics).await)
    }

    fn service_id(&self) -> ServiceId {
        ServiceId::Gemini
    }
}

#[cfg(test)]
mod tests {
    use lingo_translator::ErrorKind;
    use wiremock::matchers::{header, method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::test_support::phonetics;

    const MODEL_PATH: &str = "/v1beta/models/gemini:generateContent";

    fn translator(server: &MockServer, key: &str) -> GeminiTranslator {
        GeminiTranslator::new(
            reqwest::Client::new(),
            key.to_string(),
            format!("{}{MODEL_PATH}", server.uri()),
            phonetics(server),
        )
    }

    fn answer(text: &str) -> Value {
        json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
    }

    #[tokio::test]
    async fn test_fenced_json_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header("X-goog-api-key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer(
                "```json\n{\"translation\":\"Cảm ơn\",\"sourcePhonetic\":\"arigatou\",\"targetPhonetic\":\"\"}\n```",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let result = translator(&server, "secret")
            .translate("ありがとう", "ja", "vi", "en")
            .await
            .unwrap();

        assert_eq!(result.translation, "Cảm ơn");
        assert_eq!(result.src_phonetic.as_deref(), Some("arigatou"));
        assert_eq!(result.target_phonetic, None);
    }

    #[tokio::test]
    async fn test_plain_text_answer_degrades() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("Xin chào")))
            .mount(&server)
            .await;

        let result = translator(&server, "secret")
            .translate("hello", "en", "vi", "en")
            .await
            .unwrap();

        assert_eq!(result.translation, "Xin chào");
        assert_eq!(result.target_phonetic, None);
    }

    #[tokio::test]
    async fn test_missing_key_skips_network() {
        let server = MockServer::start().await;
        Mock::given(path_regex(".*"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let error = translator(&server, "")
            .translate("hello", "en", "vi", "en")
            .await
            .unwrap_err();

        assert_eq!(error, TranslateError::ApiKeyMissing);
        assert!(!error.classification().should_fallback);
    }

    #[tokio::test]
    async fn test_invalid_key_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT"
                }
            })))
            .mount(&server)
            .await;

        let error = translator(&server, "bad")
            .translate("hello", "en", "vi", "en")
            .await
            .unwrap_err();

        assert_eq!(error.classification().kind, ErrorKind::ApiKeyInvalid);
    }

    #[tokio::test]
    async fn test_quota_exceeded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "message": "Quota exceeded for quota metric 'Generate Content'" }
            })))
            .mount(&server)
            .await;

        let error = translator(&server, "secret")
            .translate("hello", "en", "vi", "en")
            .await
            .unwrap_err();

        assert_eq!(error.classification().kind, ErrorKind::QuotaExceeded);
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "promptFeedback": { "blockReason": "SAFETY" } })),
            )
            .mount(&server)
            .await;

        let error = translator(&server, "secret")
            .translate("hello", "en", "vi", "en")
            .await
            .unwrap_err();

        assert_eq!(
            error,
            TranslateError::Malformed("Empty model response: SAFETY".to_string())
        );
    }
}
