use std::sync::Arc;

use lingo_config::{Config, ConfigPatch};
use lingo_translator::{ErrorClassification, ErrorKind, ServiceId, TranslateError};
use lingo_types::{RequestError, TranslationRequest, TranslationResult};

use crate::factory::TranslationFactory;
use crate::generation::{RequestGeneration, RequestTicket};
use crate::locale::MessageCatalog;
use crate::speech::{SpeechSynthesizer, Utterance};

/// Failure of a translation request. [`ControllerError::message`] is
/// localized and always safe to show to the user.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("{message}")]
    InvalidRequest { message: String, source: RequestError },

    /// The provider failed in a way another provider cannot fix
    #[error("{message}")]
    Rejected {
        classification: ErrorClassification,
        message: String,
        source: TranslateError,
    },

    #[error("{message}")]
    AllServicesFailed {
        message: String,
        original: TranslateError,
        #[source]
        fallback: TranslateError,
    },
}

impl ControllerError {
    pub fn message(&self) -> &str {
        match self {
            ControllerError::InvalidRequest { message, .. }
            | ControllerError::Rejected { message, .. }
            | ControllerError::AllServicesFailed { message, .. } => message,
        }
    }

    /// Classification of the primary failure, `None` for invalid requests
    pub fn classification(&self) -> Option<ErrorClassification> {
        match self {
            ControllerError::InvalidRequest { .. } => None,
            ControllerError::Rejected { classification, .. } => Some(*classification),
            ControllerError::AllServicesFailed { original, .. } => Some(original.classification()),
        }
    }
}

/// Runs translation requests against the configured providers, with a single
/// fallback hop to the default provider for recoverable failures
pub struct TranslationController {
    factory: TranslationFactory,
    catalog: Arc<dyn MessageCatalog>,
    speech: Arc<dyn SpeechSynthesizer>,
    generation: RequestGeneration,
}

impl TranslationController {
    pub fn new(
        factory: TranslationFactory,
        catalog: Arc<dyn MessageCatalog>,
        speech: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            factory,
            catalog,
            speech,
            generation: RequestGeneration::new(),
        }
    }

    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, ControllerError> {
        let ui = request.ui_language.as_str();
        if let Err(source) = request.validate() {
            return Err(ControllerError::InvalidRequest {
                message: self.catalog.invalid_request(ui),
                source,
            });
        }

        let text = request.text.trim();
        let translator = self.factory.get_translator(&request.service_id);
        let primary = translator.service_id();

        let error = match translator
            .translate(text, &request.source_lang, &request.target_lang, ui)
            .await
        {
            Ok(result) => return Ok(result),
            Err(error) => error,
        };

        let classification = error.classification();
        let message = self.describe(&error, ui);
        if !classification.should_fallback {
            tracing::warn!("{primary} rejected the request ({:?}): {error}", classification.kind);
            return Err(ControllerError::Rejected {
                classification,
                message,
                source: error,
            });
        }

        tracing::warn!("{primary} failed ({:?}): {error}, falling back to {}", classification.kind, ServiceId::DEFAULT);
        let fallback = self.factory.get_translator(ServiceId::DEFAULT.as_str());
        match fallback
            .translate(text, &request.source_lang, &request.target_lang, ui)
            .await
        {
            Ok(mut result) => {
                result.fallback_notice = Some(self.catalog.fallback_notice(ui, &message));
                Ok(result)
            }
            Err(fallback_error) => {
                tracing::error!("Fallback to {} failed: {fallback_error}", ServiceId::DEFAULT);
                Err(ControllerError::AllServicesFailed {
                    message: self.catalog.all_failed(ui),
                    original: error,
                    fallback: fallback_error,
                })
            }
        }
    }

    /// Localized display string for a provider error
    fn describe(&self, error: &TranslateError, ui: &str) -> String {
        let kind = error.classification().kind;
        let message = self.catalog.error_message(kind, ui);
        match (kind, error.detail()) {
            (ErrorKind::Unknown, Some(detail)) => format!("{message}: {detail}"),
            _ => message,
        }
    }

    /// Apply a settings change. Cached adapters are rebuilt on next use.
    pub fn update_config(&self, patch: ConfigPatch) {
        self.factory.update_config(patch);
    }

    pub fn config(&self) -> Config {
        self.factory.config()
    }

    pub fn factory(&self) -> &TranslationFactory {
        &self.factory
    }

    pub fn catalog(&self) -> &dyn MessageCatalog {
        self.catalog.as_ref()
    }

    /// Speak `text`, interrupting anything already being spoken
    pub fn speak(&self, text: &str, lang: &str) {
        self.speech.stop();
        self.speech.speak(Utterance::new(text, lang));
    }

    pub fn stop_speech(&self) {
        self.speech.stop();
    }

    pub fn begin_request(&self) -> RequestTicket {
        self.generation.begin_request()
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.generation.is_current(ticket)
    }
}

#[cfg(test)]
mod tests {
    use lingo_config::network::NetworkConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::locale::BuiltinCatalog;
    use crate::speech::LogSpeech;

    const GOOGLE: &str = "/translate_a/single";
    const GEMINI: &str = "/v1beta/models/gemini:generateContent";

    fn controller(server: &MockServer, speech: Arc<LogSpeech>) -> TranslationController {
        let mut config = Config {
            network: NetworkConfig::with_base_url(&server.uri()),
            ..Config::default()
        };
        config.translator.gemini_api_key = "secret".to_string();
        config.translator.openai_proxy_url = format!("{}/v1/chat/completions", server.uri());

        TranslationController::new(
            TranslationFactory::new(config, reqwest::Client::new()),
            Arc::new(BuiltinCatalog::new()),
            speech,
        )
    }

    fn request(service: &str) -> TranslationRequest {
        TranslationRequest::new("hello", "auto", "vi", service).unwrap()
    }

    async fn mount_google_ok(server: &MockServer, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path(GOOGLE))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                [["xin chào", "hello", null, null, 10]],
                null,
                "en"
            ])))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    async fn mount_gemini_error(server: &MockServer, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path(GEMINI))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(json!({ "error": { "code": status, "message": message } })),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_primary_success() {
        let server = MockServer::start().await;
        mount_google_ok(&server, 1).await;
        let controller = controller(&server, Arc::new(LogSpeech::new()));

        let result = controller.translate(&request("google")).await.unwrap();
        assert_eq!(result.translation, "xin chào");
        assert_eq!(result.detected_lang.as_deref(), Some("en"));
        assert_eq!(result.fallback_notice, None);
    }

    #[tokio::test]
    async fn test_invalid_key_is_not_retried() {
        let server = MockServer::start().await;
        mount_gemini_error(&server, 401, "API key not valid").await;
        mount_google_ok(&server, 0).await;
        let controller = controller(&server, Arc::new(LogSpeech::new()));

        let error = controller.translate(&request("gemini")).await.unwrap_err();
        let classification = error.classification().unwrap();
        assert_eq!(classification.kind, ErrorKind::ApiKeyInvalid);
        assert!(!classification.should_fallback);
        assert!(matches!(error, ControllerError::Rejected { .. }));
        assert_eq!(
            error.message(),
            "❌ API Key is invalid. Please check your settings."
        );
    }

    #[tokio::test]
    async fn test_server_error_falls_back_with_notice() {
        let server = MockServer::start().await;
        mount_gemini_error(&server, 500, "Internal error").await;
        mount_google_ok(&server, 1).await;
        let controller = controller(&server, Arc::new(LogSpeech::new()));

        let result = controller.translate(&request("gemini")).await.unwrap();
        assert_eq!(result.translation, "xin chào");
        let notice = result.fallback_notice.unwrap();
        assert!(notice.contains("🔧 Service error. Please try again later."));
        assert!(notice.contains("Switched to Google Translate"));
    }

    #[tokio::test]
    async fn test_unknown_error_notice_keeps_provider_detail() {
        let server = MockServer::start().await;
        mount_gemini_error(&server, 400, "Invalid value at 'contents'").await;
        mount_google_ok(&server, 1).await;
        let controller = controller(&server, Arc::new(LogSpeech::new()));

        let request = request("gemini").with_ui_language("vi");
        let result = controller.translate(&request).await.unwrap();
        let notice = result.fallback_notice.unwrap();
        assert!(notice.starts_with("⚠️ Lỗi API: ❌ Lỗi không xác định.: Invalid value at 'contents'"));
    }

    #[tokio::test]
    async fn test_all_services_failed() {
        let server = MockServer::start().await;
        mount_gemini_error(&server, 503, "overloaded").await;
        Mock::given(path(GOOGLE))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        let controller = controller(&server, Arc::new(LogSpeech::new()));

        let error = controller.translate(&request("gemini")).await.unwrap_err();
        match &error {
            ControllerError::AllServicesFailed {
                original, fallback, ..
            } => {
                assert!(matches!(original, TranslateError::Http { status: 503, .. }));
                assert!(matches!(fallback, TranslateError::Http { status: 500, .. }));
            }
            other => panic!("Unexpected error: {other:?}"),
        }
        assert_eq!(
            error.message(),
            "❌ All translation services failed. Please try again."
        );
        assert_eq!(error.classification().unwrap().kind, ErrorKind::ServerError);
    }

    #[tokio::test]
    async fn test_default_provider_gets_one_retry() {
        let server = MockServer::start().await;
        Mock::given(path(GOOGLE))
            .respond_with(ResponseTemplate::new(429))
            .expect(2)
            .mount(&server)
            .await;
        let controller = controller(&server, Arc::new(LogSpeech::new()));

        let error = controller.translate(&request("google")).await.unwrap_err();
        assert!(matches!(error, ControllerError::AllServicesFailed { .. }));
    }

    #[tokio::test]
    async fn test_invalid_request_never_hits_network() {
        let server = MockServer::start().await;
        Mock::given(path_regex(".*"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let controller = controller(&server, Arc::new(LogSpeech::new()));

        let mut request = request("google");
        request.target_lang = "auto".to_string();
        let error = controller.translate(&request).await.unwrap_err();
        assert!(matches!(
            error,
            ControllerError::InvalidRequest {
                source: RequestError::AutoTarget,
                ..
            }
        ));
        assert_eq!(error.classification(), None);
    }

    #[tokio::test]
    async fn test_missing_key_after_config_update() {
        let server = MockServer::start().await;
        mount_google_ok(&server, 0).await;
        let controller = controller(&server, Arc::new(LogSpeech::new()));

        controller.update_config(ConfigPatch {
            gemini_api_key: Some(String::new()),
            ..Default::default()
        });
        let error = controller.translate(&request("gemini")).await.unwrap_err();
        assert_eq!(error.classification().unwrap().kind, ErrorKind::ApiKeyMissing);
        assert_eq!(error.message(), "🔑 API Key is missing. Please check your settings.");
    }

    #[tokio::test]
    async fn test_speech_delegates() {
        let server = MockServer::start().await;
        let speech = Arc::new(LogSpeech::new());
        let controller = controller(&server, speech.clone());

        controller.speak("xin chào", "vi");
        let utterance = speech.current().unwrap();
        assert_eq!(utterance.lang, "vi");
        assert_eq!(utterance.rate, 0.9);

        controller.stop_speech();
        assert_eq!(speech.current(), None);
    }

    #[test]
    fn test_request_tickets() {
        let server_uri = "http://127.0.0.1:9";
        let config = Config {
            network: NetworkConfig::with_base_url(server_uri),
            ..Config::default()
        };
        let controller = TranslationController::new(
            TranslationFactory::new(config, reqwest::Client::new()),
            Arc::new(BuiltinCatalog::new()),
            Arc::new(LogSpeech::new()),
        );

        let older = controller.begin_request();
        let newer = controller.begin_request();
        assert!(!controller.is_current(&older));
        assert!(controller.is_current(&newer));
    }
}
