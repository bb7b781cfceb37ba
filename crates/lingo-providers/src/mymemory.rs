use std::sync::Arc;

use async_trait::async_trait;
use lingo_phonetic::PhoneticService;
use lingo_translator::transport::error_from_response;
use lingo_translator::{
    ServiceId, TranslateError, TranslationResult, Translator, enrich_with_phonetics,
    validate_params,
};
use lingo_types::AUTO;
use serde::Deserialize;
use serde_json::Value;

/// MyMemory cannot detect languages; `auto` is sent as English
const AUTO_SOURCE: &str = "en";

#[derive(Clone)]
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    api_url: String,
    phonetics: Arc<PhoneticService>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    #[serde(default)]
    response_status: Value,
    #[serde(default)]
    response_details: Option<String>,
    #[serde(default)]
    response_data: Option<ResponseData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
}

impl MyMemoryTranslator {
    pub fn new(client: reqwest::Client, api_url: String, phonetics: Arc<PhoneticService>) -> Self {
        Self {
            client,
            api_url,
            phonetics,
        }
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        _ui_language: &str,
    ) -> Result<TranslationResult, TranslateError> {
        validate_params(text, source_lang, target_lang)?;

        let actual_source = if source_lang == AUTO { AUTO_SOURCE } else { source_lang };
        let langpair = format!("{actual_source}|{target_lang}");

        tracing::debug!("MyMemory translate {langpair}");
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, false).await);
        }

        let body: MyMemoryResponse = response.json().await?;

        // The HTTP status is 200 even for failures, the body status is what counts
        let status = response_status(&body.response_status).unwrap_or(200);
        if status != 200 {
            let message = body
                .response_details
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| format!("MyMemory error {status}"));
            return Err(TranslateError::http(status, message, false));
        }

        let translation = body
            .response_data
            .and_then(|data| data.translated_text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| TranslateError::Malformed("No translatedText in response".to_string()))?;

        let result = TranslationResult::new(translation)
            .with_detected_lang((source_lang == AUTO).then(|| actual_source.to_string()));

        Ok(enrich_with_phonetics(result, text, actual_source, target_lang, &self.phonetics).await)
    }

    fn service_id(&self) -> ServiceId {
        ServiceId::MyMemory
    }
}

/// `responseStatus` arrives as a number or as a numeric string
fn response_status(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use lingo_translator::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::test_support::phonetics;

    fn translator(server: &MockServer) -> MyMemoryTranslator {
        MyMemoryTranslator::new(
            reqwest::Client::new(),
            format!("{}/get", server.uri()),
            phonetics(server),
        )
    }

    #[test]
    fn test_response_status_shapes() {
        assert_eq!(response_status(&json!(200)), Some(200));
        assert_eq!(response_status(&json!("403")), Some(403));
        assert_eq!(response_status(&json!(null)), None);
        assert_eq!(response_status(&json!("n/a")), None);
    }

    #[tokio::test]
    async fn test_auto_source_is_sent_as_english() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get"))
            .and(query_param("q", "good morning"))
            .and(query_param("langpair", "en|vi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseStatus": 200,
                "responseData": { "translatedText": "chào buổi sáng" }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/entries/en/good"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "phonetics": [{ "text": "/ɡʊd/" }] }])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/entries/en/morning"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "phonetics": [{ "text": "/ˈmɔːnɪŋ/" }] }])),
            )
            .mount(&server)
            .await;

        let result = translator(&server)
            .translate("good morning", "auto", "vi", "en")
            .await
            .unwrap();

        assert_eq!(result.translation, "chào buổi sáng");
        assert_eq!(result.detected_lang.as_deref(), Some("en"));
        assert_eq!(result.src_phonetic.as_deref(), Some("ɡʊd ˈmɔːnɪŋ"));
        assert_eq!(result.target_phonetic, None);
    }

    #[tokio::test]
    async fn test_string_status_error() {
        let server = MockServer::start().await;
        Mock::given(path("/get"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseStatus": "429",
                "responseDetails": "YOU USED ALL AVAILABLE FREE TRANSLATIONS FOR TODAY",
                "responseData": { "translatedText": "YOU USED ALL AVAILABLE FREE TRANSLATIONS FOR TODAY" }
            })))
            .mount(&server)
            .await;

        let error = translator(&server)
            .translate("bonjour", "fr", "vi", "en")
            .await
            .unwrap_err();

        assert_eq!(error.classification().kind, ErrorKind::RateLimit);
        assert_eq!(
            error.detail(),
            Some("YOU USED ALL AVAILABLE FREE TRANSLATIONS FOR TODAY")
        );
    }

    #[tokio::test]
    async fn test_missing_translation_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(path("/get"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "responseStatus": 200 })),
            )
            .mount(&server)
            .await;

        let error = translator(&server)
            .translate("bonjour", "fr", "vi", "en")
            .await
            .unwrap_err();

        assert!(matches!(error, TranslateError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_http_failure() {
        let server = MockServer::start().await;
        Mock::given(path("/get"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let error = translator(&server)
            .translate("bonjour", "fr", "vi", "en")
            .await
            .unwrap_err();

        assert_eq!(error.classification().kind, ErrorKind::ServerError);
    }
}
