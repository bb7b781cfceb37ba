use std::sync::Arc;

use async_trait::async_trait;
use lingo_phonetic::PhoneticService;
use lingo_translator::prompt::{build_prompt, parse_llm_output};
use lingo_translator::transport::error_from_parts;
use lingo_translator::{
    ErrorKind, FetchOptions, ProxyFetch, ProxyResponse, ServiceId, TranslateError,
    TranslationResult, Translator, enrich_with_phonetics, validate_params,
};
use serde_json::{Value, json};

const TEMPERATURE: f64 = 0.3;

/// Translator for any OpenAI-compatible chat completions endpoint, usually a
/// local proxy. Requests go through [`ProxyFetch`].
#[derive(Clone)]
pub struct OpenAiTranslator {
    proxy: Arc<dyn ProxyFetch>,
    api_key: String,
    api_url: String,
    model: String,
    phonetics: Arc<PhoneticService>,
}

impl OpenAiTranslator {
    pub fn new(
        proxy: Arc<dyn ProxyFetch>,
        api_key: String,
        api_url: String,
        model: String,
        phonetics: Arc<PhoneticService>,
    ) -> Self {
        Self {
            proxy,
            api_key,
            api_url,
            model,
            phonetics,
        }
    }

    fn key_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        _ui_language: &str,
    ) -> Result<TranslationResult, TranslateError> {
        validate_params(text, source_lang, target_lang)?;

        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": build_prompt(text, source_lang, target_lang) }],
            "temperature": TEMPERATURE,
        });
        let mut options = FetchOptions::post_json(body);
        if self.key_configured() {
            options = options.header("Authorization", format!("Bearer {}", self.api_key));
        }

        tracing::debug!("OpenAI-compatible translate {source_lang} -> {target_lang} ({})", self.model);
        let response = self.proxy.proxy_fetch(&self.api_url, options).await;
        let data = check_response(response, self.key_configured())?;

        let content = extract_content(&data)
            .ok_or_else(|| TranslateError::Malformed("No message content in response".to_string()))?;

        let parsed = parse_llm_output(content);
        let result = TranslationResult::new(parsed.translation)
            .with_phonetics(Some(parsed.source_phonetic), Some(parsed.target_phonetic));

        Ok(enrich_with_phonetics(result, text, source_lang, target_lang, &self.phonetics).await)
    }

    fn service_id(&self) -> ServiceId {
        ServiceId::OpenAi
    }
}

/// Turn the proxy envelope into the response body or a classifiable error.
/// Some proxies answer 200 with an `error` object, so the body is checked too.
fn check_response(response: ProxyResponse, key_configured: bool) -> Result<Value, TranslateError> {
    if !response.error {
        let data = response.data.unwrap_or(Value::Null);
        if data.get("error").is_some_and(|e| !e.is_null()) {
            let status = data["error"]["code"]
                .as_u64()
                .and_then(|code| u16::try_from(code).ok())
                .or(response.status)
                .unwrap_or(200);
            return Err(body_error(status, &data, key_configured));
        }
        return Ok(data);
    }

    let message = response.message.unwrap_or_default();
    match (response.status, response.data) {
        (None, _) => Err(TranslateError::Network(message)),
        (Some(status), None) if (200..300).contains(&status) => {
            Err(TranslateError::NonJson(message))
        }
        (Some(status), Some(data)) => Err(body_error(status, &data, key_configured)),
        (Some(status), None) => {
            let error = TranslateError::http(status, message, key_configured);
            Err(match_patterns(&error, key_configured).unwrap_or(error))
        }
    }
}

fn body_error(status: u16, data: &Value, key_configured: bool) -> TranslateError {
    let mut error = error_from_parts(status, Some(data), key_configured);
    // Proxies sometimes flatten the provider error into a plain string
    if let (TranslateError::Http { message, .. }, Some(flat)) = (&mut error, data["error"].as_str()) {
        *message = flat.to_string();
    }
    match_patterns(&error, key_configured).unwrap_or(error)
}

/// Provider messages relayed by the proxy are recognized by pattern, since
/// the proxy's own status does not always reflect the upstream failure
fn match_patterns(error: &TranslateError, key_configured: bool) -> Option<TranslateError> {
    let TranslateError::Http { message, code, .. } = error else {
        return None;
    };
    let haystack = format!("{message} {}", code.as_deref().unwrap_or_default()).to_lowercase();

    let kind = if haystack.contains("unauthenticated")
        || haystack.contains("api key")
        || haystack.contains("api_key")
    {
        if key_configured {
            ErrorKind::ApiKeyInvalid
        } else {
            ErrorKind::ApiKeyMissing
        }
    } else if haystack.contains("quota") {
        ErrorKind::QuotaExceeded
    } else if haystack.contains("rate limit")
        || haystack.contains("resource exhausted")
        || haystack.contains("resource_exhausted")
    {
        ErrorKind::RateLimit
    } else {
        return None;
    };

    Some(TranslateError::Provider {
        kind,
        message: message.clone(),
    })
}

/// Chat completions shape first, then the Gemini shape some proxies relay as is
fn extract_content(data: &Value) -> Option<&str> {
    data["choices"][0]["message"]["content"]
        .as_str()
        .or_else(|| data["candidates"][0]["content"]["parts"][0]["text"].as_str())
}
