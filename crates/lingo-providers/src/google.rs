use std::sync::Arc;

use async_trait::async_trait;
use lingo_phonetic::PhoneticService;
use lingo_translator::transport::error_from_response;
use lingo_translator::{
    ServiceId, TranslateError, TranslationResult, Translator, enrich_with_phonetics,
    validate_params,
};
use lingo_types::AUTO;
use serde_json::Value;

/// Anonymous client of the public web translation endpoint. Needs no key,
/// which is why it is both the default and the fallback provider.
#[derive(Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
    phonetics: Arc<PhoneticService>,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client, api_url: String, phonetics: Arc<PhoneticService>) -> Self {
        Self {
            client,
            api_url,
            phonetics,
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        _ui_language: &str,
    ) -> Result<TranslationResult, TranslateError> {
        validate_params(text, source_lang, target_lang)?;

        tracing::debug!("Google translate {source_lang} -> {target_lang}");
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
                ("dt", "rm"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, false).await);
        }

        let json: Value = response.json().await?;
        let result = parse_response(&json, source_lang)?;

        Ok(enrich_with_phonetics(result, text, source_lang, target_lang, &self.phonetics).await)
    }

    fn service_id(&self) -> ServiceId {
        ServiceId::Google
    }
}

/// The answer is a nested array: `data[0]` holds one entry per sentence,
/// `entry[0]` its translation, and a trailing entry carries the
/// transliterations at `[2]` (target) and `[3]` (source). `data[2]` is the
/// detected source language.
fn parse_response(data: &Value, source_lang: &str) -> Result<TranslationResult, TranslateError> {
    let entries = data
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Malformed("No translation segments in response".to_string()))?;

    let translation: String = entries
        .iter()
        .filter_map(|entry| entry.get(0).and_then(Value::as_str))
        .collect();

    let first_string_at = |index: usize| {
        entries
            .iter()
            .filter_map(|entry| entry.get(index).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .map(str::to_string)
    };

    let detected_lang = if source_lang == AUTO {
        data.get(2).and_then(Value::as_str).map(str::to_string)
    } else {
        None
    };

    Ok(TranslationResult::new(translation)
        .with_phonetics(first_string_at(3), first_string_at(2))
        .with_detected_lang(detected_lang))
}
