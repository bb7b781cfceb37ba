//! Prompt construction and output parsing shared by the LLM-backed providers.

use lingo_types::{AUTO, language_name};
use serde::Deserialize;

/// What a model answered, after fence stripping and JSON parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmTranslation {
    pub translation: String,
    pub source_phonetic: String,
    pub target_phonetic: String,
    /// The answer was not the requested JSON object and was taken verbatim
    pub degraded: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Payload {
    translation: String,
    #[serde(default)]
    source_phonetic: Option<String>,
    #[serde(default)]
    target_phonetic: Option<String>,
}

fn prompt_language_name(code: &str) -> &str {
    if code == AUTO {
        "the source language"
    } else {
        language_name(code)
    }
}

/// Build the single free-text prompt sent to a model
pub fn build_prompt(text: &str, source_lang: &str, target_lang: &str) -> String {
    let source = prompt_language_name(source_lang);
    let target = prompt_language_name(target_lang);

    format!(
        r#"You are a professional translator. Translate the text between the triple quotes from {source} to {target}.

Adapt to the kind of content:
- A single word: give its most common meaning in {target}, and if it has several common meanings list the main ones separated by commas.
- A sentence: translate naturally, as a native {target} speaker would say it.
- A paragraph: keep the paragraph structure and line breaks.
- Idioms and slang: use an equivalent {target} expression instead of a literal translation.

Respond with exactly one JSON object and nothing else, with exactly these three fields:
{{"translation": "<the translation>", "sourcePhonetic": "<IPA or romanized pronunciation of the original text, or empty string>", "targetPhonetic": "<IPA or romanized pronunciation of the translation, or empty string>"}}

Text:
"""
{text}
""""#
    )
}

/// Remove a surrounding markdown code fence, with or without a language tag.
///
/// Text after the opening fence is an info string only when it is a single
/// word ending the line. `json` directly followed by `{` is also a tag.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let content = match rest.split_once('\n') {
        Some((info, body)) if !info.trim().contains(char::is_whitespace) => body,
        Some(_) => rest,
        None => match rest.strip_prefix("json") {
            Some(body) if body.trim_start().starts_with('{') => body,
            _ => rest,
        },
    };
    content.strip_suffix("```").unwrap_or(content).trim()
}

/// Parse a model answer. Never fails: anything that is not the expected JSON
/// object becomes the translation itself, with empty phonetics.
pub fn parse_llm_output(raw: &str) -> LlmTranslation {
    let body = strip_code_fences(raw);

    match serde_json::from_str::<Payload>(body) {
        Ok(payload) => LlmTranslation {
            translation: payload.translation,
            source_phonetic: payload.source_phonetic.unwrap_or_default(),
            target_phonetic: payload.target_phonetic.unwrap_or_default(),
            degraded: false,
        },
        Err(e) => {
            // Successful but unparseable answers still count as a translation
            tracing::warn!("Model output is not the expected JSON ({e}), using raw text");
            LlmTranslation {
                translation: body.to_string(),
                source_phonetic: String::new(),
                target_phonetic: String::new(),
                degraded: true,
            }
        }
    }
}
