use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown config field: {0}")]
    UnknownField(String),
}

/// Partial configuration update. `None` leaves the stored value as is.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub service: Option<String>,
    pub ui_language: Option<String>,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_proxy_url: Option<String>,
    pub openai_model: Option<String>,
    pub google_url: Option<String>,
    pub gemini_url: Option<String>,
    pub mymemory_url: Option<String>,
    pub dictionary_url: Option<String>,
}

impl ConfigPatch {
    /// Read the environment-style variable names
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            source_lang: lookup("LINGO_SOURCE_LANG"),
            target_lang: lookup("LINGO_TARGET_LANG"),
            service: lookup("LINGO_SERVICE"),
            ui_language: lookup("LINGO_UI_LANGUAGE"),
            gemini_api_key: lookup("GEMINI_API_KEY"),
            openai_api_key: lookup("OPENAI_API_KEY"),
            openai_proxy_url: lookup("OPENAI_PROXY_URL"),
            openai_model: lookup("OPENAI_MODEL"),
            google_url: lookup("GOOGLE_TRANSLATE_URL"),
            gemini_url: lookup("GEMINI_URL"),
            mymemory_url: lookup("MYMEMORY_URL"),
            dictionary_url: lookup("DICTIONARY_URL"),
        }
    }

    /// Patch touching a single field, addressed by name.
    /// Accepts snake_case field names and their environment variable names.
    pub fn field(name: &str, value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = Some(value.into());
        let mut patch = Self::default();
        match name.trim().to_ascii_lowercase().as_str() {
            "source_lang" | "from" | "lingo_source_lang" => patch.source_lang = value,
            "target_lang" | "to" | "lingo_target_lang" => patch.target_lang = value,
            "service" | "lingo_service" => patch.service = value,
            "ui_language" | "lingo_ui_language" => patch.ui_language = value,
            "gemini_api_key" => patch.gemini_api_key = value,
            "openai_api_key" => patch.openai_api_key = value,
            "openai_proxy_url" | "gemini_proxy_url" => patch.openai_proxy_url = value,
            "openai_model" => patch.openai_model = value,
            "google_url" | "google_translate_url" => patch.google_url = value,
            "gemini_url" => patch.gemini_url = value,
            "mymemory_url" => patch.mymemory_url = value,
            "dictionary_url" => patch.dictionary_url = value,
            _ => return Err(ConfigError::UnknownField(name.to_string())),
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
