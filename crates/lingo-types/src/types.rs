use serde::{Deserialize, Serialize};

pub type LanguageCode = String;

/// Source language value that asks the backend to detect the language
pub const AUTO: &str = "auto";

/// UI language used when none is given
pub const DEFAULT_UI_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("Text must be a non-empty string")]
    EmptyText,

    #[error("Source and target languages are required")]
    MissingLanguage,

    #[error("Target language cannot be \"auto\"")]
    AutoTarget,
}

/// One translation asked for by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: LanguageCode,
    pub target_lang: LanguageCode,
    /// Raw provider id. Unknown ids are resolved to the default provider.
    pub service_id: String,
    #[serde(default = "default_ui_language")]
    pub ui_language: LanguageCode,
}

fn default_ui_language() -> String {
    DEFAULT_UI_LANGUAGE.to_string()
}

impl TranslationRequest {
    /// Build a request with trimmed text, checking the invariants up front
    pub fn new(
        text: &str,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        service_id: impl Into<String>,
    ) -> Result<Self, RequestError> {
        let request = Self {
            text: text.trim().to_string(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            service_id: service_id.into(),
            ui_language: default_ui_language(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn with_ui_language(mut self, ui_language: impl Into<String>) -> Self {
        self.ui_language = ui_language.into();
        self
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.text.trim().is_empty() {
            return Err(RequestError::EmptyText);
        }
        if self.source_lang.trim().is_empty() || self.target_lang.trim().is_empty() {
            return Err(RequestError::MissingLanguage);
        }
        if self.target_lang == AUTO {
            return Err(RequestError::AutoTarget);
        }
        Ok(())
    }

    pub fn is_auto_detect(&self) -> bool {
        self.source_lang == AUTO
    }
}

/// Normalized output of every provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub translation: String,
    pub src_phonetic: Option<String>,
    pub target_phonetic: Option<String>,
    pub detected_lang: Option<LanguageCode>,
    pub fallback_notice: Option<String>,
}

impl TranslationResult {
    pub fn new(translation: impl Into<String>) -> Self {
        Self {
            translation: translation.into(),
            ..Default::default()
        }
    }

    pub fn with_phonetics(
        mut self,
        src_phonetic: Option<String>,
        target_phonetic: Option<String>,
    ) -> Self {
        self.src_phonetic = src_phonetic;
        self.target_phonetic = target_phonetic;
        self
    }

    pub fn with_detected_lang(mut self, detected_lang: Option<String>) -> Self {
        self.detected_lang = detected_lang;
        self
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Text to translate, tagged with a request id
    TextInput {
        request_id: String,
        text: String,
    },
    ConfigUpdate {
        field: String,
        value: String,
    },
    Speak {
        text: String,
        lang: LanguageCode,
    },
    StopSpeech,
    ShowTranslation {
        request_id: String,
        result: TranslationResult,
    },
    ShowError {
        request_id: String,
        message: String,
    },
    Shutdown,
}
