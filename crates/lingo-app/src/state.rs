use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use anyhow::Context;
use lingo_config::Config;
use lingo_core::{BuiltinCatalog, LogSpeech, TranslationController, TranslationFactory};
use lingo_types::TranslationRequest;

/// Most recent translation shown to the user, spoken by `:speak`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastTranslation {
    pub text: String,
    pub lang: String,
}

pub struct AppState {
    pub controller: TranslationController,
    last_translation: Mutex<Option<LastTranslation>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.network.request_timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        let factory = TranslationFactory::new(config, client);
        let controller = TranslationController::new(
            factory,
            Arc::new(BuiltinCatalog::new()),
            Arc::new(LogSpeech::new()),
        );

        Ok(Self {
            controller,
            last_translation: Mutex::new(None),
        })
    }

    /// Request for `text` with the current language, service and UI settings.
    /// Validation is left to the controller.
    pub fn request_for(&self, text: &str) -> TranslationRequest {
        let config = self.controller.config();
        TranslationRequest {
            text: text.trim().to_string(),
            source_lang: config.translator.source_lang,
            target_lang: config.translator.target_lang,
            service_id: config.translator.service,
            ui_language: config.ui.ui_language,
        }
    }

    pub fn remember(&self, text: &str, lang: &str) {
        *self
            .last_translation
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(LastTranslation {
            text: text.to_string(),
            lang: lang.to_string(),
        });
    }

    pub fn last_translation(&self) -> Option<LastTranslation> {
        self.last_translation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
