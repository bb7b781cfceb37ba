use std::env;

use serde::{Deserialize, Serialize};

use self::network::NetworkConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;

pub mod network;
pub mod patch;
pub mod translator;
pub mod ui;

pub use patch::{ConfigError, ConfigPatch};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub network: NetworkConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Defaults overridden by process environment variables
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the known variables
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        config.apply_lookup(lookup);
        config
    }

    /// Override the fields whose variables `lookup` knows about
    pub fn apply_lookup(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        self.apply(ConfigPatch::from_lookup(&lookup));

        if let Some(raw) = lookup("REQUEST_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) => self.network.request_timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid REQUEST_TIMEOUT_SECS: {raw}"),
            }
        }

        if let Some(format) = lookup("LOG_FORMAT") {
            self.ui.json_logs = format.eq_ignore_ascii_case("json");
        }
    }

    /// Merge a partial update, leaving unset fields untouched
    pub fn apply(&mut self, patch: ConfigPatch) {
        let ConfigPatch {
            source_lang,
            target_lang,
            service,
            ui_language,
            gemini_api_key,
            openai_api_key,
            openai_proxy_url,
            openai_model,
            google_url,
            gemini_url,
            mymemory_url,
            dictionary_url,
        } = patch;

        let translator = &mut self.translator;
        merge(&mut translator.source_lang, source_lang);
        merge(&mut translator.target_lang, target_lang);
        merge(&mut translator.service, service);
        merge(&mut translator.gemini_api_key, gemini_api_key);
        merge(&mut translator.openai_api_key, openai_api_key);
        merge(&mut translator.openai_proxy_url, openai_proxy_url);
        merge(&mut translator.openai_model, openai_model);

        let network = &mut self.network;
        merge(&mut network.google_url, google_url);
        merge(&mut network.gemini_url, gemini_url);
        merge(&mut network.mymemory_url, mymemory_url);
        merge(&mut network.dictionary_url, dictionary_url);

        merge(&mut self.ui.ui_language, ui_language);
    }
}

fn merge(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}
