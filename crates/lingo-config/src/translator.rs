use serde::{Deserialize, Serialize};

fn default_source_lang() -> String {
    "auto".to_string()
}

fn default_target_lang() -> String {
    "vi".to_string()
}

fn default_service() -> String {
    "google".to_string()
}

fn default_openai_proxy_url() -> String {
    "http://localhost:8045/v1/chat/completions".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Active provider id
    #[serde(default = "default_service")]
    pub service: String,
    #[serde(default)]
    pub gemini_api_key: String,
    /// Optional bearer token for the OpenAI-compatible endpoint
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default = "default_openai_proxy_url")]
    pub openai_proxy_url: String,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            service: default_service(),
            gemini_api_key: String::new(),
            openai_api_key: String::new(),
            openai_proxy_url: default_openai_proxy_url(),
            openai_model: default_openai_model(),
        }
    }
}
