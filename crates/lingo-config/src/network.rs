use serde::{Deserialize, Serialize};

fn default_google_url() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-lite:generateContent"
        .to_string()
}

fn default_mymemory_url() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

fn default_dictionary_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Backend endpoints and HTTP client settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkConfig {
    #[serde(default = "default_google_url")]
    pub google_url: String,
    #[serde(default = "default_gemini_url")]
    pub gemini_url: String,
    #[serde(default = "default_mymemory_url")]
    pub mymemory_url: String,
    /// Dictionary used for phonetic lookups
    #[serde(default = "default_dictionary_url")]
    pub dictionary_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            google_url: default_google_url(),
            gemini_url: default_gemini_url(),
            mymemory_url: default_mymemory_url(),
            dictionary_url: default_dictionary_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl NetworkConfig {
    /// Point every backend at one base URL, used against local mock servers
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            google_url: format!("{base}/translate_a/single"),
            gemini_url: format!("{base}/v1beta/models/gemini:generateContent"),
            mymemory_url: format!("{base}/get"),
            dictionary_url: format!("{base}/api/v2/entries/en"),
            request_timeout_secs: 5,
        }
    }
}
