use serde::{Deserialize, Serialize};

fn default_ui_language() -> String {
    "en".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Language of user-facing messages
    #[serde(default = "default_ui_language")]
    pub ui_language: String,
    /// Emit JSON log lines instead of text
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            ui_language: default_ui_language(),
            json_logs: false,
        }
    }
}
