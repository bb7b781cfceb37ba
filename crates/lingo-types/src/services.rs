use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a translation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceId {
    Google,
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "mymemory")]
    MyMemory,
}

impl ServiceId {
    /// Provider used when an id is unknown and as the single fallback hop
    pub const DEFAULT: ServiceId = ServiceId::Google;

    pub const ALL: [ServiceId; 4] = [
        ServiceId::Google,
        ServiceId::Gemini,
        ServiceId::OpenAi,
        ServiceId::MyMemory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::Google => "google",
            ServiceId::Gemini => "gemini",
            ServiceId::OpenAi => "openai",
            ServiceId::MyMemory => "mymemory",
        }
    }

    /// Parse an id, `None` when it names no known backend
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|service| service.as_str().eq_ignore_ascii_case(id.trim()))
    }

    pub fn descriptor(&self) -> &'static ServiceDescriptor {
        SERVICES
            .iter()
            .find(|descriptor| descriptor.id == *self)
            .unwrap_or(&SERVICES[0])
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| format!("unknown translation service: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    pub id: ServiceId,
    pub display_name: &'static str,
    pub requires_api_key: bool,
    /// Config key holding the credential, when the backend takes one
    pub api_key_name: Option<&'static str>,
}

pub static SERVICES: [ServiceDescriptor; 4] = [
    ServiceDescriptor {
        id: ServiceId::Google,
        display_name: "Google Translate",
        requires_api_key: false,
        api_key_name: None,
    },
    ServiceDescriptor {
        id: ServiceId::Gemini,
        display_name: "Gemini AI",
        requires_api_key: true,
        api_key_name: Some("GEMINI_API_KEY"),
    },
    // Local OpenAI-compatible proxies usually run without a key
    ServiceDescriptor {
        id: ServiceId::OpenAi,
        display_name: "OpenAI",
        requires_api_key: false,
        api_key_name: Some("OPENAI_API_KEY"),
    },
    ServiceDescriptor {
        id: ServiceId::MyMemory,
        display_name: "MyMemory",
        requires_api_key: false,
        api_key_name: None,
    },
];

pub fn service_by_id(id: &str) -> Option<&'static ServiceDescriptor> {
    ServiceId::from_id(id).map(|service| service.descriptor())
}

pub fn all_services() -> &'static [ServiceDescriptor] {
    &SERVICES
}
