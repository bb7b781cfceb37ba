use serde::Serialize;

/// Taxonomy entry of a failed translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    ApiKeyInvalid,
    ApiKeyMissing,
    QuotaExceeded,
    RateLimit,
    Forbidden,
    ServerError,
    NetworkError,
    NonJsonResponse,
    Unknown,
}

impl ErrorKind {
    /// Credential and quota problems need the user; retrying elsewhere is pointless
    pub fn should_fallback(self) -> bool {
        !matches!(
            self,
            ErrorKind::ApiKeyInvalid | ErrorKind::ApiKeyMissing | ErrorKind::QuotaExceeded
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorClassification {
    pub kind: ErrorKind,
    pub should_fallback: bool,
}

impl From<ErrorKind> for ErrorClassification {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            should_fallback: kind.should_fallback(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("API key is missing")]
    ApiKeyMissing,

    /// Non-2xx answer from the backend
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        /// Provider error message, or the status reason
        message: String,
        /// Provider error code or type, when the body carried one
        code: Option<String>,
        /// Whether a credential was sent with the request
        key_configured: bool,
    },

    /// No response was received
    #[error("Network error: {0}")]
    Network(String),

    #[error("Response is not valid JSON: {0}")]
    NonJson(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Error whose kind the adapter already determined
    #[error("{message}")]
    Provider { kind: ErrorKind, message: String },
}

impl TranslateError {
    pub fn http(status: u16, message: impl Into<String>, key_configured: bool) -> Self {
        TranslateError::Http {
            status,
            message: message.into(),
            code: None,
            key_configured,
        }
    }

    pub fn classification(&self) -> ErrorClassification {
        crate::classifier::classify(self)
    }

    /// Short provider detail worth showing next to a generic message
    pub fn detail(&self) -> Option<&str> {
        match self {
            TranslateError::Http { message, .. }
            | TranslateError::Provider { message, .. }
            | TranslateError::Malformed(message)
            | TranslateError::InvalidRequest(message) => {
                Some(message.as_str()).filter(|m| !m.is_empty())
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return TranslateError::NonJson(e.to_string());
        }
        match e.status() {
            Some(status) => TranslateError::http(status.as_u16(), e.to_string(), false),
            None => TranslateError::Network(e.to_string()),
        }
    }
}
