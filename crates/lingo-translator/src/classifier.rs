//! Maps raised errors to a taxonomy entry and a fallback decision.
//!
//! The decision depends on the HTTP status and the structured error body
//! only, never on which adapter raised the error.

use crate::error::{ErrorClassification, ErrorKind, TranslateError};

const INVALID_KEY_MARKERS: &[&str] = &[
    "api key not valid",
    "api_key_invalid",
    "invalid_api_key",
    "incorrect api key",
];

const QUOTA_MARKERS: &[&str] = &["quota", "quota_exceeded", "insufficient_quota"];

pub fn classify(error: &TranslateError) -> ErrorClassification {
    kind_of(error).into()
}

fn kind_of(error: &TranslateError) -> ErrorKind {
    match error {
        TranslateError::ApiKeyMissing => ErrorKind::ApiKeyMissing,
        TranslateError::Network(_) => ErrorKind::NetworkError,
        TranslateError::NonJson(_) => ErrorKind::NonJsonResponse,
        TranslateError::InvalidRequest(_) | TranslateError::Malformed(_) => ErrorKind::Unknown,
        TranslateError::Provider { kind, .. } => *kind,
        TranslateError::Http {
            status,
            message,
            code,
            key_configured,
        } => {
            let has = |markers: &[&str]| {
                contains_marker(message, markers)
                    || code.as_deref().is_some_and(|c| contains_marker(c, markers))
            };

            match *status {
                400 if has(INVALID_KEY_MARKERS) => ErrorKind::ApiKeyInvalid,
                400 => ErrorKind::Unknown,
                401 if *key_configured => ErrorKind::ApiKeyInvalid,
                401 => ErrorKind::ApiKeyMissing,
                403 if has(QUOTA_MARKERS) => ErrorKind::QuotaExceeded,
                403 => ErrorKind::Forbidden,
                429 => ErrorKind::RateLimit,
                s if s >= 500 => ErrorKind::ServerError,
                _ => ErrorKind::Unknown,
            }
        }
    }
}

fn contains_marker(text: &str, markers: &[&str]) -> bool {
    let text = text.to_lowercase();
    markers.iter().any(|marker| text.contains(marker))
}
