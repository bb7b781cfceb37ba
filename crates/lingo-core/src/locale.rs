//! User-facing strings in every supported UI language.
//!
//! Templates use `$1`, `$2`, ... placeholders.

use std::collections::HashMap;

use lingo_translator::{ErrorKind, ServiceId};

const FALLBACK_LOCALE: &str = "en";

/// Read-only source of localized messages
pub trait MessageCatalog: Send + Sync {
    fn error_message(&self, kind: ErrorKind, ui_lang: &str) -> String;

    /// Notice attached to a result produced by the fallback provider
    fn fallback_notice(&self, ui_lang: &str, error: &str) -> String;

    fn all_failed(&self, ui_lang: &str) -> String;

    fn service_name(&self, id: ServiceId, ui_lang: &str) -> String;

    fn invalid_request(&self, ui_lang: &str) -> String;
}

/// Messages of one locale, keyed by message key
#[derive(Debug, Default, Clone)]
pub struct LocalizedMessages(HashMap<&'static str, &'static str>);

impl LocalizedMessages {
    fn from_pairs(pairs: &[(&'static str, &'static str)]) -> Self {
        Self(pairs.iter().copied().collect())
    }

    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.0.get(key).copied()
    }
}

/// Replace `$1`, `$2`, ... with the given parameters
pub fn format_message(template: &str, params: &[&str]) -> String {
    let mut message = template.to_string();
    // Highest index first so `$1` never eats the prefix of `$10`
    for (index, param) in params.iter().enumerate().rev() {
        message = message.replace(&format!("${}", index + 1), param);
    }
    message
}

fn error_key(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::ApiKeyInvalid => "errors.apiKeyInvalid",
        ErrorKind::ApiKeyMissing => "errors.apiKeyMissing",
        ErrorKind::QuotaExceeded => "errors.quotaExceeded",
        ErrorKind::RateLimit => "errors.rateLimit",
        ErrorKind::Forbidden => "errors.forbidden",
        ErrorKind::ServerError => "errors.serverError",
        ErrorKind::NetworkError => "errors.networkError",
        ErrorKind::NonJsonResponse => "errors.nonJsonResponse",
        ErrorKind::Unknown => "errors.unknown",
    }
}

const EN: &[(&str, &str)] = &[
    ("fallbackNotice", "⚠️ API Limit/Error: $1\n🔄 Switched to Google Translate."),
    ("allFailed", "❌ All translation services failed. Please try again."),
    ("invalidRequest", "❌ Please enter some text to translate."),
    ("service.google", "Google Translate"),
    ("service.gemini", "Gemini AI"),
    ("service.openai", "OpenAI"),
    ("service.mymemory", "MyMemory"),
    ("errors.apiKeyInvalid", "❌ API Key is invalid. Please check your settings."),
    ("errors.apiKeyMissing", "🔑 API Key is missing. Please check your settings."),
    (
        "errors.quotaExceeded",
        "📊 Quota/Credits exceeded. Please check your account or switch services.",
    ),
    ("errors.rateLimit", "⏱️ Rate limit exceeded. Please try again later."),
    ("errors.forbidden", "🔒 Access forbidden. Please check your permissions."),
    ("errors.serverError", "🔧 Service error. Please try again later."),
    ("errors.networkError", "🌐 Network error. Please check your connection."),
    ("errors.nonJsonResponse", "🔧 The service returned an unexpected response."),
    ("errors.unknown", "❌ Unknown error occurred."),
];

const VI: &[(&str, &str)] = &[
    ("fallbackNotice", "⚠️ Lỗi API: $1\n🔄 Đã tự động chuyển sang Google Translate."),
    ("allFailed", "❌ Tất cả dịch vụ dịch đều thất bại. Vui lòng thử lại."),
    ("invalidRequest", "❌ Vui lòng nhập văn bản cần dịch."),
    ("service.google", "Google Dịch"),
    ("service.gemini", "Gemini AI"),
    ("service.openai", "OpenAI"),
    ("service.mymemory", "MyMemory"),
    ("errors.apiKeyInvalid", "❌ API Key không hợp lệ. Vui lòng kiểm tra lại cài đặt."),
    ("errors.apiKeyMissing", "🔑 Thiếu API Key. Vui lòng kiểm tra cài đặt."),
    (
        "errors.quotaExceeded",
        "📊 Đã hết Quota/Credits. Vui lòng kiểm tra tài khoản hoặc đổi dịch vụ.",
    ),
    ("errors.rateLimit", "⏱️ Quá giới hạn lượt gọi (Rate limit). Vui lòng thử lại sau."),
    ("errors.forbidden", "🔒 Truy cập bị từ chối. Vui lòng kiểm tra quyền hạn."),
    ("errors.serverError", "🔧 Lỗi máy chủ dịch vụ. Vui lòng thử lại sau."),
    ("errors.networkError", "🌐 Lỗi kết nối mạng."),
    ("errors.nonJsonResponse", "🔧 Dịch vụ trả về phản hồi không hợp lệ."),
    ("errors.unknown", "❌ Lỗi không xác định."),
];

/// English and Vietnamese tables compiled into the binary.
/// Unknown UI languages and missing keys fall back to English.
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    locales: HashMap<&'static str, LocalizedMessages>,
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        let mut locales = HashMap::new();
        locales.insert("en", LocalizedMessages::from_pairs(EN));
        locales.insert("vi", LocalizedMessages::from_pairs(VI));
        Self { locales }
    }
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn message(&self, ui_lang: &str, key: &str) -> String {
        let base = ui_lang.split(['-', '_']).next().unwrap_or_default();
        self.locales
            .get(base.to_ascii_lowercase().as_str())
            .and_then(|messages| messages.get(key))
            .or_else(|| self.locales.get(FALLBACK_LOCALE)?.get(key))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }
}

impl MessageCatalog for BuiltinCatalog {
    fn error_message(&self, kind: ErrorKind, ui_lang: &str) -> String {
        self.message(ui_lang, error_key(kind))
    }

    fn fallback_notice(&self, ui_lang: &str, error: &str) -> String {
        format_message(&self.message(ui_lang, "fallbackNotice"), &[error])
    }

    fn all_failed(&self, ui_lang: &str) -> String {
        self.message(ui_lang, "allFailed")
    }

    fn service_name(&self, id: ServiceId, ui_lang: &str) -> String {
        self.message(ui_lang, &format!("service.{}", id.as_str()))
    }

    fn invalid_request(&self, ui_lang: &str) -> String {
        self.message(ui_lang, "invalidRequest")
    }
}
