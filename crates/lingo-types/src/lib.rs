pub mod languages;
pub mod services;
pub mod types;

pub use languages::{Language, LANGUAGES, language_name, source_languages, target_languages};
pub use services::{SERVICES, ServiceDescriptor, ServiceId, all_services, service_by_id};
pub use types::{
    AUTO, AppEvent, DEFAULT_UI_LANGUAGE, LanguageCode, RequestError, TranslationRequest,
    TranslationResult,
};
