pub mod classifier;
pub mod enrich;
pub mod error;
pub mod prompt;
pub mod transport;

pub use classifier::classify;
pub use enrich::{enrich_with_phonetics, validate_params};
pub use error::{ErrorClassification, ErrorKind, TranslateError};
pub use lingo_types::{LanguageCode, ServiceDescriptor, ServiceId, TranslationResult};
pub use transport::{FetchOptions, HttpProxy, ProxyFetch, ProxyResponse};

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language.
    ///
    /// Fails with a classifiable [`TranslateError`] on any non-2xx response,
    /// network failure or malformed payload.
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        ui_language: &str,
    ) -> Result<TranslationResult, TranslateError>;

    fn service_id(&self) -> ServiceId;

    /// Registry entry of this provider
    fn descriptor(&self) -> &'static ServiceDescriptor {
        self.service_id().descriptor()
    }
}
