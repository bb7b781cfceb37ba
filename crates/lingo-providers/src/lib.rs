//! Request/response adapters for every supported translation backend.

pub mod gemini;
pub mod google;
pub mod mymemory;
pub mod openai;

pub use gemini::GeminiTranslator;
pub use google::GoogleTranslator;
pub use mymemory::MyMemoryTranslator;
pub use openai::OpenAiTranslator;
