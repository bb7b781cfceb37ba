//! Pronunciation lookups for single words and short phrases.

mod service;

pub use service::{MAX_PHRASE_WORDS, PhoneticService, clean_word};
