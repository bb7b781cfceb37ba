use std::collections::HashMap;
use std::sync::Mutex;

use futures_util::future::join_all;
use reqwest::Url;
use serde_json::Value;

/// Phrases with more words than this get no phonetic at all
pub const MAX_PHRASE_WORDS: usize = 10;

const PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '\'', '"', '(', ')'];

#[derive(Debug, thiserror::Error)]
enum LookupError {
    #[error("invalid dictionary url: {0}")]
    Url(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Fetches phonetic transcriptions from a dictionary API and keeps them
/// for the lifetime of the process
pub struct PhoneticService {
    client: reqwest::Client,
    base_url: String,
    /// Normalized word -> phonetic, empty when the dictionary had none
    cache: Mutex<HashMap<String, String>>,
}

impl PhoneticService {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(reqwest::Client::new(), base_url)
    }

    /// Phonetic for `text`, or an empty string when none is available.
    ///
    /// Multi-word text is looked up word by word, concurrently, as long as it
    /// has at most [`MAX_PHRASE_WORDS`] words. A failed word contributes
    /// nothing instead of failing the phrase.
    pub async fn get_phonetic(&self, text: &str, lang: &str) -> String {
        if lang == "vi" {
            return String::new();
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        match words.len() {
            0 => String::new(),
            1 => self.word_phonetic(words[0]).await,
            n if n <= MAX_PHRASE_WORDS => {
                let phonetics = join_all(words.iter().map(|word| self.word_phonetic(word))).await;
                phonetics
                    .into_iter()
                    .filter(|p| !p.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            }
            n => {
                tracing::debug!("Skipping phonetic lookup for {n}-word phrase");
                String::new()
            }
        }
    }

    async fn word_phonetic(&self, word: &str) -> String {
        let clean = clean_word(word);
        if clean.is_empty() {
            return String::new();
        }

        if let Some(cached) = self.cached(&clean) {
            return cached;
        }

        match self.lookup(&clean).await {
            Ok(phonetic) => {
                self.lock_cache().insert(clean, phonetic.clone());
                phonetic
            }
            Err(e) => {
                tracing::debug!("Phonetic lookup for '{}' failed: {}", clean, e);
                String::new()
            }
        }
    }

    async fn lookup(&self, word: &str) -> Result<String, LookupError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| LookupError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Url(self.base_url.clone()))?
            .pop_if_empty()
            .push(word);

        let data: Value = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(extract_phonetic(&data))
    }

    /// Cached phonetic for an already normalized word
    pub fn cached(&self, word: &str) -> Option<String> {
        self.lock_cache().get(word).cloned()
    }

    pub fn cached_words(&self) -> usize {
        self.lock_cache().len()
    }

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock cannot leave the map half-written
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Lower-case a word and strip surrounding punctuation marks
pub fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| !PUNCTUATION.contains(c))
        .collect::<String>()
        .to_lowercase()
}

/// First non-empty `phonetics[].text` of the first entry, without slashes or brackets
fn extract_phonetic(data: &Value) -> String {
    data.get(0)
        .and_then(|entry| entry["phonetics"].as_array())
        .into_iter()
        .flatten()
        .filter_map(|phonetic| phonetic["text"].as_str())
        .find(|text| !text.is_empty())
        .map(|text| text.replace(['/', '[', ']'], ""))
        .unwrap_or_default()
}
