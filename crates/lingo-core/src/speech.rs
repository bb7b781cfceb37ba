use std::sync::{Mutex, PoisonError};

/// Speaking rate used for every utterance, slightly slower than normal
pub const SPEECH_RATE: f32 = 0.9;

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: lang.into(),
            rate: SPEECH_RATE,
            pitch: 1.0,
        }
    }
}

/// Text-to-speech engine provided by the host
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, utterance: Utterance);

    /// Stop whatever is being spoken. A no-op when idle.
    fn stop(&self);
}

/// Synthesizer without an audio backend: records the current utterance and
/// logs it
#[derive(Debug, Default)]
pub struct LogSpeech {
    current: Mutex<Option<Utterance>>,
}

impl LogSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Utterance> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SpeechSynthesizer for LogSpeech {
    fn speak(&self, utterance: Utterance) {
        tracing::info!("Speaking [{}]: {}", utterance.lang, utterance.text);
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(utterance);
    }

    fn stop(&self) {
        if let Some(utterance) = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            tracing::debug!("Stopped speaking [{}]", utterance.lang);
        }
    }
}
