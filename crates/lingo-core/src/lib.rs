pub mod controller;
pub mod factory;
pub mod generation;
pub mod locale;
pub mod speech;

pub use controller::{ControllerError, TranslationController};
pub use factory::{Collaborators, TranslationFactory};
pub use generation::{RequestGeneration, RequestTicket};
pub use locale::{BuiltinCatalog, MessageCatalog};
pub use speech::{LogSpeech, SpeechSynthesizer, Utterance};
