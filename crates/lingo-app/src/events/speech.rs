use lingo_types::AUTO;

use crate::state::AppState;

/// Speak `text`, or the last translation when `text` is empty
pub fn handle_speak(state: &AppState, text: &str, lang: &str) {
    if !text.trim().is_empty() {
        let lang = match lang {
            "" => {
                // Typed text is in the source language, the UI language when undetermined
                let config = state.controller.config();
                if config.translator.source_lang == AUTO {
                    config.ui.ui_language
                } else {
                    config.translator.source_lang
                }
            }
            lang => lang.to_string(),
        };
        state.controller.speak(text, &lang);
        return;
    }

    match state.last_translation() {
        Some(last) => state.controller.speak(&last.text, &last.lang),
        None => tracing::info!("Nothing to speak yet"),
    }
}
