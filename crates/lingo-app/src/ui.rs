use kanal::AsyncReceiver;
use lingo_types::{AppEvent, TranslationResult, language_name};

/// Print results and errors coming from the event loop until shutdown
pub async fn ui_loop(app_to_ui_rx: AsyncReceiver<AppEvent>, json: bool) -> anyhow::Result<()> {
    while let Ok(event) = app_to_ui_rx.recv().await {
        match event {
            AppEvent::ShowTranslation { request_id, result } => {
                tracing::debug!("Showing result of {request_id}");
                if json {
                    println!("{}", render_json(&result)?);
                } else {
                    println!("{}\n", render_text(&result));
                }
            }
            AppEvent::ShowError { request_id, message } => {
                tracing::debug!("Showing error of {request_id}");
                eprintln!("{message}\n");
            }
            AppEvent::Shutdown => break,
            _ => {}
        }
    }

    Ok(())
}

pub fn render_text(result: &TranslationResult) -> String {
    let mut lines = vec![result.translation.clone()];

    if let Some(phonetic) = &result.target_phonetic {
        lines.push(format!("  /{phonetic}/"));
    }
    if let Some(phonetic) = &result.src_phonetic {
        lines.push(format!("  source: /{phonetic}/"));
    }
    if let Some(lang) = &result.detected_lang {
        lines.push(format!("  detected: {}", language_name(lang)));
    }
    if let Some(notice) = &result.fallback_notice {
        lines.push(notice.clone());
    }

    lines.join("\n")
}

pub fn render_json(result: &TranslationResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
