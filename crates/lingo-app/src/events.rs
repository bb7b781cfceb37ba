use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lingo_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod config_update;
pub mod speech;
pub mod text_input;

use config_update::handle_config_update;
use speech::handle_speak;
use text_input::handle_text_input;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = input_rx.recv() => event?,
        };

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", std::mem::discriminant(&event));
        handle_events(state.clone(), &app_to_ui_tx, &cancel, event).await?;
    }

    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

async fn handle_events(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    cancel: &CancellationToken,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::TextInput { request_id, text } => {
            tracing::debug!("TextInput {request_id}: {} chars", text.len());
            handle_text_input(state, request_id, text, app_to_ui_tx.clone());
        }
        AppEvent::ConfigUpdate { field, value } => {
            handle_config_update(&state, &field, &value, app_to_ui_tx).await?;
        }
        AppEvent::Speak { text, lang } => {
            handle_speak(&state, &text, &lang);
        }
        AppEvent::StopSpeech => {
            state.controller.stop_speech();
        }
        AppEvent::Shutdown => {
            tracing::info!("Shutdown event received");
            if let Err(e) = app_to_ui_tx.send(AppEvent::Shutdown).await {
                tracing::error!("Failed to forward shutdown to UI: {e}");
            }
            cancel.cancel();
        }
        AppEvent::ShowTranslation { .. } | AppEvent::ShowError { .. } => {
            // UI-only events, ignore in backend
        }
    }

    Ok(())
}
