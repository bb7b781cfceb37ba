use std::sync::Arc;

use kanal::AsyncSender;
use lingo_types::AppEvent;
use tokio::task::JoinHandle;

use crate::state::AppState;

/// Translate `text` in the background. The result is dropped if another
/// request started in the meantime.
pub fn handle_text_input(
    state: Arc<AppState>,
    request_id: String,
    text: String,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> JoinHandle<()> {
    let ticket = state.controller.begin_request();
    let request = state.request_for(&text);

    tokio::spawn(async move {
        let outcome = state.controller.translate(&request).await;

        if !state.controller.is_current(&ticket) {
            tracing::debug!("Discarding stale result of {request_id}");
            return;
        }

        let event = match outcome {
            Ok(result) => {
                state.remember(&result.translation, &request.target_lang);
                AppEvent::ShowTranslation { request_id, result }
            }
            Err(e) => {
                tracing::debug!("Request {request_id} failed: {e:?}");
                AppEvent::ShowError {
                    request_id,
                    message: e.message().to_string(),
                }
            }
        };

        if let Err(e) = app_to_ui_tx.send(event).await {
            tracing::error!("Failed to send translation to UI: {e}");
        }
    })
}
