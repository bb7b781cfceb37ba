use kanal::AsyncSender;
use lingo_config::ConfigPatch;
use lingo_types::{AppEvent, ServiceId};

use crate::state::AppState;

pub async fn handle_config_update(
    state: &AppState,
    field: &str,
    value: &str,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let patch = match ConfigPatch::field(field, value) {
        Ok(patch) => patch,
        Err(e) => {
            tracing::warn!("Rejected config update: {e}");
            app_to_ui_tx
                .send(AppEvent::ShowError {
                    request_id: String::new(),
                    message: e.to_string(),
                })
                .await?;
            return Ok(());
        }
    };

    if let Some(service) = &patch.service {
        if ServiceId::from_id(service).is_none() {
            tracing::warn!("Unknown service {service}, requests will use {}", ServiceId::DEFAULT);
        }
    }

    let redacted = if field.to_ascii_lowercase().contains("key") { "***" } else { value };
    tracing::info!("Config update: {field} = {redacted}");
    state.controller.update_config(patch);
    Ok(())
}
