use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lingo_config::Config;
use lingo_core::{BuiltinCatalog, MessageCatalog};
use lingo_types::all_services;
use tokio::signal;

mod cli;
mod controller;
mod events;
mod io;
mod logging;
mod profile;
mod state;
mod ui;


use self::cli::{Cli, Command, TranslateArgs};
use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = profile::load_config(cli.profile.as_deref())?;
    logging::init_logging(config.ui.json_logs);

    match cli.command {
        Command::Translate(args) => translate_once(config, args).await,
        Command::Interactive { json } => run_interactive(config, json).await,
        Command::Services => {
            list_services(&config);
            Ok(())
        }
        Command::SaveProfile { name, path } => {
            profile::save_profile(&path, &profile::Profile { name, value: config })
        }
    }
}

async fn translate_once(mut config: Config, args: TranslateArgs) -> anyhow::Result<()> {
    config.apply(args.patch());
    let state = AppState::new(config)?;

    let request = state.request_for(&args.text());
    match state.controller.translate(&request).await {
        Ok(result) => {
            if args.json {
                println!("{}", ui::render_json(&result)?);
            } else {
                println!("{}", ui::render_text(&result));
            }
            Ok(())
        }
        Err(e) => {
            tracing::debug!("Translation failed: {e:?}");
            Err(anyhow::Error::new(e)).context("translation failed")
        }
    }
}

async fn run_interactive(config: Config, json: bool) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config)?);
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(json);

    tracing::info!("Interactive mode, type text to translate or :help");
    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::debug!("task exited"),
                Ok(Err(e)) => tracing::error!("task failed: {e:#}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;

    // A pending stdin read would keep the runtime alive
    std::process::exit(0)
}

fn list_services(config: &Config) {
    let ui_language = &config.ui.ui_language;
    let catalog = BuiltinCatalog::new();
    for service in all_services() {
        let key = match service.api_key_name {
            Some(name) if service.requires_api_key => format!("requires {name}"),
            Some(name) => format!("optional {name}"),
            None => "no key".to_string(),
        };
        let active = if service.id.as_str() == config.translator.service { "*" } else { " " };
        println!(
            "{active} {:<9} {:<18} {key}",
            service.id.as_str(),
            catalog.service_name(service.id, ui_language)
        );
    }
}
