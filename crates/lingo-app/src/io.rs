use kanal::AsyncSender;
use lingo_types::AppEvent;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

pub const HELP: &str = "\
Type text to translate it. Commands:
  :from <code>           source language (auto to detect)
  :to <code>             target language
  :service <id>          google, gemini, openai or mymemory
  :ui <code>             language of notices and errors
  :key <service> <key>   set the API key of a service
  :speak [text]          speak text, or the last translation
  :stop                  stop speaking
  :quit                  exit";

/// Watch stdin and forward every line as an event
pub async fn watcher_io(cancel: CancellationToken, event_tx: AsyncSender<AppEvent>) -> anyhow::Result<()> {
    watch_lines(BufReader::new(tokio::io::stdin()), cancel, event_tx).await
}

pub async fn watch_lines<R>(
    reader: R,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Input watcher stopping");
                return Ok(());
            }
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            tracing::info!("End of input");
            event_tx.send(AppEvent::Shutdown).await?;
            return Ok(());
        };

        match parse_line(&line) {
            Some(Command::Event(event)) => event_tx.send(event).await?,
            Some(Command::Help) => eprintln!("{HELP}"),
            Some(Command::Invalid(message)) => eprintln!("{message}"),
            None => {}
        }
    }
}

#[derive(Debug)]
pub enum Command {
    Event(AppEvent),
    Help,
    Invalid(String),
}

/// Interpret one input line. Blank lines yield nothing.
pub fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(command) = line.strip_prefix(':') else {
        return Some(Command::Event(AppEvent::TextInput {
            request_id: Uuid::new_v4().to_string(),
            text: line.to_string(),
        }));
    };

    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((command, ""));

    let update = |field: &str| {
        if rest.is_empty() {
            Command::Invalid(format!(":{name} needs a value"))
        } else {
            Command::Event(AppEvent::ConfigUpdate {
                field: field.to_string(),
                value: rest.to_string(),
            })
        }
    };

    let parsed = match name {
        "from" => update("source_lang"),
        "to" => update("target_lang"),
        "service" => update("service"),
        "ui" => update("ui_language"),
        "key" => match rest.split_once(char::is_whitespace) {
            Some((service, key)) => Command::Event(AppEvent::ConfigUpdate {
                field: format!("{}_api_key", service.to_ascii_lowercase()),
                value: key.trim().to_string(),
            }),
            None => Command::Invalid(":key needs a service and a key".to_string()),
        },
        "speak" => Command::Event(AppEvent::Speak {
            text: rest.to_string(),
            lang: String::new(),
        }),
        "stop" => Command::Event(AppEvent::StopSpeech),
        "quit" | "q" | "exit" => Command::Event(AppEvent::Shutdown),
        "help" | "h" => Command::Help,
        other => Command::Invalid(format!("Unknown command :{other}, try :help")),
    };
    Some(parsed)
}
