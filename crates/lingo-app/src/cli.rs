use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lingo_config::ConfigPatch;

#[derive(Parser, Debug)]
#[command(name = "lingo")]
#[command(version, about = "Translate text with phonetics and automatic provider fallback", long_about = None)]
pub struct Cli {
    /// JSON profile loaded before environment overrides
    #[arg(long, global = true)]
    pub profile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate the given text once
    Translate(TranslateArgs),

    /// Read lines from stdin and translate each one
    Interactive {
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available translation services
    Services,

    /// Write the effective configuration to a profile file
    SaveProfile {
        /// Profile name stored in the file
        name: String,

        /// Destination path
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Text to translate
    #[arg(required = true)]
    pub text: Vec<String>,

    /// Source language code, `auto` to let the service detect it
    #[arg(long)]
    pub from: Option<String>,

    /// Target language code
    #[arg(long)]
    pub to: Option<String>,

    /// Service id: google, gemini, openai or mymemory
    #[arg(long)]
    pub service: Option<String>,

    /// Language of notices and error messages
    #[arg(long)]
    pub ui_lang: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl TranslateArgs {
    pub fn text(&self) -> String {
        self.text.join(" ")
    }

    /// Command line overrides, applied on top of profile and environment
    pub fn patch(&self) -> ConfigPatch {
        ConfigPatch {
            source_lang: self.from.clone(),
            target_lang: self.to.clone(),
            service: self.service.clone(),
            ui_language: self.ui_lang.clone(),
            ..Default::default()
        }
    }
}
