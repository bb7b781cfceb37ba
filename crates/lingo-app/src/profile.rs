use std::env;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use lingo_config::Config;
use serde::{Deserialize, Serialize};

/// Named configuration stored as JSON
#[derive(Debug, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

pub fn load_profile(path: &Path) -> anyhow::Result<Profile> {
    tracing::info!("Loading profile {}", path.display());
    let file = File::open(path).with_context(|| format!("failed to open profile {}", path.display()))?;
    let reader = BufReader::new(file);
    let profile = serde_json::from_reader(reader)
        .with_context(|| format!("invalid profile {}", path.display()))?;
    Ok(profile)
}

pub fn save_profile(path: &Path, profile: &Profile) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(profile)?)?;
    tracing::info!("Saved profile {} to {}", profile.name, path.display());
    Ok(())
}

/// Profile values (or defaults) overridden by the process environment
pub fn load_config(profile: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = match profile {
        Some(path) => load_profile(path)?.value,
        None => Config::default(),
    };
    config.apply_lookup(|key| env::var(key).ok());
    Ok(config)
}
