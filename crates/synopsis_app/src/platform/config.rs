use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use synopsis_engine::{ClientSettings, DEFAULT_ENDPOINT};

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = "synopsis.ron";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub destination: LogDestination,
    pub level: String,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: LogDestination::Terminal,
            level: "warn".to_string(),
            file: PathBuf::from("synopsis.log"),
        }
    }
}

/// Loads the config from `explicit`, or from `./synopsis.ron` when present.
///
/// A missing explicit file is an error; a missing default file means defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    match explicit {
        Some(path) => read_config(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILENAME);
            if path.exists() {
                read_config(path)
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}

pub fn parse_config(text: &str) -> Result<AppConfig> {
    Ok(ron::from_str(text)?)
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("failed to parse config {}", path.display()))
}
