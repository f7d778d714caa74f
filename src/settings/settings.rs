use crate::logger::{DEFAULT_LOGGING_CONFIG_PORT, LogConfig};
use anyhow::{Result, anyhow};
use config::{Config, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub listener: Listener,
}

#[derive(Debug, Deserialize)]
pub struct Listener {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Listener {
    fn default() -> Self {
        Self {
            enabled: false,
            port: DEFAULT_LOGGING_CONFIG_PORT,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_LOGGING_CONFIG_PORT
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}
