use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::Level;

/// Dictionary-style logging configuration, accepted by `dict_config` and
/// loaded from disk by `file_config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directives for the installed subscriber.
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub root: Option<LoggerConfig>,
    #[serde(default)]
    pub loggers: BTreeMap<String, LoggerConfig>,
    #[serde(default = "default_true")]
    pub disable_existing_loggers: bool,
    /// Only update the levels of the named loggers.
    #[serde(default)]
    pub incremental: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default)]
    pub level: Option<String>,
}

impl LoggerConfig {
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            level: Some(level.into()),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            root: None,
            loggers: BTreeMap::new(),
            disable_existing_loggers: true,
            incremental: false,
        }
    }
}

impl LogConfig {
    /// Load from a file, format picked by extension.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Decode a listener payload: JSON first, TOML text otherwise.
    pub fn from_payload(payload: &[u8]) -> Result<Self, ConfigError> {
        if let Ok(config) = serde_json::from_slice::<LogConfig>(payload) {
            return Ok(config);
        }
        let text = std::str::from_utf8(payload)
            .map_err(|e| ConfigError::Payload(format!("payload is neither JSON nor text: {e}")))?;
        let config = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    pub(crate) fn level_plan(&self) -> Result<LevelPlan, ConfigError> {
        let root = match &self.root {
            Some(root) => Some(root.resolve("root")?),
            None => None,
        };
        let loggers = self
            .loggers
            .iter()
            .map(|(name, logger)| Ok((name.clone(), logger.resolve(name)?)))
            .collect::<Result<BTreeMap<_, _>, ConfigError>>()?;
        Ok(LevelPlan { root, loggers })
    }
}

impl LoggerConfig {
    fn resolve(&self, logger: &str) -> Result<Option<Level>, ConfigError> {
        match &self.level {
            Some(level) => parse_level(level).map_err(|_| ConfigError::InvalidLevel {
                logger: logger.to_owned(),
                level: level.clone(),
            }),
            None => Ok(None),
        }
    }
}

/// Levels resolved from a [`LogConfig`], ready to be applied to a registry.
#[derive(Debug, Default)]
pub(crate) struct LevelPlan {
    pub root: Option<Option<Level>>,
    pub loggers: BTreeMap<String, Option<Level>>,
}

impl LevelPlan {
    pub fn is_below_configured(&self, name: &str) -> bool {
        self.loggers.keys().any(|configured| {
            name.len() > configured.len()
                && name.starts_with(configured.as_str())
                && name.as_bytes()[configured.len()] == b'.'
        })
    }
}

/// Parse a level name. `notset` (or empty) means "inherit" and maps to `None`.
pub fn parse_level(value: &str) -> Result<Option<Level>, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "notset" => Ok(None),
        "critical" | "fatal" => Ok(Some(Level::ERROR)),
        "warning" => Ok(Some(Level::WARN)),
        other => other
            .parse::<Level>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidLevel {
                logger: String::new(),
                level: value.to_owned(),
            }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load logging config: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid level {level:?} for logger {logger:?}")]
    InvalidLevel { logger: String, level: String },
    #[error("invalid filter directives: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),
    #[error("subscriber error: {0}")]
    Subscriber(String),
    #[error("invalid config payload: {0}")]
    Payload(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
