pub mod logger;
pub mod proxy;
pub mod settings;

pub use logger::{ConfigError, ConfigListener, LogConfig, Logger, LoggerConfig, Verifier};
pub use proxy::{CallerContext, LOGGER, LoggerProxy, LoggingSubsystem};
