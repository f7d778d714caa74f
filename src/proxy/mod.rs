//! The shared [`LOGGER`] value. Every call site resolves it to the logger
//! named after its own module, so modules never construct loggers themselves:
//!
//! ```
//! use contextual_logger::{log_info, logger};
//!
//! fn connect() {
//!     log_info!("connecting");
//!     logger!().get_child("pool").debug("pool warmed up");
//! }
//! # connect();
//! ```

mod context;
pub use context::*;

mod macros;

mod port;
pub use port::*;

use crate::logger::{ConfigError, ConfigListener, LogConfig, Logger, Verifier};
use std::path::Path;
use std::sync::Arc;

pub static LOGGER: LoggerProxy = LoggerProxy::new(GlobalSubsystem);

/// Forwards to the logger of the calling module and to the subsystem's
/// configuration functions.
#[derive(Debug, Default)]
pub struct LoggerProxy<S = GlobalSubsystem> {
    subsystem: S,
}

impl<S> LoggerProxy<S> {
    pub const fn new(subsystem: S) -> Self {
        Self { subsystem }
    }

    pub fn subsystem(&self) -> &S {
        &self.subsystem
    }
}

impl<S: LoggingSubsystem> LoggerProxy<S> {
    /// The logger registered under the caller's module name.
    pub fn resolve(&self, context: &CallerContext) -> Arc<Logger> {
        self.subsystem.get_logger(context.logger_name())
    }

    pub fn dict_config(&self, config: LogConfig) -> Result<(), ConfigError> {
        self.subsystem.dict_config(config)
    }

    pub fn file_config(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        self.subsystem.file_config(path.as_ref())
    }

    pub async fn listen(
        &self,
        port: u16,
        verify: Option<Verifier>,
    ) -> Result<ConfigListener, ConfigError> {
        self.subsystem.listen(port, verify).await
    }

    pub fn stop_listening(&self) {
        self.subsystem.stop_listening()
    }
}
