use crate::logger::{self, ConfigError, ConfigListener, LogConfig, Logger, Manager, Verifier};
use std::path::Path;
use std::sync::Arc;

/// What the proxy needs from a logging subsystem: registry lookup plus the
/// four global configuration functions.
#[async_trait::async_trait]
pub trait LoggingSubsystem: Send + Sync {
    fn get_logger(&self, name: &str) -> Arc<Logger>;

    fn dict_config(&self, config: LogConfig) -> Result<(), ConfigError>;

    fn file_config(&self, path: &Path) -> Result<(), ConfigError>;

    async fn listen(
        &self,
        port: u16,
        verify: Option<Verifier>,
    ) -> Result<ConfigListener, ConfigError>;

    fn stop_listening(&self);
}

/// The process-wide subsystem, see [`logger::manager`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalSubsystem;

#[async_trait::async_trait]
impl LoggingSubsystem for GlobalSubsystem {
    fn get_logger(&self, name: &str) -> Arc<Logger> {
        logger::get_logger(name)
    }

    fn dict_config(&self, config: LogConfig) -> Result<(), ConfigError> {
        logger::dict_config(config)
    }

    fn file_config(&self, path: &Path) -> Result<(), ConfigError> {
        logger::file_config(path)
    }

    async fn listen(
        &self,
        port: u16,
        verify: Option<Verifier>,
    ) -> Result<ConfigListener, ConfigError> {
        logger::listen(port, verify).await
    }

    fn stop_listening(&self) {
        logger::stop_listening()
    }
}

#[async_trait::async_trait]
impl LoggingSubsystem for Arc<Manager> {
    fn get_logger(&self, name: &str) -> Arc<Logger> {
        Manager::get_logger(self, name)
    }

    fn dict_config(&self, config: LogConfig) -> Result<(), ConfigError> {
        Manager::dict_config(self, config)
    }

    fn file_config(&self, path: &Path) -> Result<(), ConfigError> {
        Manager::file_config(self, path)
    }

    async fn listen(
        &self,
        port: u16,
        verify: Option<Verifier>,
    ) -> Result<ConfigListener, ConfigError> {
        Manager::listen(self, port, verify).await
    }

    fn stop_listening(&self) {
        Manager::stop_listening(self)
    }
}
