use super::listener::{self, ConfigListener, Verifier};
use super::subscriber::filter_directives;
use super::{ConfigError, FilterReloader, LogConfig, Logger, LoggerRegistry};
use std::net::Ipv4Addr;
use std::path::Path;
use std::sync::{Arc, LazyLock, Mutex, OnceLock, PoisonError};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

static MANAGER: LazyLock<Arc<Manager>> = LazyLock::new(|| Manager::new(true));

/// The process-wide manager behind [`get_logger`], [`dict_config`] and friends.
pub fn manager() -> &'static Arc<Manager> {
    &MANAGER
}

/// Owns the logger registry and everything configuration touches: the
/// subscriber filter, the configuration lock and the active listener.
pub struct Manager {
    registry: Arc<LoggerRegistry>,
    install_subscriber: bool,
    reloader: OnceLock<FilterReloader>,
    filter: Mutex<Option<String>>,
    listener: Mutex<Option<CancellationToken>>,
    config_lock: Mutex<()>,
}

impl Manager {
    fn new(install_subscriber: bool) -> Arc<Self> {
        Arc::new(Self {
            registry: LoggerRegistry::new(),
            install_subscriber,
            reloader: OnceLock::new(),
            filter: Mutex::new(None),
            listener: Mutex::new(None),
            config_lock: Mutex::new(()),
        })
    }

    /// A manager with its own registry that never installs a global
    /// subscriber. Filters are validated and recorded only.
    pub fn detached() -> Arc<Self> {
        Self::new(false)
    }

    pub fn registry(&self) -> &Arc<LoggerRegistry> {
        &self.registry
    }

    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        self.registry.get_logger(name)
    }

    /// Filter directives of the last applied non-incremental configuration,
    /// as configured.
    pub fn current_filter(&self) -> Option<String> {
        self.filter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn dict_config(&self, config: LogConfig) -> Result<(), ConfigError> {
        let _guard = self.config_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let plan = config.level_plan()?;
        if !config.incremental {
            let filter = EnvFilter::try_new(filter_directives(&config.filter))?;
            if self.install_subscriber {
                self.apply_filter(filter)?;
            }
            *self.filter.lock().unwrap_or_else(PoisonError::into_inner) =
                Some(config.filter.clone());
        }
        self.registry.apply(
            &plan,
            config.disable_existing_loggers,
            config.incremental,
        );

        tracing::debug!(
            filter = %config.filter,
            loggers = plan.loggers.len(),
            incremental = config.incremental,
            "logging configuration applied"
        );
        Ok(())
    }

    pub fn file_config(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let config = LogConfig::from_file(path.as_ref())?;
        self.dict_config(config)
    }

    /// Serve configuration updates on `127.0.0.1:port`, replacing any
    /// listener started earlier.
    pub async fn listen(
        self: &Arc<Self>,
        port: u16,
        verify: Option<Verifier>,
    ) -> Result<ConfigListener, ConfigError> {
        let tcp = TcpListener::bind((Ipv4Addr::LOCALHOST, port)).await?;
        let local_addr = tcp.local_addr()?;
        let token = CancellationToken::new();

        let previous = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        Ok(listener::spawn(
            tcp,
            local_addr,
            Arc::clone(self),
            verify,
            token,
        ))
    }

    pub fn stop_listening(&self) {
        let active = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(token) = active {
            token.cancel();
        }
    }

    fn apply_filter(&self, filter: EnvFilter) -> Result<(), ConfigError> {
        match self.reloader.get() {
            Some(reloader) => reloader.reload(filter),
            None => {
                let reloader = FilterReloader::install(filter)?;
                // config_lock is held, nobody else can have set it
                let _ = self.reloader.set(reloader);
                Ok(())
            }
        }
    }
}

pub fn get_logger(name: &str) -> Arc<Logger> {
    manager().get_logger(name)
}

pub fn dict_config(config: LogConfig) -> Result<(), ConfigError> {
    manager().dict_config(config)
}

pub fn file_config(path: impl AsRef<Path>) -> Result<(), ConfigError> {
    manager().file_config(path)
}

pub async fn listen(port: u16, verify: Option<Verifier>) -> Result<ConfigListener, ConfigError> {
    manager().listen(port, verify).await
}

pub fn stop_listening() {
    manager().stop_listening()
}
