use contextual_logger::*;
use tracing::Level;

mod storage {
    use contextual_logger::{log_debug, log_info};

    pub fn open() {
        log_info!("storage opened");
        log_debug!("storage debug log");
    }

    #[cfg(test)]
    pub fn context() -> contextual_logger::CallerContext {
        contextual_logger::caller_context!()
    }
}

fn main() -> anyhow::Result<()> {
    LOGGER.dict_config(LogConfig::default())?;
    log_trace!("bootstrap trace log");
    log_debug!("bootstrap debug log");
    log_info!("bootstrap info log");
    storage::open();

    let config = LogConfig {
        filter: "debug".to_string(),
        disable_existing_loggers: false,
        ..LogConfig::default()
    };
    LOGGER.dict_config(config)?;
    log_trace!("application trace log");
    log_debug!("application debug log");
    log_info!("application info log");
    storage::open();

    // silence everything below warn for the storage module only
    let storage_logger = LOGGER.resolve(&CallerContext::from_module_path("logger_demo::storage"));
    storage_logger.set_level(Some(Level::WARN));
    storage::open();
    storage_logger.warn("storage warn log");

    logger!().get_child("worker").info("child logger info log");

    // $ cargo run --bin logger_demo -- settings/logging.toml
    if let Some(path) = std::env::args().nth(1) {
        LOGGER.file_config(&path)?;
        log_info!("reconfigured from {path}");
    }

    Ok(())
}

#[cfg(test)]
fn root_context() -> CallerContext {
    caller_context!()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_root_module_is_main() {
        let context = root_context();
        assert!(context.is_main());
        assert_eq!(context.logger_name(), "__main__");
    }

    #[test]
    fn binary_inner_modules_use_their_path() {
        assert_eq!(storage::context().logger_name(), "logger_demo.storage");
        assert!(!caller_context!().is_main());
    }
}
