use super::{ConfigError, LEVELED_EVENT_TARGET};
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

/// The global subscriber installed by the first `dict_config`, kept around so
/// later configurations can swap its filter.
pub struct FilterReloader {
    reload_handle: reload::Handle<EnvFilter, Registry>,
}

impl FilterReloader {
    pub fn install(filter: EnvFilter) -> Result<Self, ConfigError> {
        let (filter, reload_handle) = reload::Layer::new(filter);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init()
            .map_err(|e| ConfigError::Subscriber(e.to_string()))?;

        Ok(Self { reload_handle })
    }

    pub fn reload(&self, filter: EnvFilter) -> Result<(), ConfigError> {
        self.reload_handle
            .reload(filter)
            .map_err(|e| ConfigError::Subscriber(e.to_string()))
    }
}

/// Directives for the installed filter: the configured ones plus a pass for
/// events a logger level has already admitted.
pub(crate) fn filter_directives(filter: &str) -> String {
    let filter = filter.trim().trim_end_matches(',');
    if filter.is_empty() {
        format!("{LEVELED_EVENT_TARGET}=trace")
    } else {
        format!("{filter},{LEVELED_EVENT_TARGET}=trace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::LoggerRegistry;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::Level;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture_with(filter: &str, body: impl FnOnce()) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(EnvFilter::try_new(filter_directives(filter)).unwrap())
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, body);
        capture.contents()
    }

    #[test]
    fn directives_keep_the_configured_filter_first() {
        assert_eq!(
            filter_directives("info,hyper=warn"),
            "info,hyper=warn,contextual_logger::leveled=trace"
        );
        assert_eq!(filter_directives(""), "contextual_logger::leveled=trace");
    }

    #[test]
    fn logger_level_can_be_more_verbose_than_the_filter() {
        let registry = LoggerRegistry::new();
        let db = registry.get_logger("app.db");
        db.set_level(Some(Level::DEBUG));
        let web = registry.get_logger("app.web");

        let output = capture_with("info", || {
            db.debug("db debug line");
            db.trace("db trace line");
            web.debug("web debug line");
            web.info("web info line");
        });

        assert!(output.contains("db debug line"), "{output}");
        assert!(!output.contains("db trace line"), "{output}");
        assert!(!output.contains("web debug line"), "{output}");
        assert!(output.contains("web info line"), "{output}");
    }

    #[test]
    fn logger_level_can_be_quieter_than_the_filter() {
        let registry = LoggerRegistry::new();
        let db = registry.get_logger("app.db");
        db.set_level(Some(Level::WARN));

        let output = capture_with("trace", || {
            db.info("db info line");
            db.warn("db warn line");
        });

        assert!(!output.contains("db info line"), "{output}");
        assert!(output.contains("db warn line"), "{output}");
    }
}
