use super::LoggerRegistry;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Weak};
use tracing::Level;

pub const ROOT_LOGGER_NAME: &str = "root";

/// Target of events from a [`Logger`] with no explicit level up its chain.
/// The subscriber filter decides whether they are shown. The logger name
/// travels in the `logger` field.
pub const EVENT_TARGET: &str = "contextual_logger";

/// Target of events that already passed an explicit logger level. The
/// installed filter always lets it through at `trace`.
pub const LEVELED_EVENT_TARGET: &str = "contextual_logger::leveled";

const LEVEL_UNSET: u8 = 0;

macro_rules! emit {
    ($target:expr, $level:expr, $logger:expr, $message:expr) => {
        match $level {
            Level::ERROR => tracing::error!(target: $target, logger = $logger, "{}", $message),
            Level::WARN => tracing::warn!(target: $target, logger = $logger, "{}", $message),
            Level::INFO => tracing::info!(target: $target, logger = $logger, "{}", $message),
            Level::DEBUG => tracing::debug!(target: $target, logger = $logger, "{}", $message),
            _ => tracing::trace!(target: $target, logger = $logger, "{}", $message),
        }
    };
}

/// A named node of the logger hierarchy.
///
/// Instances are owned by a [`LoggerRegistry`] and handed out as `Arc<Logger>`,
/// so every lookup of the same name yields the same instance.
pub struct Logger {
    name: String,
    parent: Option<Arc<Logger>>,
    registry: Weak<LoggerRegistry>,
    level: AtomicU8,
    disabled: AtomicBool,
    placeholder: AtomicBool,
}

impl Logger {
    pub(crate) fn new(
        name: impl Into<String>,
        parent: Option<Arc<Logger>>,
        registry: Weak<LoggerRegistry>,
    ) -> Self {
        Self {
            name: name.into(),
            parent,
            registry,
            level: AtomicU8::new(LEVEL_UNSET),
            disabled: AtomicBool::new(false),
            placeholder: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<Logger>> {
        self.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none() && self.name == ROOT_LOGGER_NAME
    }

    /// The level set on this logger itself, `None` if it inherits.
    pub fn level(&self) -> Option<Level> {
        decode_level(self.level.load(Ordering::Acquire))
    }

    pub fn set_level(&self, level: Option<Level>) {
        self.level.store(encode_level(level), Ordering::Release);
    }

    /// First explicit level found walking up the parent chain. `None` leaves
    /// the decision to the installed subscriber filter.
    pub fn effective_level(&self) -> Option<Level> {
        let mut current = Some(self);
        while let Some(logger) = current {
            if let Some(level) = logger.level() {
                return Some(level);
            }
            current = logger.parent.as_deref();
        }
        None
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Acquire)
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::Release);
    }

    /// Whether this logger only exists as the ancestor of a looked-up name.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder.load(Ordering::Acquire)
    }

    pub(crate) fn set_placeholder(&self, placeholder: bool) {
        self.placeholder.store(placeholder, Ordering::Release);
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        if self.is_disabled() {
            return false;
        }
        // tracing orders levels by verbosity: TRACE > DEBUG > ... > ERROR
        match self.effective_level() {
            Some(threshold) => level <= threshold,
            None => true,
        }
    }

    pub fn log(&self, level: Level, message: impl fmt::Display) {
        if self.is_disabled() {
            return;
        }
        let logger = self.name.as_str();
        match self.effective_level() {
            Some(threshold) if level <= threshold => {
                emit!(LEVELED_EVENT_TARGET, level, logger, message)
            }
            Some(_) => {}
            None => emit!(EVENT_TARGET, level, logger, message),
        }
    }

    pub fn trace(&self, message: impl fmt::Display) {
        self.log(Level::TRACE, message);
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::DEBUG, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::INFO, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Level::WARN, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::ERROR, message);
    }

    /// Logger named `<self>.<suffix>`, or just `<suffix>` below the root.
    pub fn get_child(self: &Arc<Self>, suffix: &str) -> Arc<Logger> {
        let name = if self.is_root() {
            suffix.to_owned()
        } else {
            format!("{}.{}", self.name, suffix)
        };
        match self.registry.upgrade() {
            Some(registry) => registry.get_logger(&name),
            // registry is gone, only happens to loggers outliving a test registry
            None => Arc::new(Logger::new(name, Some(Arc::clone(self)), Weak::new())),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .field("level", &self.level())
            .field("disabled", &self.is_disabled())
            .finish()
    }
}

fn encode_level(level: Option<Level>) -> u8 {
    match level {
        None => LEVEL_UNSET,
        Some(Level::ERROR) => 1,
        Some(Level::WARN) => 2,
        Some(Level::INFO) => 3,
        Some(Level::DEBUG) => 4,
        Some(_) => 5,
    }
}

fn decode_level(raw: u8) -> Option<Level> {
    match raw {
        1 => Some(Level::ERROR),
        2 => Some(Level::WARN),
        3 => Some(Level::INFO),
        4 => Some(Level::DEBUG),
        5 => Some(Level::TRACE),
        _ => None,
    }
}
