//! The logging subsystem the proxy forwards to: a name-keyed logger registry,
//! the logger instances themselves, and the process-wide configuration entry
//! points (`dict_config`, `file_config`, `listen`, `stop_listening`).
//!
//! Emission and formatting are left to `tracing` and `tracing-subscriber`.

mod config;
pub use self::config::*;

mod listener;
pub use listener::{ConfigListener, DEFAULT_LOGGING_CONFIG_PORT, Verifier};

mod logger;
pub use logger::*;

mod manager;
pub use manager::*;

mod registry;
pub use registry::*;

mod subscriber;
use subscriber::FilterReloader;
