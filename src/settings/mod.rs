//! Settings of the `contextual-logger` binary. The `[log]` section is a
//! [`LogConfig`](crate::logger::LogConfig) handed to `LOGGER.dict_config`.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
