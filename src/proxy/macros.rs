/// The [`CallerContext`](crate::CallerContext) of the invoking module.
#[macro_export]
macro_rules! caller_context {
    () => {
        $crate::CallerContext::from_call_site(
            ::core::module_path!(),
            ::core::option_env!("CARGO_CRATE_NAME"),
            ::core::option_env!("CARGO_BIN_NAME"),
        )
    };
}

/// The logger of the invoking module, resolved through [`LOGGER`](crate::LOGGER).
#[macro_export]
macro_rules! logger {
    () => {
        $crate::LOGGER.resolve(&$crate::caller_context!())
    };
}

#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)+) => {
        $crate::logger!().trace(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        $crate::logger!().debug(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::logger!().info(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)+) => {
        $crate::logger!().warn(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::logger!().error(::core::format_args!($($arg)+))
    };
}
