use std::fmt;

/// Logger name reserved for the program's entry module.
pub const MAIN_MODULE: &str = "__main__";

/// The module a logging call was made from, already converted to a logger
/// name. Built per call by [`caller_context!`](crate::caller_context).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallerContext {
    logger_name: String,
}

impl CallerContext {
    pub fn main() -> Self {
        Self {
            logger_name: MAIN_MODULE.to_string(),
        }
    }

    /// `a::b::c` becomes `a.b.c`; `__main__` is kept as is.
    pub fn from_module_path(module_path: &str) -> Self {
        if module_path == MAIN_MODULE {
            return Self::main();
        }
        Self {
            logger_name: module_path.replace("::", "."),
        }
    }

    /// The root module of a binary crate is the entry module. Arguments are
    /// the call site's `module_path!()`, `CARGO_CRATE_NAME` and `CARGO_BIN_NAME`.
    pub fn from_call_site(
        module_path: &str,
        crate_name: Option<&str>,
        bin_name: Option<&str>,
    ) -> Self {
        match (crate_name, bin_name) {
            (Some(crate_name), Some(_)) if module_path == crate_name => Self::main(),
            _ => Self::from_module_path(module_path),
        }
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    pub fn is_main(&self) -> bool {
        self.logger_name == MAIN_MODULE
    }
}

impl fmt::Display for CallerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.logger_name)
    }
}
