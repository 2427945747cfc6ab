//! Configuration errors.
//!
//! All option validation happens eagerly at resolution time, before any
//! inference runs; every rejected option maps to one of these variants.

use thiserror::Error;

/// Errors raised while resolving observer options.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("missing required option \"{key}\"")]
    MissingKey { key: &'static str },

    #[error("invalid value for option \"{key}\": {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("incomplete custom prior: expected {expected} patterns of length {arity}, found {found}")]
    IncompletePrior {
        expected: usize,
        arity: usize,
        found: usize,
    },
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key,
            message: message.into(),
        }
    }
}
