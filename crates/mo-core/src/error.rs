//! Error types for observer inference.

use thiserror::Error;

use crate::observer::ObserverKind;

/// Errors raised by the top-level inference entry point.
#[derive(Debug, Error)]
pub enum ObserverError {
    #[error(transparent)]
    Config(#[from] mo_config::ConfigError),

    #[error("unknown observer type \"{name}\"")]
    UnknownObserver { name: String },

    #[error("no inference engine registered for observer type \"{kind}\"")]
    EngineUnavailable { kind: ObserverKind },

    #[error("confidence correction is not defined for alphabet size {nitem}")]
    UnsupportedAlphabet { nitem: usize },

    #[error("sequence is empty")]
    EmptySequence,

    #[error("invalid symbol {symbol} at trial {trial}: alphabet size is {nitem}")]
    InvalidSequence {
        trial: usize,
        symbol: usize,
        nitem: usize,
    },

    #[error("pattern space overflows: alphabet size {nitem} at order {order}")]
    PatternSpaceTooLarge { order: usize, nitem: usize },
}
