//! Markov Observer option resolution and validation.
//!
//! This crate provides:
//! - The caller-facing [`Options`] map with case-insensitive keys
//! - One typed, eagerly-validated configuration struct per observer kind
//! - All defaults declared next to the struct they apply to

pub mod error;
pub mod fixed;
pub mod hmm;
pub mod options;
pub mod volatility;

pub use error::ConfigError;
pub use fixed::{FixedConfig, MemoryKind, PriorSpec};
pub use hmm::HmmConfig;
pub use options::{Options, OptionValue};
pub use volatility::VolatilityConfig;
