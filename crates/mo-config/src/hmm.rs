//! Configuration for the change-point (HMM) observers with known volatility.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::options::Options;

fn default_resol() -> usize {
    10
}

/// Resolved configuration for the coupled and uncoupled change-point
/// observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HmmConfig {
    /// A priori change-point probability per trial.
    pub p_c: f64,
    /// Number of bins discretizing the transition-probability axis.
    #[serde(default = "default_resol")]
    pub resol: usize,
}

impl HmmConfig {
    /// Resolve and validate change-point options. `p_c` is required; `resol`
    /// defaults to 10.
    pub fn resolve(options: &Options) -> Result<Self, ConfigError> {
        let p_c = options
            .scalar("p_c")
            .ok_or(ConfigError::MissingKey { key: "p_c" })?;
        if !p_c.is_finite() || p_c <= 0.0 || p_c >= 1.0 {
            return Err(ConfigError::invalid(
                "p_c",
                format!("{p_c} is outside (0, 1)"),
            ));
        }

        let resol = match options.get("resol") {
            None => default_resol(),
            Some(_) => options
                .integer("resol")
                .ok_or_else(|| ConfigError::invalid("resol", "expected a nonnegative integer"))?
                as usize,
        };
        if resol < 2 {
            return Err(ConfigError::invalid(
                "resol",
                format!("{resol} bins cannot span [0, 1]"),
            ));
        }

        Ok(HmmConfig { p_c, resol })
    }
}
