//! Configuration for the volatility-marginalized ("+full") observers.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::options::Options;

fn default_resol() -> usize {
    10
}

/// Default volatility grid: 20 points geometrically spaced as 2^(-k/2).
fn default_grid_nu() -> Vec<f64> {
    (0..20).map(|k| 2f64.powf(-(k as f64) / 2.0)).collect()
}

fn uniform_prior(len: usize) -> Vec<f64> {
    vec![1.0 / len as f64; len]
}

/// Tolerance on the volatility prior summing to 1.
const PRIOR_SUM_TOL: f64 = 1e-6;

/// Resolved configuration for observers that marginalize over an unknown
/// volatility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityConfig {
    /// Number of bins discretizing the transition-probability axis.
    #[serde(default = "default_resol")]
    pub resol: usize,
    /// Candidate volatility values.
    #[serde(default = "default_grid_nu")]
    pub grid_nu: Vec<f64>,
    /// Prior probability over `grid_nu`; same length, sums to 1.
    pub prior_nu: Vec<f64>,
}

impl VolatilityConfig {
    /// Resolve and validate volatility-marginalization options. All keys are
    /// optional; defaults are a 10-bin probability grid, the geometric
    /// 2^(-k/2) volatility grid, and a uniform volatility prior.
    pub fn resolve(options: &Options) -> Result<Self, ConfigError> {
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

        let grid_nu = match options.get("grid_nu") {
            None => default_grid_nu(),
            Some(_) => {
                let grid = options
                    .grid("grid_nu")
                    .ok_or_else(|| ConfigError::invalid("grid_nu", "expected a grid of scalars"))?;
                if grid.is_empty() {
                    return Err(ConfigError::invalid("grid_nu", "grid is empty"));
                }
                if let Some(&bad) = grid.iter().find(|&&v| !v.is_finite() || v <= 0.0 || v > 1.0) {
                    return Err(ConfigError::invalid(
                        "grid_nu",
                        format!("volatility {bad} is outside (0, 1]"),
                    ));
                }
                grid.to_vec()
            }
        };

        let prior_nu = match options.get("prior_nu") {
            None => uniform_prior(grid_nu.len()),
            Some(_) => {
                let prior = options
                    .grid("prior_nu")
                    .ok_or_else(|| ConfigError::invalid("prior_nu", "expected a grid of scalars"))?;
                if prior.len() != grid_nu.len() {
                    return Err(ConfigError::invalid(
                        "prior_nu",
                        format!(
                            "length {} does not match the volatility grid length {}",
                            prior.len(),
                            grid_nu.len()
                        ),
                    ));
                }
                if let Some(&bad) = prior.iter().find(|&&v| !v.is_finite() || v < 0.0) {
                    return Err(ConfigError::invalid(
                        "prior_nu",
                        format!("probability {bad} is negative or non-finite"),
                    ));
                }
                let sum: f64 = prior.iter().sum();
                if (sum - 1.0).abs() > PRIOR_SUM_TOL {
                    return Err(ConfigError::invalid(
                        "prior_nu",
                        format!("probabilities sum to {sum}, expected 1"),
                    ));
                }
                prior.to_vec()
            }
        };

        Ok(VolatilityConfig {
            resol,
            grid_nu,
            prior_nu,
        })
    }
}
