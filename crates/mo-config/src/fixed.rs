//! Configuration for the fixed (no-change-point) Bayesian observer.

use std::collections::HashMap;

use crate::error::ConfigError;
use crate::options::Options;

fn default_prior_weight() -> f64 {
    1.0
}

/// How past observations are remembered when counting patterns.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    /// Plain cumulative counts over the whole sequence.
    Perfect,
    /// Each past observation's weight is multiplied by this factor per
    /// elapsed trial (leaky integration).
    Decay(f64),
    /// Only the trailing `window` trials contribute to the counts.
    Window(usize),
}

/// The Dirichlet prior over next-symbol probabilities.
#[derive(Debug, Clone, PartialEq)]
pub enum PriorSpec {
    /// Total pseudo-count `weight` per context, spread uniformly over the
    /// possible next symbols.
    Symmetric(f64),
    /// Explicit per-pattern pseudo-counts, keyed by the full
    /// (order+1)-length pattern. Validated complete and strictly positive.
    Custom(HashMap<Vec<usize>, f64>),
}

/// Resolved configuration for the fixed observer.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedConfig {
    pub prior: PriorSpec,
    pub memory: MemoryKind,
}

impl FixedConfig {
    /// Resolve and validate fixed-observer options for the given pattern
    /// space. `decay` and `window` are mutually exclusive, as are
    /// `custom_prior` and `prior_weight`.
    pub fn resolve(options: &Options, order: usize, nitem: usize) -> Result<Self, ConfigError> {
        let memory = resolve_memory(options)?;
        let prior = resolve_prior(options, order, nitem)?;
        Ok(FixedConfig { prior, memory })
    }
}

fn resolve_memory(options: &Options) -> Result<MemoryKind, ConfigError> {
    let has_decay = options.contains("decay");
    let has_window = options.contains("window");
    if has_decay && has_window {
        return Err(ConfigError::invalid(
            "decay",
            "mutually exclusive with \"window\"",
        ));
    }
    if has_decay {
        let decay = options
            .scalar("decay")
            .ok_or_else(|| ConfigError::invalid("decay", "expected a scalar"))?;
        if !decay.is_finite() || decay <= 0.0 || decay > 1.0 {
            return Err(ConfigError::invalid(
                "decay",
                format!("{decay} is outside (0, 1]"),
            ));
        }
        return Ok(MemoryKind::Decay(decay));
    }
    if has_window {
        let window = options
            .integer("window")
            .ok_or_else(|| ConfigError::invalid("window", "expected a nonnegative integer"))?;
        if window == 0 {
            return Err(ConfigError::invalid("window", "must be at least 1"));
        }
        return Ok(MemoryKind::Window(window as usize));
    }
    Ok(MemoryKind::Perfect)
}

fn resolve_prior(options: &Options, order: usize, nitem: usize) -> Result<PriorSpec, ConfigError> {
    let has_custom = options.contains("custom_prior");
    let has_weight = options.contains("prior_weight");
    if has_custom && has_weight {
        return Err(ConfigError::invalid(
            "custom_prior",
            "mutually exclusive with \"prior_weight\"",
        ));
    }

    if has_custom {
        let table = options
            .prior("custom_prior")
            .ok_or_else(|| ConfigError::invalid("custom_prior", "expected a pattern table"))?;
        validate_custom_prior(table, order, nitem)?;
        return Ok(PriorSpec::Custom(table.clone()));
    }

    if has_weight {
        let weight = options
            .scalar("prior_weight")
            .ok_or_else(|| ConfigError::invalid("prior_weight", "expected a scalar"))?;
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ConfigError::invalid(
                "prior_weight",
                format!("{weight} is not a positive pseudo-count"),
            ));
        }
        return Ok(PriorSpec::Symmetric(weight));
    }

    Ok(PriorSpec::Symmetric(default_prior_weight()))
}

/// A custom prior must assign a strictly positive pseudo-count to every
/// (order+1)-pattern over the alphabet, with no stray keys.
fn validate_custom_prior(
    table: &HashMap<Vec<usize>, f64>,
    order: usize,
    nitem: usize,
) -> Result<(), ConfigError> {
    let arity = order + 1;
    let expected = nitem
        .checked_pow(arity as u32)
        .ok_or_else(|| ConfigError::invalid("custom_prior", "pattern space overflows"))?;

    for (pattern, &weight) in table {
        if pattern.len() != arity {
            return Err(ConfigError::invalid(
                "custom_prior",
                format!("pattern {pattern:?} has length {}, expected {arity}", pattern.len()),
            ));
        }
        if let Some(&symbol) = pattern.iter().find(|&&s| s >= nitem) {
            return Err(ConfigError::invalid(
                "custom_prior",
                format!("pattern {pattern:?} contains symbol {symbol} outside the alphabet"),
            ));
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ConfigError::invalid(
                "custom_prior",
                format!("pattern {pattern:?} has non-positive pseudo-count {weight}"),
            ));
        }
    }

    if table.len() != expected {
        return Err(ConfigError::IncompletePrior {
            expected,
            arity,
            found: table.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symmetric_weight(config: &FixedConfig) -> f64 {
        match config.prior {
            PriorSpec::Symmetric(w) => w,
            PriorSpec::Custom(_) => panic!("expected symmetric prior"),
        }
    }

    #[test]
    fn defaults_are_perfect_memory_unit_prior() {
        let config = FixedConfig::resolve(&Options::new(), 0, 2).unwrap();
        assert_eq!(config.memory, MemoryKind::Perfect);
        assert_eq!(symmetric_weight(&config), 1.0);
    }

    #[test]
    fn decay_and_window_are_mutually_exclusive() {
        let opts = Options::new()
            .with_scalar("decay", 0.9)
            .with_integer("window", 10);
        let err = FixedConfig::resolve(&opts, 0, 2).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "decay", .. }));
    }

    #[test]
    fn decay_bounds_enforced() {
        for bad in [0.0, -0.5, 1.5, f64::NAN] {
            let opts = Options::new().with_scalar("decay", bad);
            assert!(FixedConfig::resolve(&opts, 0, 2).is_err(), "decay={bad}");
        }
        let opts = Options::new().with_scalar("decay", 1.0);
        let config = FixedConfig::resolve(&opts, 0, 2).unwrap();
        assert_eq!(config.memory, MemoryKind::Decay(1.0));
    }

    #[test]
    fn window_must_be_positive() {
        let opts = Options::new().with_integer("window", 0);
        assert!(FixedConfig::resolve(&opts, 0, 2).is_err());

        let opts = Options::new().with_integer("window", 16);
        let config = FixedConfig::resolve(&opts, 0, 2).unwrap();
        assert_eq!(config.memory, MemoryKind::Window(16));
    }

    #[test]
    fn prior_weight_resolves_symmetric() {
        let opts = Options::new().with_scalar("prior_weight", 2.5);
        let config = FixedConfig::resolve(&opts, 1, 3).unwrap();
        assert_eq!(symmetric_weight(&config), 2.5);
    }

    #[test]
    fn custom_prior_must_cover_every_pattern() {
        let mut table = HashMap::new();
        table.insert(vec![0], 0.5);
        let opts = Options::new().with_prior("custom_prior", table.clone());
        let err = FixedConfig::resolve(&opts, 0, 2).unwrap_err();
        assert_eq!(
            err,
            ConfigError::IncompletePrior {
                expected: 2,
                arity: 1,
                found: 1
            }
        );

        table.insert(vec![1], 1.5);
        let opts = Options::new().with_prior("custom_prior", table);
        let config = FixedConfig::resolve(&opts, 0, 2).unwrap();
        assert!(matches!(config.prior, PriorSpec::Custom(_)));
    }

    #[test]
    fn custom_prior_rejects_bad_entries() {
        // Symbol outside the alphabet
        let mut table = HashMap::new();
        table.insert(vec![0], 0.5);
        table.insert(vec![2], 0.5);
        let opts = Options::new().with_prior("custom_prior", table);
        assert!(FixedConfig::resolve(&opts, 0, 2).is_err());

        // Non-positive pseudo-count
        let mut table = HashMap::new();
        table.insert(vec![0], 0.5);
        table.insert(vec![1], 0.0);
        let opts = Options::new().with_prior("custom_prior", table);
        assert!(FixedConfig::resolve(&opts, 0, 2).is_err());

        // Wrong arity
        let mut table = HashMap::new();
        table.insert(vec![0, 0], 0.5);
        let opts = Options::new().with_prior("custom_prior", table);
        assert!(FixedConfig::resolve(&opts, 0, 2).is_err());
    }
}
