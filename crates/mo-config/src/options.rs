//! Caller-facing options map.
//!
//! Keys are normalized to lowercase on insertion, so `"Decay"` and `"decay"`
//! address the same entry. Values are loosely typed at this layer; the typed
//! configuration structs pull them out and validate them eagerly.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

/// Option keys the resolvers understand. Anything else is ignored with a
/// warning rather than rejected, so callers can share one map across kinds.
pub const RECOGNIZED_KEYS: &[&str] = &[
    "decay",
    "window",
    "prior_weight",
    "custom_prior",
    "p_c",
    "resol",
    "grid_nu",
    "prior_nu",
];

/// A single option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// A real-valued parameter (decay factor, volatility, prior weight).
    Scalar(f64),
    /// An integral parameter (window length, grid resolution).
    Integer(u64),
    /// A grid of real values (volatility grid, volatility prior).
    Grid(Vec<f64>),
    /// A custom per-pattern pseudo-count table, keyed by the full
    /// (order+1)-length symbol pattern.
    Prior(HashMap<Vec<usize>, f64>),
}

/// Options map with case-insensitive keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: BTreeMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an option, lowercasing the key. Unrecognized keys are kept but
    /// flagged, matching the resolvers' ignore-with-warning contract.
    pub fn set(&mut self, key: &str, value: OptionValue) {
        let key = key.to_lowercase();
        if !RECOGNIZED_KEYS.contains(&key.as_str()) {
            warn!(key = %key, "ignoring unrecognized option");
        }
        self.entries.insert(key, value);
    }

    pub fn with(mut self, key: &str, value: OptionValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn with_scalar(self, key: &str, value: f64) -> Self {
        self.with(key, OptionValue::Scalar(value))
    }

    pub fn with_integer(self, key: &str, value: u64) -> Self {
        self.with(key, OptionValue::Integer(value))
    }

    pub fn with_grid(self, key: &str, values: Vec<f64>) -> Self {
        self.with(key, OptionValue::Grid(values))
    }

    pub fn with_prior(self, key: &str, prior: HashMap<Vec<usize>, f64>) -> Self {
        self.with(key, OptionValue::Prior(prior))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_lowercase())
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(&key.to_lowercase())
    }

    /// Read a scalar option; integers coerce losslessly.
    pub fn scalar(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            OptionValue::Scalar(v) => Some(*v),
            OptionValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Read an integral option; whole-valued scalars coerce.
    pub fn integer(&self, key: &str) -> Option<u64> {
        match self.get(key)? {
            OptionValue::Integer(v) => Some(*v),
            OptionValue::Scalar(v) if v.fract() == 0.0 && *v >= 0.0 => Some(*v as u64),
            _ => None,
        }
    }

    pub fn grid(&self, key: &str) -> Option<&[f64]> {
        match self.get(key)? {
            OptionValue::Grid(v) => Some(v),
            _ => None,
        }
    }

    pub fn prior(&self, key: &str) -> Option<&HashMap<Vec<usize>, f64>> {
        match self.get(key)? {
            OptionValue::Prior(p) => Some(p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let opts = Options::new().with_scalar("Decay", 0.5);
        assert!(opts.contains("decay"));
        assert!(opts.contains("DECAY"));
        assert_eq!(opts.scalar("decay"), Some(0.5));
    }

    #[test]
    fn later_insertion_wins() {
        let opts = Options::new()
            .with_scalar("p_c", 0.1)
            .with_scalar("P_C", 0.2);
        assert_eq!(opts.scalar("p_c"), Some(0.2));
    }

    #[test]
    fn scalar_integer_coercion() {
        let opts = Options::new()
            .with_integer("window", 16)
            .with_scalar("resol", 20.0);
        assert_eq!(opts.scalar("window"), Some(16.0));
        assert_eq!(opts.integer("resol"), Some(20));

        let fractional = Options::new().with_scalar("resol", 10.5);
        assert_eq!(fractional.integer("resol"), None);
    }

    #[test]
    fn typed_getters_reject_mismatched_values() {
        let opts = Options::new().with_grid("grid_nu", vec![0.5, 0.25]);
        assert_eq!(opts.scalar("grid_nu"), None);
        assert!(opts.grid("grid_nu").is_some());
        assert!(opts.prior("grid_nu").is_none());
    }
}
