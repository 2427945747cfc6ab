//! Contracts for the external change-point inference engines.
//!
//! The hidden-Markov change-point models (coupled, uncoupled, and their
//! volatility-marginalized variants) are heavy inference procedures supplied
//! by collaborating crates. The dispatcher only needs their output: per
//! pattern, a per-trial discretized posterior over a probability grid, and
//! for the "+full" variants a posterior over the volatility grid as well.
//!
//! The uncoupled variants run one independent inference per (context, next
//! symbol) pair; since patterns are addressed by dense codes, that composite
//! keying is simply the pattern code and flows through normalization
//! untouched.

use mo_config::{HmmConfig, VolatilityConfig};

use crate::pattern::PatternSpace;

/// Discretized posteriors over a `resol`-point probability grid spanning
/// [0, 1], indexed by pattern code. Patterns the engine did not infer are
/// None; covered patterns hold one row of `resol` weights per trial.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPosteriors {
    pub resol: usize,
    pub dists: Vec<Option<Vec<Vec<f64>>>>,
}

impl GridPosteriors {
    pub fn new(resol: usize, space: PatternSpace) -> Self {
        Self {
            resol,
            dists: vec![None; space.n_patterns()],
        }
    }
}

/// Grid posteriors plus the marginal posterior over the volatility grid,
/// one distribution per trial.
#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityPosteriors {
    pub theta: GridPosteriors,
    pub volatility: Vec<Vec<f64>>,
}

/// A change-point inference engine with known volatility.
pub trait ChangePointModel {
    fn infer(&self, seq: &[usize], space: PatternSpace, config: &HmmConfig) -> GridPosteriors;
}

/// A change-point inference engine marginalizing over unknown volatility.
pub trait VolatilityModel {
    fn infer(
        &self,
        seq: &[usize],
        space: PatternSpace,
        config: &VolatilityConfig,
    ) -> VolatilityPosteriors;
}

/// Registry of available inference engines. Selecting an observer kind
/// whose engine slot is empty fails before any computation.
#[derive(Default)]
pub struct Engines {
    pub coupled: Option<Box<dyn ChangePointModel>>,
    pub uncoupled: Option<Box<dyn ChangePointModel>>,
    pub coupled_full: Option<Box<dyn VolatilityModel>>,
    pub uncoupled_full: Option<Box<dyn VolatilityModel>>,
}

impl Engines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coupled(mut self, engine: Box<dyn ChangePointModel>) -> Self {
        self.coupled = Some(engine);
        self
    }

    pub fn with_uncoupled(mut self, engine: Box<dyn ChangePointModel>) -> Self {
        self.uncoupled = Some(engine);
        self
    }

    pub fn with_coupled_full(mut self, engine: Box<dyn VolatilityModel>) -> Self {
        self.coupled_full = Some(engine);
        self
    }

    pub fn with_uncoupled_full(mut self, engine: Box<dyn VolatilityModel>) -> Self {
        self.uncoupled_full = Some(engine);
        self
    }
}
