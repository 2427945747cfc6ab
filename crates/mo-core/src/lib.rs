//! Trial-by-trial Bayesian ideal-observer inference for discrete sequences.
//!
//! Given a sequence of symbol codes, the engine computes the posterior over
//! the generative transition statistics under one of five observer models,
//! then derives the quantities experimenters actually consume: per-trial
//! Shannon surprise, Dirichlet parameter trajectories, belief-update (KL)
//! surprise, confidence-corrected surprise, and one-step-ahead predictions
//! for binary sequences.
//!
//! The fixed observer is computed in closed form here; the change-point
//! observers delegate the heavy posterior inference to engines registered
//! behind the traits in [`changepoint`] and share the same derived-metric
//! pipeline.

pub mod changepoint;
pub mod count;
pub mod error;
pub mod fixed;
pub mod metrics;
pub mod normalize;
pub mod observer;
pub mod pattern;
pub mod posterior;
pub mod predict;
pub mod sequence;

pub use changepoint::{ChangePointModel, Engines, GridPosteriors, VolatilityModel, VolatilityPosteriors};
pub use count::{count_patterns, CountTable, PriorTable};
pub use error::ObserverError;
pub use observer::{ideal_observer, FixedDiagnostics, ObserverKind, ObserverOutput};
pub use pattern::PatternSpace;
pub use posterior::{PatternPosterior, PosteriorEstimate, Posteriors};
pub use predict::Predictions;
