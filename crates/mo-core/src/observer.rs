//! Top-level observer dispatch.
//!
//! Selects the inference strategy for the requested observer kind, runs it,
//! and lifts the result into the common output contract: per-pattern
//! posterior records, per-trial surprise, predictions for binary alphabets,
//! fixed-observer diagnostics, and the volatility posterior for the
//! marginalizing variants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use mo_config::{FixedConfig, HmmConfig, Options, VolatilityConfig};
use mo_math::DirichletParams;

use crate::changepoint::Engines;
use crate::count::{count_patterns, CountTable, PriorTable};
use crate::error::ObserverError;
use crate::fixed::fixed_posterior;
use crate::metrics;
use crate::metrics::AlphaTable;
use crate::normalize::normalize_grid;
use crate::pattern::PatternSpace;
use crate::posterior::Posteriors;
use crate::predict::{generate_predictions, Predictions};
use crate::sequence;

/// The five supported observer models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObserverKind {
    /// Closed-form Dirichlet-multinomial observer with perfect, leaky, or
    /// windowed counts.
    #[serde(rename = "fixed")]
    Fixed,
    /// Change-point observer with coupled transitions and known volatility.
    #[serde(rename = "hmm")]
    Hmm,
    /// Change-point observer with independently changing transitions.
    #[serde(rename = "hmm_uncoupled")]
    HmmUncoupled,
    /// Coupled change-point observer marginalizing over volatility.
    #[serde(rename = "hmm+full")]
    HmmFull,
    /// Uncoupled change-point observer marginalizing over volatility.
    #[serde(rename = "hmm_uncoupled+full")]
    HmmUncoupledFull,
}

impl ObserverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObserverKind::Fixed => "fixed",
            ObserverKind::Hmm => "hmm",
            ObserverKind::HmmUncoupled => "hmm_uncoupled",
            ObserverKind::HmmFull => "hmm+full",
            ObserverKind::HmmUncoupledFull => "hmm_uncoupled+full",
        }
    }
}

impl fmt::Display for ObserverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObserverKind {
    type Err = ObserverError;

    /// Case-insensitive parse; anything unknown is an explicit error, never
    /// a partial output.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(ObserverKind::Fixed),
            "hmm" => Ok(ObserverKind::Hmm),
            "hmm_uncoupled" => Ok(ObserverKind::HmmUncoupled),
            "hmm+full" => Ok(ObserverKind::HmmFull),
            "hmm_uncoupled+full" => Ok(ObserverKind::HmmUncoupledFull),
            _ => Err(ObserverError::UnknownObserver {
                name: s.to_string(),
            }),
        }
    }
}

/// Diagnostics only the fixed observer can produce in closed form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedDiagnostics {
    /// Per-pattern running counts.
    pub count: CountTable,
    /// Per-context Dirichlet parameter trajectories.
    pub alphas: AlphaTable,
    /// Shannon surprise (bits); identical to the top-level surprise.
    pub shannon: Vec<Option<f64>>,
    /// Belief-update surprise (nats), summed across contexts.
    pub bayesian: Vec<Option<f64>>,
    /// Confidence-corrected surprise.
    pub confidence_corrected: Vec<Option<f64>>,
}

/// The common output contract of every observer kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverOutput {
    pub kind: ObserverKind,
    pub order: usize,
    pub nitem: usize,
    /// Per-pattern posterior records.
    pub posteriors: Posteriors,
    /// Shannon surprise (bits) per trial; None before `order` observations
    /// or where the realized pattern is uncovered.
    pub surprise: Vec<Option<f64>>,
    /// One-step-ahead predictions; None unless the alphabet is binary.
    pub predictions: Option<Predictions>,
    /// Fixed-observer diagnostics; None for the change-point kinds.
    pub diagnostics: Option<FixedDiagnostics>,
    /// Posterior over the volatility grid; None unless marginalizing.
    pub volatility: Option<Vec<Vec<f64>>>,
}

/// Run the ideal observer of the requested kind over a sequence.
///
/// The alphabet size is inferred from the sequence when not supplied.
/// Configuration is resolved and validated before any computation, and all
/// intermediate tables live only for the duration of the call.
pub fn ideal_observer(
    seq: &[usize],
    kind: ObserverKind,
    order: usize,
    nitem: Option<usize>,
    options: &Options,
    engines: &Engines,
) -> Result<ObserverOutput, ObserverError> {
    if seq.is_empty() {
        return Err(ObserverError::EmptySequence);
    }
    let nitem = match nitem {
        Some(n) => n,
        None => {
            let inferred = sequence::infer_nitem(seq);
            debug!(nitem = inferred, "inferred alphabet size from sequence");
            inferred
        }
    };
    sequence::validate(seq, nitem)?;
    let space = PatternSpace::new(order, nitem)
        .ok_or(ObserverError::PatternSpaceTooLarge { order, nitem })?;
    debug!(kind = %kind, order, nitem, trials = seq.len(), "running ideal observer");

    let mut count_prior: Option<(CountTable, PriorTable)> = None;
    let mut volatility = None;

    let posteriors = match kind {
        ObserverKind::Fixed => {
            let config = FixedConfig::resolve(options, order, nitem)?;
            debug!(memory = ?config.memory, "resolved fixed-observer configuration");
            let count = count_patterns(seq, space, config.memory);
            let prior = PriorTable::from_spec(space, &config.prior);
            let posteriors = fixed_posterior(&count, &prior);
            count_prior = Some((count, prior));
            posteriors
        }
        ObserverKind::Hmm | ObserverKind::HmmUncoupled => {
            let config = HmmConfig::resolve(options)?;
            let slot = match kind {
                ObserverKind::Hmm => &engines.coupled,
                _ => &engines.uncoupled,
            };
            let engine = slot
                .as_deref()
                .ok_or(ObserverError::EngineUnavailable { kind })?;
            normalize_grid(engine.infer(seq, space, &config), space)
        }
        ObserverKind::HmmFull | ObserverKind::HmmUncoupledFull => {
            let config = VolatilityConfig::resolve(options)?;
            let slot = match kind {
                ObserverKind::HmmFull => &engines.coupled_full,
                _ => &engines.uncoupled_full,
            };
            let engine = slot
                .as_deref()
                .ok_or(ObserverError::EngineUnavailable { kind })?;
            let result = engine.infer(seq, space, &config);
            volatility = Some(result.volatility);
            normalize_grid(result.theta, space)
        }
    };

    let surprise = metrics::compute_surprise(seq, &posteriors);

    let predictions = if nitem == 2 {
        let base_prior = match (&count_prior, order) {
            (Some((_, prior)), 0) => DirichletParams {
                alpha: vec![prior.get(0), prior.get(1)],
            },
            _ => DirichletParams {
                alpha: vec![1.0, 1.0],
            },
        };
        Some(generate_predictions(seq, &posteriors, &base_prior))
    } else {
        None
    };

    let diagnostics = match count_prior {
        Some((count, prior)) => {
            let alphas = metrics::compute_alpha(&count, &prior);
            let bayesian = metrics::compute_bayesian(&alphas);
            let h0 = metrics::baseline_entropy(&alphas);
            let confidence_corrected =
                metrics::compute_confidence_corrected(&surprise, &bayesian, &h0, nitem)?;
            Some(FixedDiagnostics {
                count,
                alphas,
                shannon: surprise.clone(),
                bayesian,
                confidence_corrected,
            })
        }
        None => None,
    };

    Ok(ObserverOutput {
        kind,
        order,
        nitem,
        posteriors,
        surprise,
        predictions,
        diagnostics,
        volatility,
    })
}
