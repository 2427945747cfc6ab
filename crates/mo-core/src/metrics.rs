//! Derived metrics: surprise, alpha trajectories, belief-update surprise,
//! and confidence-corrected surprise.
//!
//! All of these condition on the posterior available *before* the observed
//! trial: surprise at trial t reads the predictive mean at t-1, and the
//! belief update at trial t compares the Dirichlet parameters at t against
//! those at t-1. Contexts are mutually exclusive, so KL divergence and
//! entropy sum across contexts per trial.

use serde::{Deserialize, Serialize};

use mo_math::dirichlet;

use crate::count::{CountTable, PriorTable};
use crate::error::ObserverError;
use crate::pattern::PatternSpace;
use crate::posterior::Posteriors;

/// Shannon surprise, in bits, per trial.
///
/// `surprise[t] = -log2(mean[t-1])` for the posterior record of the
/// realized (order+1)-pattern ending at t. Trials before `order` (and
/// trial 0), and trials whose realized pattern is not covered by the
/// posterior output, stay None.
pub fn compute_surprise(seq: &[usize], posteriors: &Posteriors) -> Vec<Option<f64>> {
    let space = posteriors.space();
    let order = space.order();
    let mut surprise = vec![None; seq.len()];

    for t in order.max(1)..seq.len() {
        let Some(code) = space.encode_pattern(&seq[t - order..=t]) else {
            continue;
        };
        let Some(record) = posteriors.get(code) else {
            continue;
        };
        surprise[t] = Some(-record.mean[t - 1].log2());
    }

    surprise
}

/// Per-context Dirichlet parameter trajectories.
///
/// `row(c)[t][s] = count[(c,s)][t] + prior[(c,s)]`: the live posterior
/// parameter vector over next symbols, for every context and trial.
/// Strictly positive by construction (counts ≥ 0, priors > 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlphaTable {
    space: PatternSpace,
    contexts: Vec<Vec<Vec<f64>>>,
}

impl AlphaTable {
    pub fn space(&self) -> PatternSpace {
        self.space
    }

    /// Sequence length T.
    pub fn len(&self) -> usize {
        self.contexts.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// T×nitem parameter matrix for one context.
    pub fn row(&self, context: usize) -> &[Vec<f64>] {
        &self.contexts[context]
    }
}

/// Materialize the alpha trajectories for every context.
pub fn compute_alpha(count: &CountTable, prior: &PriorTable) -> AlphaTable {
    let space = count.space();
    let t_len = count.len();
    let nitem = space.nitem();

    let contexts = space
        .contexts()
        .map(|context| {
            let rows: Vec<&[f64]> = (0..nitem)
                .map(|s| count.row(space.pattern_code(context, s)))
                .collect();
            let priors: Vec<f64> = (0..nitem)
                .map(|s| prior.get(space.pattern_code(context, s)))
                .collect();
            (0..t_len)
                .map(|t| (0..nitem).map(|s| rows[s][t] + priors[s]).collect())
                .collect()
        })
        .collect();

    AlphaTable { space, contexts }
}

/// Belief-update (Bayesian) surprise per trial, in nats.
///
/// For t ≥ 1, the sum across contexts of
/// `KL(Dir(alpha[c][t]) ‖ Dir(alpha[c][t-1]))`. Trial 0 has no predecessor
/// belief and stays None. Non-positive parameters are a logic error
/// upstream; the KL primitive asserts and refuses them.
pub fn compute_bayesian(alphas: &AlphaTable) -> Vec<Option<f64>> {
    let t_len = alphas.len();
    let mut out = vec![None; t_len];

    for t in 1..t_len {
        let mut total = 0.0;
        for context in alphas.space().contexts() {
            let row = alphas.row(context);
            total += dirichlet::kl_divergence(&row[t], &row[t - 1]);
        }
        out[t] = Some(total);
    }

    out
}

/// Baseline uncertainty per trial, in nats: the differential entropy of
/// each context's current Dirichlet posterior, summed across contexts.
pub fn baseline_entropy(alphas: &AlphaTable) -> Vec<f64> {
    (0..alphas.len())
        .map(|t| {
            alphas
                .space()
                .contexts()
                .map(|context| dirichlet::entropy(&alphas.row(context)[t]))
                .sum()
        })
        .collect()
}

/// Empirical bias term ln(p̂) of the confidence correction; defined only
/// for alphabet sizes 2 and 3.
fn bias_correction(nitem: usize) -> Result<f64, ObserverError> {
    let p_hat = match nitem {
        2 => 1.0 / 2.0,
        3 => 1.0 / 24.0,
        _ => return Err(ObserverError::UnsupportedAlphabet { nitem }),
    };
    Ok(p_hat.ln())
}

/// Confidence-corrected surprise: Shannon surprise plus belief-update
/// surprise, with the momentary posterior uncertainty subtracted out and
/// the alphabet-size bias term added. None wherever either ingredient is
/// not yet defined.
pub fn compute_confidence_corrected(
    shannon: &[Option<f64>],
    bayesian: &[Option<f64>],
    h0: &[f64],
    nitem: usize,
) -> Result<Vec<Option<f64>>, ObserverError> {
    let bias = bias_correction(nitem)?;
    Ok(shannon
        .iter()
        .zip(bayesian.iter())
        .zip(h0.iter())
        .map(|((&s, &b), &h)| match (s, b) {
            (Some(s), Some(b)) => Some(s + b - h + bias),
            _ => None,
        })
        .collect())
}
