//! One-step-ahead predictions for binary sequences.
//!
//! Two forecasts per trial, both about the probability of observing
//! symbol 0:
//! - `current[t]`: the forecast for trial t+1, given all observations up to
//!   and including t.
//! - `prior[t]`: the forecast that was available before observing trial t,
//!   i.e. the previous trial's current forecast; trial 0 falls back to the
//!   base prior.
//!
//! For order > 0 the current forecast reads the posterior of the pattern
//! (trailing `order` symbols ending at t, next symbol 0). A pause sentinel
//! anywhere in that trailing window makes the context undefined, so the
//! trial reverts to the base prior instead of a context lookup.

use serde::{Deserialize, Serialize};
use tracing::warn;

use mo_math::DirichletParams;

use crate::posterior::Posteriors;
use crate::sequence::is_pause;

/// Per-trial predictive probability of symbol 0, with uncertainty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictions {
    pub current_p0: Vec<f64>,
    pub current_sd_p0: Vec<f64>,
    pub prior_p0: Vec<f64>,
    pub prior_sd_p0: Vec<f64>,
}

/// Generate predictions for a binary sequence from the per-pattern
/// posterior records and the base prior over the first symbol.
pub fn generate_predictions(
    seq: &[usize],
    posteriors: &Posteriors,
    base_prior: &DirichletParams,
) -> Predictions {
    let space = posteriors.space();
    let order = space.order();
    let nitem = space.nitem();
    let t_len = seq.len();

    let prior_p0 = base_prior.mean()[0];
    let prior_sd_p0 = base_prior.sd(0);

    let mut current_p0 = vec![prior_p0; t_len];
    let mut current_sd_p0 = vec![prior_sd_p0; t_len];

    if order == 0 {
        // Single empty context; pattern (0) has code 0.
        if let Some(record) = posteriors.get(0) {
            current_p0.copy_from_slice(&record.mean);
            current_sd_p0.copy_from_slice(&record.sd);
        } else {
            warn!("posterior output does not cover symbol 0; predictions stay at the prior");
        }
    } else {
        for t in order..t_len {
            let window = &seq[t - order + 1..=t];
            if window.iter().any(|&s| is_pause(s, nitem)) {
                continue; // context spans a pause, keep the prior fill
            }
            let Some(context) = space.encode_context(window) else {
                continue;
            };
            let code = space.pattern_code(context, 0);
            if let Some(record) = posteriors.get(code) {
                current_p0[t] = record.mean[t];
                current_sd_p0[t] = record.sd[t];
            } else {
                warn!(trial = t, "pattern not covered by posterior output; prediction stays at the prior");
            }
        }
    }

    let mut prior_pred_p0 = vec![prior_p0; t_len];
    let mut prior_pred_sd_p0 = vec![prior_sd_p0; t_len];
    for t in 1..t_len {
        prior_pred_p0[t] = current_p0[t - 1];
        prior_pred_sd_p0[t] = current_sd_p0[t - 1];
    }

    Predictions {
        current_p0,
        current_sd_p0,
        prior_p0: prior_pred_p0,
        prior_sd_p0: prior_pred_sd_p0,
    }
}
