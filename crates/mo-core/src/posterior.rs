//! Uniform per-pattern posterior records.
//!
//! Whatever produced the raw posterior (closed-form moments or a
//! discretized grid), every pattern ends up with the same record shape:
//! per-trial mean and SD of the next-symbol probability, plus either the
//! MAP trajectory (closed form) or the retained grid distribution.
//! `mean[t]` and `sd[t]` reflect the posterior *after* observing trial t,
//! i.e. the forecast available for trial t+1.

use serde::{Deserialize, Serialize};

use crate::pattern::PatternSpace;

/// The point-estimate part of a posterior record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosteriorEstimate {
    /// Per-trial MAP estimate; None where the Dirichlet mode is undefined.
    Map(Vec<Option<f64>>),
    /// Per-trial discretized distribution over the probability grid.
    Dist(Vec<Vec<f64>>),
}

/// Posterior summary for one pattern, indexed by trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternPosterior {
    pub mean: Vec<f64>,
    pub sd: Vec<f64>,
    pub estimate: PosteriorEstimate,
}

/// Posterior records for every pattern the producing model covered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posteriors {
    space: PatternSpace,
    records: Vec<Option<PatternPosterior>>,
}

impl Posteriors {
    pub fn new(space: PatternSpace) -> Self {
        Self {
            records: vec![None; space.n_patterns()],
            space,
        }
    }

    pub fn space(&self) -> PatternSpace {
        self.space
    }

    pub fn insert(&mut self, pattern: usize, record: PatternPosterior) {
        self.records[pattern] = Some(record);
    }

    /// Record for a pattern code, if the producing model covered it.
    pub fn get(&self, pattern: usize) -> Option<&PatternPosterior> {
        self.records.get(pattern).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &PatternPosterior)> {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(code, rec)| rec.as_ref().map(|r| (code, r)))
    }
}
