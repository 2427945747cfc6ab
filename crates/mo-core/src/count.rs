//! Running pattern counts and Dirichlet pseudo-count tables.

use serde::{Deserialize, Serialize};

use mo_config::{MemoryKind, PriorSpec};

use crate::pattern::PatternSpace;

/// Per-pattern running counts across the sequence.
///
/// `row(p)[t]` is the (possibly decayed or windowed) number of occurrences
/// of pattern `p` in trials up to and including `t`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountTable {
    space: PatternSpace,
    rows: Vec<Vec<f64>>,
}

impl CountTable {
    pub fn space(&self) -> PatternSpace {
        self.space
    }

    /// Sequence length T.
    pub fn len(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row(&self, pattern: usize) -> &[f64] {
        &self.rows[pattern]
    }

    pub fn get(&self, pattern: usize, trial: usize) -> f64 {
        self.rows[pattern][trial]
    }
}

/// Count every (order+1)-pattern across the sequence.
///
/// A pattern occurs at trial t when the window ending at t matches; the
/// first `order` trials cannot complete a window, and windows containing the
/// pause sentinel (or any out-of-alphabet symbol) never count. Memory
/// handling follows the resolved configuration: plain cumulative counts,
/// leaky counts `c[t] = f·c[t-1] + hit(t)`, or a trailing window of W
/// trials.
pub fn count_patterns(seq: &[usize], space: PatternSpace, memory: MemoryKind) -> CountTable {
    let t_len = seq.len();
    let order = space.order();

    let mut hits: Vec<Option<usize>> = vec![None; t_len];
    for t in 0..t_len {
        if t >= order {
            hits[t] = space.encode_pattern(&seq[t - order..=t]);
        }
    }

    let mut rows = vec![vec![0.0; t_len]; space.n_patterns()];
    for (pattern, row) in rows.iter_mut().enumerate() {
        match memory {
            MemoryKind::Perfect => {
                let mut c = 0.0;
                for t in 0..t_len {
                    if hits[t] == Some(pattern) {
                        c += 1.0;
                    }
                    row[t] = c;
                }
            }
            MemoryKind::Decay(factor) => {
                let mut c = 0.0;
                for t in 0..t_len {
                    c *= factor;
                    if hits[t] == Some(pattern) {
                        c += 1.0;
                    }
                    row[t] = c;
                }
            }
            MemoryKind::Window(window) => {
                let mut c = 0.0;
                for t in 0..t_len {
                    if hits[t] == Some(pattern) {
                        c += 1.0;
                    }
                    if t >= window && hits[t - window] == Some(pattern) {
                        c -= 1.0;
                    }
                    row[t] = c;
                }
            }
        }
    }

    CountTable { space, rows }
}

/// Per-pattern Dirichlet pseudo-counts, strictly positive by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorTable {
    space: PatternSpace,
    values: Vec<f64>,
}

impl PriorTable {
    /// Symmetric prior: total pseudo-count `weight` per context, spread
    /// uniformly over the possible next symbols.
    pub fn symmetric(space: PatternSpace, weight: f64) -> Self {
        let per_pattern = weight / space.nitem() as f64;
        Self {
            space,
            values: vec![per_pattern; space.n_patterns()],
        }
    }

    /// Materialize a resolved prior specification into the dense table.
    /// Custom tables arrive already validated complete and positive.
    pub fn from_spec(space: PatternSpace, spec: &PriorSpec) -> Self {
        match spec {
            PriorSpec::Symmetric(weight) => Self::symmetric(space, *weight),
            PriorSpec::Custom(table) => {
                let mut values = vec![0.0; space.n_patterns()];
                for (pattern, &weight) in table {
                    let code = space
                        .encode_pattern(pattern)
                        .expect("custom prior validated against the pattern space");
                    values[code] = weight;
                }
                Self { space, values }
            }
        }
    }

    pub fn space(&self) -> PatternSpace {
        self.space
    }

    pub fn get(&self, pattern: usize) -> f64 {
        self.values[pattern]
    }
}
