//! Normalization of grid posteriors into the uniform output record.

use crate::changepoint::GridPosteriors;
use crate::pattern::PatternSpace;
use crate::posterior::{PatternPosterior, PosteriorEstimate, Posteriors};

/// Evenly spaced probability grid over [0, 1] with `resol` points.
pub fn probability_grid(resol: usize) -> Vec<f64> {
    debug_assert!(resol >= 2);
    let step = 1.0 / (resol - 1) as f64;
    (0..resol).map(|i| i as f64 * step).collect()
}

/// Convert discretized grid posteriors into mean/SD records, retaining the
/// full distribution for variants that report volatility.
///
/// Per trial: `mean = Σ dist_i · grid_i`, `Var = Σ dist_i · grid_i² − mean²`
/// (clamped at zero against rounding), `SD = √Var`.
pub fn normalize_grid(grid: GridPosteriors, space: PatternSpace) -> Posteriors {
    let pgrid = probability_grid(grid.resol);
    let mut out = Posteriors::new(space);

    for (pattern, dist) in grid.dists.into_iter().enumerate() {
        let Some(dist) = dist else {
            continue;
        };
        let t_len = dist.len();
        let mut mean = vec![0.0; t_len];
        let mut sd = vec![0.0; t_len];

        for (t, weights) in dist.iter().enumerate() {
            debug_assert_eq!(weights.len(), pgrid.len());
            let mut m = 0.0;
            let mut m2 = 0.0;
            for (&w, &g) in weights.iter().zip(pgrid.iter()) {
                m += w * g;
                m2 += w * g * g;
            }
            mean[t] = m;
            sd[t] = (m2 - m * m).max(0.0).sqrt();
        }

        out.insert(
            pattern,
            PatternPosterior {
                mean,
                sd,
                estimate: PosteriorEstimate::Dist(dist),
            },
        );
    }

    out
}
