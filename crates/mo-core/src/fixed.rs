//! Closed-form Dirichlet-multinomial posterior for the fixed observer.
//!
//! Per context c and trial t, the posterior over the next symbol is
//! `Dirichlet(α)` with `α_s = count[(c,s)][t] + prior[(c,s)]`:
//! ```text
//! mean_s = α_s / α_0
//! Var_s  = α_s (α_0 − α_s) / (α_0² (α_0 + 1))
//! MAP_s  = (α_s − 1) / (α_0 − K)   when every α_s > 1
//! ```
//! Where the interior mode does not exist (any α_s ≤ 1), the MAP is an
//! explicit None rather than a substituted mean.

use crate::count::{CountTable, PriorTable};
use crate::posterior::{PatternPosterior, PosteriorEstimate, Posteriors};

/// Compute the per-pattern posterior record from counts and prior.
pub fn fixed_posterior(count: &CountTable, prior: &PriorTable) -> Posteriors {
    let space = count.space();
    let t_len = count.len();
    let nitem = space.nitem();
    let k = nitem as f64;

    let mut out = Posteriors::new(space);
    let mut alpha = vec![0.0; nitem];

    for context in space.contexts() {
        let codes: Vec<usize> = (0..nitem).map(|s| space.pattern_code(context, s)).collect();

        let mut means = vec![vec![0.0; t_len]; nitem];
        let mut sds = vec![vec![0.0; t_len]; nitem];
        let mut maps = vec![vec![None; t_len]; nitem];

        for t in 0..t_len {
            let mut alpha_0 = 0.0;
            for (s, &code) in codes.iter().enumerate() {
                alpha[s] = count.get(code, t) + prior.get(code);
                alpha_0 += alpha[s];
            }
            let has_mode = alpha.iter().all(|&a| a > 1.0);

            for s in 0..nitem {
                let a = alpha[s];
                means[s][t] = a / alpha_0;
                let var = (a * (alpha_0 - a)) / (alpha_0 * alpha_0 * (alpha_0 + 1.0));
                sds[s][t] = var.max(0.0).sqrt();
                if has_mode {
                    maps[s][t] = Some((a - 1.0) / (alpha_0 - k));
                }
            }
        }

        for (s, &code) in codes.iter().enumerate() {
            out.insert(
                code,
                PatternPosterior {
                    mean: std::mem::take(&mut means[s]),
                    sd: std::mem::take(&mut sds[s]),
                    estimate: PosteriorEstimate::Map(std::mem::take(&mut maps[s])),
                },
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count::count_patterns;
    use crate::pattern::PatternSpace;
    use mo_config::MemoryKind;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn binary_default_prior_closed_form() {
        // Symmetric weight-1 prior over two symbols: mean_0[t] = (c_0 + 0.5)/(t + 2)
        let space = PatternSpace::new(0, 2).unwrap();
        let counts = count_patterns(&[0, 1, 0, 1, 0, 1], space, MemoryKind::Perfect);
        let prior = PriorTable::symmetric(space, 1.0);
        let post = fixed_posterior(&counts, &prior);

        let p0 = post.get(0).unwrap();
        assert!(approx_eq(p0.mean[0], 1.5 / 2.0, 1e-12));
        assert!(approx_eq(p0.mean[5], 3.5 / 7.0, 1e-12));

        let p1 = post.get(1).unwrap();
        for t in 0..6 {
            assert!(approx_eq(p0.mean[t] + p1.mean[t], 1.0, 1e-12));
        }
    }

    #[test]
    fn sd_matches_dirichlet_marginal() {
        let space = PatternSpace::new(0, 2).unwrap();
        let counts = count_patterns(&[0, 0, 1], space, MemoryKind::Perfect);
        let prior = PriorTable::symmetric(space, 1.0);
        let post = fixed_posterior(&counts, &prior);

        // After t=2: alpha = [2.5, 1.5], alpha_0 = 4
        let var = 2.5 * 1.5 / (16.0 * 5.0);
        assert!(approx_eq(post.get(0).unwrap().sd[2], var.sqrt(), 1e-12));
    }

    #[test]
    fn map_is_none_until_all_parameters_exceed_one() {
        let space = PatternSpace::new(0, 2).unwrap();
        let counts = count_patterns(&[0, 1, 0, 1], space, MemoryKind::Perfect);
        let prior = PriorTable::symmetric(space, 1.0);
        let post = fixed_posterior(&counts, &prior);

        let PosteriorEstimate::Map(maps) = &post.get(0).unwrap().estimate else {
            panic!("fixed posterior must carry MAP estimates");
        };
        // alpha at t=0: [1.5, 0.5] -> no interior mode
        assert!(maps[0].is_none());
        // alpha at t=1: [1.5, 1.5] -> still a boundary case at 1.5 > 1, mode exists
        let m1 = maps[1].unwrap();
        assert!(approx_eq(m1, 0.5, 1e-12));
        // alpha at t=3: [2.5, 2.5] -> mode (2.5-1)/(5-2) = 0.5
        assert!(approx_eq(maps[3].unwrap(), 0.5, 1e-12));
    }

    #[test]
    fn every_pattern_is_covered() {
        let space = PatternSpace::new(1, 3).unwrap();
        let counts = count_patterns(&[0, 1, 2, 0], space, MemoryKind::Perfect);
        let prior = PriorTable::symmetric(space, 1.0);
        let post = fixed_posterior(&counts, &prior);
        assert_eq!(post.iter().count(), space.n_patterns());
    }
}
