//! Dirichlet distribution primitives for categorical transition posteriors.
//!
//! The sequence models track, per conditioning context, a Dirichlet posterior
//! over the probabilities of the next symbol:
//! - Prior: `p = (p_1..p_K) ~ Dirichlet(α_1..α_K)`
//! - Likelihood: categorical observations of the next symbol
//! - Posterior: `p | counts ~ Dirichlet(α_i + n_i)`
//!
//! Besides the usual moments, belief-updating metrics need the divergence
//! between successive posteriors and the differential entropy of the current
//! posterior, both in closed form:
//! ```text
//! KL(α‖β) = lnΓ(Σα) − lnΓ(Σβ) + Σ lnΓ(β_i) − Σ lnΓ(α_i)
//!           + Σ (α_i − β_i)·(ψ(α_i) − ψ(Σα))
//! H(α)    = ln B(α) + (Σα − K)·ψ(Σα) − Σ (α_i − 1)·ψ(α_i)
//! ```
//! All functions refuse invalid parameters (non-positive or NaN components)
//! by returning NaN; a non-positive parameter reaching these routines is a
//! logic error upstream, so debug builds assert.

use serde::{Deserialize, Serialize};

use super::stable::{digamma, log_gamma};

/// Parameters of a Dirichlet distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirichletParams {
    /// Concentration parameters (all must be > 0)
    pub alpha: Vec<f64>,
}

impl DirichletParams {
    /// Create new Dirichlet parameters with validation.
    ///
    /// Returns None if any parameter is non-positive, NaN, or if the vector is empty.
    pub fn new(alpha: Vec<f64>) -> Option<Self> {
        if alpha.is_empty() {
            return None;
        }
        for &a in &alpha {
            if a.is_nan() || a <= 0.0 {
                return None;
            }
        }
        Some(Self { alpha })
    }

    /// Create a symmetric Dirichlet with all α_i = value.
    pub fn symmetric(k: usize, value: f64) -> Option<Self> {
        if k == 0 || value.is_nan() || value <= 0.0 {
            return None;
        }
        Some(Self {
            alpha: vec![value; k],
        })
    }

    /// Create a uniform Dirichlet prior with all α_i = 1.
    pub fn uniform(k: usize) -> Option<Self> {
        Self::symmetric(k, 1.0)
    }

    /// Number of categories K.
    pub fn k(&self) -> usize {
        self.alpha.len()
    }

    /// Sum of all concentration parameters: α_0 = Σ_i α_i.
    pub fn concentration(&self) -> f64 {
        self.alpha.iter().sum()
    }

    /// Mean of the Dirichlet distribution: E[p_i] = α_i / α_0.
    pub fn mean(&self) -> Vec<f64> {
        let sum = self.concentration();
        self.alpha.iter().map(|a| a / sum).collect()
    }

    /// Variance of component i: Var[p_i] = α_i(α_0 - α_i) / (α_0²(α_0+1)).
    pub fn variance(&self, i: usize) -> f64 {
        if i >= self.alpha.len() {
            return f64::NAN;
        }
        let sum = self.concentration();
        let a_i = self.alpha[i];
        (a_i * (sum - a_i)) / (sum * sum * (sum + 1.0))
    }

    /// Marginal standard deviation of component i.
    pub fn sd(&self, i: usize) -> f64 {
        self.variance(i).sqrt()
    }

    /// Mode of the Dirichlet density: (α_i - 1) / (α_0 - K).
    ///
    /// The interior mode exists only when every α_i > 1; otherwise the density
    /// peaks on the simplex boundary and this returns None.
    pub fn mode(&self) -> Option<Vec<f64>> {
        if !self.alpha.iter().all(|&a| a > 1.0) {
            return None;
        }
        let denom = self.concentration() - self.k() as f64;
        Some(self.alpha.iter().map(|a| (a - 1.0) / denom).collect())
    }

    /// KL divergence from `other` to `self`: KL(self ‖ other).
    pub fn kl_from(&self, other: &DirichletParams) -> f64 {
        kl_divergence(&self.alpha, &other.alpha)
    }

    /// Differential entropy of the distribution.
    pub fn entropy(&self) -> f64 {
        entropy(&self.alpha)
    }
}

fn valid_params(alpha: &[f64]) -> bool {
    !alpha.is_empty() && alpha.iter().all(|&a| !a.is_nan() && a > 0.0)
}

/// Compute log of the multivariate beta function.
///
/// log B(α) = Σ_i lgamma(α_i) - lgamma(Σ_i α_i)
pub fn log_multivariate_beta(alpha: &[f64]) -> f64 {
    if !valid_params(alpha) {
        return f64::NAN;
    }
    let sum: f64 = alpha.iter().sum();
    let log_sum_gamma: f64 = alpha.iter().map(|&a| log_gamma(a)).sum();
    log_sum_gamma - log_gamma(sum)
}

/// KL divergence KL(Dir(α) ‖ Dir(β)) between two Dirichlet distributions
/// over the same support, in nats.
///
/// Both parameter vectors must be strictly positive and of equal length;
/// anything else returns NaN (and asserts in debug builds).
pub fn kl_divergence(alpha: &[f64], beta: &[f64]) -> f64 {
    debug_assert!(valid_params(alpha), "non-positive Dirichlet parameter");
    debug_assert!(valid_params(beta), "non-positive Dirichlet parameter");
    debug_assert_eq!(alpha.len(), beta.len());
    if !valid_params(alpha) || !valid_params(beta) || alpha.len() != beta.len() {
        return f64::NAN;
    }

    let alpha_0: f64 = alpha.iter().sum();
    let beta_0: f64 = beta.iter().sum();
    let psi_alpha_0 = digamma(alpha_0);

    let mut d = log_gamma(alpha_0) - log_gamma(beta_0);
    for (&a, &b) in alpha.iter().zip(beta.iter()) {
        d += log_gamma(b) - log_gamma(a);
        d += (a - b) * (digamma(a) - psi_alpha_0);
    }
    d
}

/// Differential entropy of Dir(α), in nats.
pub fn entropy(alpha: &[f64]) -> f64 {
    debug_assert!(valid_params(alpha), "non-positive Dirichlet parameter");
    if !valid_params(alpha) {
        return f64::NAN;
    }

    let alpha_0: f64 = alpha.iter().sum();
    let k = alpha.len() as f64;
    let mut h = log_multivariate_beta(alpha) + (alpha_0 - k) * digamma(alpha_0);
    for &a in alpha {
        h -= (a - 1.0) * digamma(a);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    fn vec_approx_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b.iter()).all(|(&x, &y)| approx_eq(x, y, tol))
    }

    // =======================================================================
    // DirichletParams tests
    // =======================================================================

    #[test]
    fn params_new_valid() {
        let p = DirichletParams::new(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(p.k(), 3);
        assert!(approx_eq(p.concentration(), 6.0, 1e-12));
    }

    #[test]
    fn params_new_invalid() {
        assert!(DirichletParams::new(vec![]).is_none());
        assert!(DirichletParams::new(vec![0.0, 1.0]).is_none());
        assert!(DirichletParams::new(vec![-1.0, 1.0]).is_none());
        assert!(DirichletParams::new(vec![f64::NAN, 1.0]).is_none());
    }

    #[test]
    fn params_mean_and_variance() {
        let p = DirichletParams::new(vec![1.0, 2.0, 3.0]).unwrap();
        assert!(vec_approx_eq(
            &p.mean(),
            &[1.0 / 6.0, 2.0 / 6.0, 3.0 / 6.0],
            1e-12
        ));

        let q = DirichletParams::new(vec![2.0, 3.0, 5.0]).unwrap();
        // Var[p_0] = 2 * (10-2) / (100 * 11) = 16/1100
        assert!(approx_eq(q.variance(0), 16.0 / 1100.0, 1e-12));
        assert!(approx_eq(q.sd(0), (16.0f64 / 1100.0).sqrt(), 1e-12));
    }

    #[test]
    fn params_mode_interior() {
        let p = DirichletParams::new(vec![3.0, 2.0]).unwrap();
        // mode = [(3-1)/(5-2), (2-1)/(5-2)] = [2/3, 1/3]
        let mode = p.mode().unwrap();
        assert!(vec_approx_eq(&mode, &[2.0 / 3.0, 1.0 / 3.0], 1e-12));
    }

    #[test]
    fn params_mode_undefined_on_boundary() {
        assert!(DirichletParams::uniform(2).unwrap().mode().is_none());
        assert!(DirichletParams::new(vec![0.5, 3.0])
            .unwrap()
            .mode()
            .is_none());
    }

    // =======================================================================
    // log_multivariate_beta tests
    // =======================================================================

    #[test]
    fn log_multivariate_beta_k2_matches_beta() {
        use super::super::stable::log_beta;
        let log_mb = log_multivariate_beta(&[2.0, 3.0]);
        assert!(approx_eq(log_mb, log_beta(2.0, 3.0), 1e-10));
    }

    #[test]
    fn log_multivariate_beta_symmetric() {
        // B([1, 1, 1]) = Γ(1)³/Γ(3) = 1/2
        let log_mb = log_multivariate_beta(&[1.0, 1.0, 1.0]);
        assert!(approx_eq(log_mb, 0.5f64.ln(), 1e-10));
    }

    #[test]
    fn log_multivariate_beta_invalid() {
        assert!(log_multivariate_beta(&[]).is_nan());
        assert!(log_multivariate_beta(&[0.0, 1.0]).is_nan());
    }

    // =======================================================================
    // KL divergence tests
    // =======================================================================

    #[test]
    fn kl_identity_is_zero() {
        let alpha = [0.5, 1.0, 7.25];
        assert!(approx_eq(kl_divergence(&alpha, &alpha), 0.0, 1e-10));
    }

    #[test]
    fn kl_is_nonnegative() {
        let alpha = [2.0, 3.0];
        let beta = [1.0, 4.5];
        assert!(kl_divergence(&alpha, &beta) >= 0.0);
        assert!(kl_divergence(&beta, &alpha) >= 0.0);
    }

    #[test]
    fn kl_beta_golden_value() {
        // KL(Dir(2,1) ‖ Dir(1,1)): lnΓ(3) − lnΓ(2) + lnΓ(1)+lnΓ(1)
        //   − lnΓ(2) − lnΓ(1) + 1·(ψ(2) − ψ(3)) + 0
        // = ln 2 + (ψ(2) − ψ(3)) = ln 2 − 1/2
        let d = kl_divergence(&[2.0, 1.0], &[1.0, 1.0]);
        assert!(approx_eq(d, 2.0f64.ln() - 0.5, 1e-10));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn kl_invalid_params_nan() {
        assert!(kl_divergence(&[0.0, 1.0], &[1.0, 1.0]).is_nan());
        assert!(kl_divergence(&[1.0, 1.0], &[1.0]).is_nan());
    }

    // =======================================================================
    // Entropy tests
    // =======================================================================

    #[test]
    fn entropy_uniform_is_neg_log_factorial() {
        // Dir(1,..,1) is uniform over the simplex: H = ln B(α) = −ln (K−1)!
        for k in 2..=5usize {
            let alpha = vec![1.0; k];
            let expected = -((1..k).product::<usize>() as f64).ln();
            assert!(
                approx_eq(entropy(&alpha), expected, 1e-10),
                "k={k}: {} vs {expected}",
                entropy(&alpha)
            );
        }
    }

    #[test]
    fn entropy_decreases_with_concentration() {
        // Sharper posteriors carry less uncertainty.
        let diffuse = entropy(&[2.0, 2.0]);
        let sharp = entropy(&[20.0, 20.0]);
        assert!(sharp < diffuse);
    }
}
