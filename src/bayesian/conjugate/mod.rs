//! Beta-Binomial conjugate model.
//!
//! A Beta prior combined with a binomial likelihood yields a Beta posterior,
//! so the update is closed-form:
//! - Prior: Beta(α, β)
//! - Data: k successes in n trials
//! - Posterior: Beta(α + k, β + n − k)
//!
//! The model also provides the posterior density, CDF, summary statistics
//! and an exact credible interval from the inverse CDF.

use serde::Serialize;
use statrs::distribution::{Beta, ContinuousCDF};
use statrs::function::beta::ln_beta;

use super::curve::DensityCurve;
use super::prior::Prior;
use crate::primitives::ProbabilityGrid;
use crate::{PosteriorError, Result};

/// Beta-Binomial conjugate prior for Bernoulli/Binomial likelihood.
///
/// Models a probability parameter θ in the range `[0,1]` for binary outcomes
/// such as conversions.
///
/// # Mathematical Foundation
///
/// Given n trials with k successes:
/// - Prior: p(θ) = Beta(α, β) ∝ θ^(α-1) × (1-θ)^(β-1)
/// - Likelihood: p(k|θ,n) = Binomial(k|n,θ) ∝ θ^k × (1-θ)^(n-k)
/// - Posterior: p(θ|k,n) = Beta(α+k, β+n-k)
///
/// # Example
///
/// ```
/// use posterior_grid::bayesian::BetaBinomial;
///
/// // Start with uniform prior Beta(1, 1)
/// let mut model = BetaBinomial::uniform();
///
/// // 15 conversions out of 30 visitors
/// model.update(15, 30).unwrap();
///
/// // Posterior is Beta(16, 16)
/// assert_eq!(model.alpha(), 16.0);
/// assert_eq!(model.beta(), 16.0);
/// assert!((model.posterior_mean() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BetaBinomial {
    /// Shape parameter α (prior successes + 1)
    alpha: f64,
    /// Shape parameter β (prior failures + 1)
    beta: f64,
}

impl BetaBinomial {
    /// Creates a uniform prior Beta(1, 1).
    #[must_use]
    pub fn uniform() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }

    /// Creates Jeffrey's prior Beta(0.5, 0.5).
    ///
    /// Invariant under reparameterization. Its density is unbounded at 0
    /// and 1.
    #[must_use]
    pub fn jeffreys() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.5,
        }
    }

    /// Creates an informative prior Beta(α, β).
    ///
    /// # Arguments
    ///
    /// * `alpha` - Shape parameter α > 0 (prior successes + 1)
    /// * `beta` - Shape parameter β > 0 (prior failures + 1)
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if α or β is not a positive finite number.
    ///
    /// # Example
    ///
    /// ```
    /// use posterior_grid::bayesian::BetaBinomial;
    ///
    /// // Prior belief: 80% success rate worth 100 trials
    /// let prior = BetaBinomial::new(80.0, 20.0).unwrap();
    /// assert!((prior.posterior_mean() - 0.8).abs() < 1e-12);
    /// ```
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(alpha) || !valid(beta) {
            return Err(PosteriorError::invalid_argument(
                "alpha, beta",
                format!("({alpha}, {beta})"),
                "both finite and > 0",
            ));
        }
        Ok(Self { alpha, beta })
    }

    /// Returns the current α parameter.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the current β parameter.
    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Updates the posterior with `successes` out of `trials`.
    ///
    /// Sequential updates compose: updating with (7, 10) then (3, 5) equals
    /// one update with (10, 15).
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `successes > trials`. The model is left
    /// unchanged in that case.
    pub fn update(&mut self, successes: u64, trials: u64) -> Result<()> {
        if successes > trials {
            return Err(PosteriorError::invalid_argument(
                "successes",
                successes,
                &format!("<= trials ({trials})"),
            ));
        }
        let failures = trials - successes;
        #[allow(clippy::cast_precision_loss)]
        {
            self.alpha += successes as f64;
            self.beta += failures as f64;
        }
        Ok(())
    }

    /// Returns a copy updated with the given data.
    ///
    /// # Errors
    ///
    /// Same as [`BetaBinomial::update`].
    pub fn updated(mut self, successes: u64, trials: u64) -> Result<Self> {
        self.update(successes, trials)?;
        Ok(self)
    }

    /// Posterior mean E[θ|data] = α/(α+β).
    #[must_use]
    pub fn posterior_mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Posterior mode (MAP estimate) = (α-1)/(α+β-2).
    ///
    /// Returns `None` unless α > 1 and β > 1: otherwise the density peaks at
    /// a boundary or is U-shaped.
    #[must_use]
    pub fn posterior_mode(&self) -> Option<f64> {
        if self.alpha > 1.0 && self.beta > 1.0 {
            Some((self.alpha - 1.0) / (self.alpha + self.beta - 2.0))
        } else {
            None
        }
    }

    /// Posterior variance Var[θ|data] = αβ/[(α+β)²(α+β+1)].
    #[must_use]
    pub fn posterior_variance(&self) -> f64 {
        let sum = self.alpha + self.beta;
        (self.alpha * self.beta) / (sum * sum * (sum + 1.0))
    }

    /// Probability of success on the next trial, which for this model equals
    /// the posterior mean.
    #[must_use]
    pub fn posterior_predictive(&self) -> f64 {
        self.posterior_mean()
    }

    /// Beta probability density at `x`.
    ///
    /// Zero outside `[0, 1]`. At the boundaries a zero exponent contributes a
    /// factor of 1. So at `x = 0` the density is `1/B(α,β)` when α = 1, 0 when
    /// α > 1 and `+inf` when α < 1. The `x = 1` case mirrors this with β.
    #[must_use]
    pub fn pdf(&self, x: f64) -> f64 {
        if !(0.0..=1.0).contains(&x) {
            return 0.0;
        }
        let ln_density = exponent_ln(self.alpha - 1.0, x) + exponent_ln(self.beta - 1.0, 1.0 - x)
            - ln_beta(self.alpha, self.beta);
        ln_density.exp()
    }

    /// The posterior as a `statrs` Beta distribution.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `statrs` rejects the parameters.
    pub fn distribution(&self) -> Result<Beta> {
        Beta::new(self.alpha, self.beta).map_err(|e| {
            PosteriorError::invalid_argument(
                "alpha, beta",
                format!("({}, {}): {e}", self.alpha, self.beta),
                "valid Beta parameters",
            )
        })
    }

    /// Cumulative probability P(θ ≤ x).
    ///
    /// # Errors
    ///
    /// See [`BetaBinomial::distribution`].
    pub fn cdf(&self, x: f64) -> Result<f64> {
        Ok(self.distribution()?.cdf(x.clamp(0.0, 1.0)))
    }

    /// Equal-tailed credible interval holding `level` posterior mass.
    ///
    /// Uses the exact Beta inverse CDF.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `level` is not in `(0, 1)`.
    ///
    /// # Example
    ///
    /// ```
    /// use posterior_grid::bayesian::BetaBinomial;
    ///
    /// let model = BetaBinomial::uniform().updated(7, 10).unwrap();
    /// let (lower, upper) = model.credible_interval(0.95).unwrap();
    /// let mean = model.posterior_mean();
    /// assert!(lower < mean && mean < upper);
    /// ```
    pub fn credible_interval(&self, level: f64) -> Result<(f64, f64)> {
        if !(level > 0.0 && level < 1.0) {
            return Err(PosteriorError::invalid_argument(
                "level",
                level,
                "in (0, 1)",
            ));
        }
        let dist = self.distribution()?;
        let tail = (1.0 - level) / 2.0;
        let lower = dist.inverse_cdf(tail).clamp(0.0, 1.0);
        let upper = dist.inverse_cdf(1.0 - tail).clamp(0.0, 1.0);
        Ok((lower, upper))
    }

    /// Density evaluated at `points` evenly spaced values of `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `points < 2`.
    pub fn density_curve(&self, points: usize) -> Result<DensityCurve> {
        if points < 2 {
            return Err(PosteriorError::invalid_argument(
                "curve_points",
                points,
                ">= 2",
            ));
        }
        let grid = ProbabilityGrid::linspace(points)?;
        let density = grid.iter().map(|x| self.pdf(x)).collect();
        Ok(DensityCurve::new(grid.into_vec(), density))
    }
}

impl Default for BetaBinomial {
    fn default() -> Self {
        Self::uniform()
    }
}

/// A Beta model used as a grid prior weighs each point by its density.
impl Prior for BetaBinomial {
    fn weight(&self, p: f64) -> f64 {
        self.pdf(p)
    }
}

/// `exponent · ln(base)` where a zero exponent contributes 0 even at base 0.
fn exponent_ln(exponent: f64, base: f64) -> f64 {
    if exponent == 0.0 {
        0.0
    } else {
        exponent * base.ln()
    }
}
