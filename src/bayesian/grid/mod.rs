//! Grid approximation of a binomial posterior.
//!
//! The posterior over the success probability p is approximated on a finite
//! grid:
//!
//! 1. build `grid_points` evenly spaced values of p in `[0, 1]`
//! 2. weight each point by the prior
//! 3. multiply by the binomial likelihood of the observed data
//! 4. divide by the total so the masses sum to 1
//!
//! # Example
//!
//! ```
//! use posterior_grid::bayesian::estimate;
//!
//! // 6 water and 3 land in 9 globe tosses
//! let posterior = estimate(40, 9, 6).unwrap();
//! let total: f64 = posterior.posterior().iter().sum();
//! assert!((total - 1.0).abs() < 1e-9);
//! assert!((posterior.map_estimate() - 2.0 / 3.0).abs() < 0.03);
//! ```

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

use super::likelihood::binomial_ln_likelihood;
use super::prior::{Prior, UniformPrior};
use crate::primitives::ProbabilityGrid;
use crate::{PosteriorError, Result};

/// Computes the grid posterior under a flat prior.
///
/// # Errors
///
/// - `InvalidArgument` if `grid_points == 0` or `successes > total_trials`
/// - `NumericDegeneracy` if every grid point has zero posterior mass
pub fn estimate(grid_points: usize, total_trials: u64, successes: u64) -> Result<GridPosterior> {
    GridApproximation::new(grid_points).fit(total_trials, successes)
}

/// Grid approximation with a configurable prior.
///
/// ```
/// use posterior_grid::bayesian::{GridApproximation, StepPrior};
///
/// let prior = StepPrior::new(0.5).unwrap();
/// let posterior = GridApproximation::new(20).with_prior(prior).fit(9, 6).unwrap();
/// assert!(posterior.points().all(|(p, mass)| p >= 0.5 || mass == 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct GridApproximation<P = UniformPrior> {
    grid_points: usize,
    prior: P,
}

impl GridApproximation<UniformPrior> {
    /// Creates an approximation with `grid_points` points and a flat prior.
    #[must_use]
    pub fn new(grid_points: usize) -> Self {
        Self {
            grid_points,
            prior: UniformPrior,
        }
    }
}

impl<P: Prior> GridApproximation<P> {
    /// Replaces the prior.
    #[must_use]
    pub fn with_prior<Q: Prior>(self, prior: Q) -> GridApproximation<Q> {
        GridApproximation {
            grid_points: self.grid_points,
            prior,
        }
    }

    /// Number of grid points.
    #[must_use]
    pub fn grid_points(&self) -> usize {
        self.grid_points
    }

    /// Computes the normalized posterior for `successes` out of
    /// `total_trials`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `grid_points == 0`, `successes > total_trials`,
    ///   or the prior yields a negative or non-finite weight
    /// - `NumericDegeneracy` if the unnormalized posterior sums to zero
    ///   (or to a non-finite value)
    pub fn fit(&self, total_trials: u64, successes: u64) -> Result<GridPosterior> {
        let grid = ProbabilityGrid::linspace(self.grid_points)?;
        let ln_likelihood = binomial_ln_likelihood(&grid, total_trials, successes)?;
        let prior = self.prior.weights(&grid)?;

        // Rescale by the largest supported log-likelihood so large counts
        // do not underflow to an all-zero posterior.
        let peak = prior
            .iter()
            .zip(&ln_likelihood)
            .filter(|(w, _)| **w > 0.0)
            .map(|(_, l)| *l)
            .fold(f64::NEG_INFINITY, f64::max);

        let mut posterior: Vec<f64> = if peak.is_finite() {
            prior
                .iter()
                .zip(&ln_likelihood)
                .map(|(w, l)| w * (l - peak).exp())
                .collect()
        } else {
            vec![0.0; grid.len()]
        };

        let total: f64 = posterior.iter().sum();
        if total == 0.0 || !total.is_finite() {
            return Err(PosteriorError::degenerate(format!(
                "unnormalized posterior sums to {total} \
                 (grid_points = {}, total_trials = {total_trials}, successes = {successes})",
                self.grid_points
            )));
        }
        posterior.iter_mut().for_each(|v| *v /= total);

        debug!(
            grid_points = self.grid_points,
            total_trials,
            successes,
            ln_total = peak + total.ln(),
            "grid posterior computed"
        );

        Ok(GridPosterior { grid, posterior })
    }
}

/// Normalized posterior mass over a probability grid.
///
/// `posterior()[i]` is the mass at `grid()[i]`. The masses are
/// non-negative and sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridPosterior {
    grid: ProbabilityGrid,
    posterior: Vec<f64>,
}

impl GridPosterior {
    /// Probability grid.
    #[must_use]
    pub fn grid(&self) -> &[f64] {
        self.grid.points()
    }

    /// Posterior mass at each grid point.
    #[must_use]
    pub fn posterior(&self) -> &[f64] {
        &self.posterior
    }

    /// Number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.posterior.len()
    }

    /// Always false: a posterior has at least one grid point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posterior.is_empty()
    }

    /// `(p, mass)` pairs in grid order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.grid.iter().zip(self.posterior.iter().copied())
    }

    /// Splits into `(grid, posterior)` vectors.
    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.grid.into_vec(), self.posterior)
    }

    /// Grid point with the largest mass (lowest p on ties).
    #[must_use]
    pub fn map_estimate(&self) -> f64 {
        let mut best = (self.grid()[0], self.posterior[0]);
        for (p, mass) in self.points().skip(1) {
            if mass > best.1 {
                best = (p, mass);
            }
        }
        best.0
    }

    /// Posterior mean Σ pᵢ·wᵢ.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.points().map(|(p, w)| p * w).sum()
    }

    /// Posterior standard deviation.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        let mean = self.mean();
        self.points()
            .map(|(p, w)| (p - mean).powi(2) * w)
            .sum::<f64>()
            .sqrt()
    }

    /// Smallest grid point carrying mass whose cumulative mass reaches `q`.
    ///
    /// Zero-mass points are never returned, so `quantile(0.0)` is the first
    /// point of the posterior's support.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `q` is not in `[0, 1]`.
    pub fn quantile(&self, q: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&q) {
            return Err(PosteriorError::invalid_argument("q", q, "in [0, 1]"));
        }
        let mut cumulative = 0.0;
        let mut last_supported = self.grid()[self.len() - 1];
        for (p, w) in self.points().filter(|(_, w)| *w > 0.0) {
            cumulative += w;
            last_supported = p;
            // Tolerate rounding in the running sum so q = 1 lands on the
            // last point carrying mass.
            if cumulative >= q - 1e-12 {
                return Ok(p);
            }
        }
        Ok(last_supported)
    }

    /// Central interval holding `mass` of the posterior, as grid points.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `mass` is not in `(0, 1]`.
    ///
    /// # Example
    ///
    /// ```
    /// use posterior_grid::bayesian::estimate;
    ///
    /// let posterior = estimate(100, 9, 6).unwrap();
    /// let (lower, upper) = posterior.percentile_interval(0.89).unwrap();
    /// assert!(lower < posterior.mean() && posterior.mean() < upper);
    /// ```
    pub fn percentile_interval(&self, mass: f64) -> Result<(f64, f64)> {
        if !(mass > 0.0 && mass <= 1.0) {
            return Err(PosteriorError::invalid_argument("mass", mass, "in (0, 1]"));
        }
        let tail = (1.0 - mass) / 2.0;
        Ok((self.quantile(tail)?, self.quantile(1.0 - tail)?))
    }

    /// Draws `n` grid values with replacement, weighted by posterior mass.
    ///
    /// The same `seed` always yields the same draws.
    ///
    /// # Errors
    ///
    /// Returns `NumericDegeneracy` if the masses cannot form a sampling
    /// distribution.
    pub fn sample(&self, n: usize, seed: u64) -> Result<Vec<f64>> {
        let index = WeightedIndex::new(&self.posterior)
            .map_err(|e| PosteriorError::degenerate(format!("cannot sample posterior: {e}")))?;
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = self.grid();
        Ok((0..n).map(|_| grid[index.sample(&mut rng)]).collect())
    }
}
