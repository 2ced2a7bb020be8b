//! Bayesian A/B comparison of two conversion rates.
//!
//! Each variant's conversion rate gets a Beta prior. The prior is updated
//! with the variant's conversions and trials, and both posterior densities
//! are evaluated on a shared grid for side-by-side charting.
//!
//! # Example
//!
//! ```
//! use posterior_grid::bayesian::compare;
//!
//! let result = compare(15, 30, 25, 30).unwrap();
//! assert_eq!(result.posterior_a().alpha(), 16.0);
//! assert_eq!(result.posterior_b().beta(), 6.0);
//! assert!(result.prob_b_beats_a() > 0.99);
//! ```

use serde::Serialize;
use tracing::{debug, warn};

use super::conjugate::BetaBinomial;
use crate::{PosteriorError, Result};

/// Number of density points used by [`compare`].
pub const DEFAULT_CURVE_POINTS: usize = 1000;

/// Cells used to integrate P(B > A), independent of the curve resolution.
const INTEGRATION_CELLS: usize = 4096;

/// Half-width of each posterior's integration range, in standard deviations.
const RANGE_SDS: f64 = 40.0;

/// Observed conversions and trials for one variant.
///
/// Invariant: `1 <= trials` and `conversions <= trials`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariantCounts {
    conversions: u64,
    trials: u64,
}

impl VariantCounts {
    /// Validated counts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `trials == 0` or
    /// `conversions > trials`.
    pub fn new(conversions: u64, trials: u64) -> Result<Self> {
        Self::checked("conversions", "trials", conversions, trials)
    }

    /// Counts for a named variant; error messages carry the name as a
    /// suffix (`conversions_a`, `trials_a`).
    ///
    /// # Errors
    ///
    /// Same as [`VariantCounts::new`].
    pub fn for_variant(name: &str, conversions: u64, trials: u64) -> Result<Self> {
        Self::checked(
            &format!("conversions_{name}"),
            &format!("trials_{name}"),
            conversions,
            trials,
        )
    }

    /// Counts forced into the valid domain: trials raised to at least 1,
    /// then conversions capped at trials.
    ///
    /// For front ends that keep computing while showing a validation
    /// message.
    #[must_use]
    pub fn clamped(conversions: u64, trials: u64) -> Self {
        let fixed_trials = trials.max(1);
        let fixed_conversions = conversions.min(fixed_trials);
        if fixed_trials != trials || fixed_conversions != conversions {
            warn!(
                conversions,
                trials, fixed_conversions, fixed_trials, "variant counts clamped"
            );
        }
        Self {
            conversions: fixed_conversions,
            trials: fixed_trials,
        }
    }

    fn checked(
        conversions_param: &str,
        trials_param: &str,
        conversions: u64,
        trials: u64,
    ) -> Result<Self> {
        if trials == 0 {
            return Err(PosteriorError::invalid_argument(trials_param, trials, ">= 1"));
        }
        if conversions > trials {
            return Err(PosteriorError::invalid_argument(
                conversions_param,
                conversions,
                &format!("<= {trials_param} ({trials})"),
            ));
        }
        Ok(Self {
            conversions,
            trials,
        })
    }

    /// Number of conversions.
    #[must_use]
    pub fn conversions(&self) -> u64 {
        self.conversions
    }

    /// Number of trials.
    #[must_use]
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Trials that did not convert.
    #[must_use]
    pub fn failures(&self) -> u64 {
        self.trials - self.conversions
    }
}

/// Compares two variants with a Beta(1, 1) prior on a 1000-point grid.
///
/// # Errors
///
/// Returns `InvalidArgument` if either variant has zero trials or more
/// conversions than trials. The message names the offending variant.
pub fn compare(
    conversions_a: u64,
    trials_a: u64,
    conversions_b: u64,
    trials_b: u64,
) -> Result<Comparison> {
    let a = VariantCounts::for_variant("a", conversions_a, trials_a)?;
    let b = VariantCounts::for_variant("b", conversions_b, trials_b)?;
    Comparator::new().compare(a, b)
}

/// Configurable Beta-conjugate comparison.
///
/// ```
/// use posterior_grid::bayesian::{Comparator, VariantCounts};
///
/// let a = VariantCounts::new(15, 30).unwrap();
/// let b = VariantCounts::new(25, 30).unwrap();
/// let result = Comparator::new()
///     .with_prior(2.0, 2.0)
///     .with_curve_points(200)
///     .compare(a, b)
///     .unwrap();
/// assert_eq!(result.x_grid().len(), 200);
/// assert_eq!(result.posterior_a().alpha(), 17.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparator {
    alpha_prior: f64,
    beta_prior: f64,
    curve_points: usize,
}

impl Default for Comparator {
    fn default() -> Self {
        Self {
            alpha_prior: 1.0,
            beta_prior: 1.0,
            curve_points: DEFAULT_CURVE_POINTS,
        }
    }
}

impl Comparator {
    /// Beta(1, 1) prior, 1000 curve points.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Beta prior shared by both variants (checked in `compare`).
    #[must_use]
    pub fn with_prior(mut self, alpha: f64, beta: f64) -> Self {
        self.alpha_prior = alpha;
        self.beta_prior = beta;
        self
    }

    /// Sets the number of density points (checked in `compare`).
    #[must_use]
    pub fn with_curve_points(mut self, points: usize) -> Self {
        self.curve_points = points;
        self
    }

    /// Posterior for one variant under this comparator's prior.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a non-positive prior.
    pub fn posterior(&self, counts: VariantCounts) -> Result<BetaBinomial> {
        BetaBinomial::new(self.alpha_prior, self.beta_prior)?
            .updated(counts.conversions(), counts.trials())
    }

    /// Computes both posteriors and their density curves.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a non-positive prior or fewer than two
    /// curve points.
    pub fn compare(&self, a: VariantCounts, b: VariantCounts) -> Result<Comparison> {
        let posterior_a = self.posterior(a)?;
        let posterior_b = self.posterior(b)?;

        let curve_a = posterior_a.density_curve(self.curve_points)?;
        let curve_b = posterior_b.density_curve(self.curve_points)?;
        let prob_b_beats_a = prob_greater(&posterior_b, &posterior_a);

        debug!(
            alpha_a = posterior_a.alpha(),
            beta_a = posterior_a.beta(),
            alpha_b = posterior_b.alpha(),
            beta_b = posterior_b.beta(),
            prob_b_beats_a,
            "variant posteriors computed"
        );

        let x_grid = curve_a.x().to_vec();
        Ok(Comparison {
            counts_a: a,
            counts_b: b,
            posterior_a,
            posterior_b,
            x_grid,
            density_a: curve_a.density().to_vec(),
            density_b: curve_b.density().to_vec(),
            prob_b_beats_a,
        })
    }
}

/// P(θ_hi > θ_lo) for independent Beta posteriors.
///
/// Both posteriors are discretized into cell masses on a range fitted to
/// them, so narrow posteriors (high traffic) still span thousands of cells.
/// Within a shared cell the two are treated as tied and split evenly, which
/// makes `prob_greater(x, y) + prob_greater(y, x)` equal 1 up to rounding.
fn prob_greater(hi: &BetaBinomial, lo: &BetaBinomial) -> f64 {
    let edges = integration_edges(hi, lo);
    let mass_hi = cell_masses(hi, &edges);
    let mass_lo = cell_masses(lo, &edges);

    let mut below = 0.0;
    let mut total = 0.0;
    for (m_hi, m_lo) in mass_hi.iter().zip(&mass_lo) {
        total += m_hi * (below + 0.5 * m_lo);
        below += m_lo;
    }
    total.clamp(0.0, 1.0)
}

/// Cell edges covering `mean ± RANGE_SDS·sd` of both posteriors, within `[0, 1]`.
fn integration_edges(a: &BetaBinomial, b: &BetaBinomial) -> Vec<f64> {
    let bounds = |m: &BetaBinomial| {
        let mean = m.posterior_mean();
        let sd = m.posterior_variance().sqrt();
        ((mean - RANGE_SDS * sd).max(0.0), (mean + RANGE_SDS * sd).min(1.0))
    };
    let (lo_a, hi_a) = bounds(a);
    let (lo_b, hi_b) = bounds(b);
    let (mut start, mut end) = (lo_a.min(lo_b), hi_a.max(hi_b));
    if !(end > start) {
        (start, end) = (0.0, 1.0);
    }

    #[allow(clippy::cast_precision_loss)]
    let width = (end - start) / INTEGRATION_CELLS as f64;
    #[allow(clippy::cast_precision_loss)]
    let mut edges: Vec<f64> = (0..INTEGRATION_CELLS)
        .map(|i| start + width * i as f64)
        .collect();
    edges.push(end);
    edges
}

/// Normalized posterior mass in each cell between consecutive `edges`.
///
/// Interior cells use the midpoint density. A cell touching 0 or 1
/// integrates the boundary factor in closed form, so an unbounded density
/// (α or β below 1) still gives a finite mass. Weights stay in log space
/// until the largest is subtracted, which keeps huge α and β from
/// underflowing.
fn cell_masses(model: &BetaBinomial, edges: &[f64]) -> Vec<f64> {
    let (a, b) = (model.alpha(), model.beta());
    let ln_weights: Vec<f64> = edges
        .windows(2)
        .map(|cell| {
            let (left, right) = (cell[0], cell[1]);
            if left == 0.0 && right == 1.0 {
                0.0
            } else if left == 0.0 {
                a * right.ln() - a.ln() + (b - 1.0) * (1.0 - 0.5 * right).ln()
            } else if right == 1.0 {
                b * (1.0 - left).ln() - b.ln() + (a - 1.0) * (0.5 * (1.0 + left)).ln()
            } else {
                let mid = 0.5 * (left + right);
                (a - 1.0) * mid.ln() + (b - 1.0) * (1.0 - mid).ln() + (right - left).ln()
            }
        })
        .collect();

    let max = ln_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = ln_weights.iter().map(|w| (w - max).exp()).collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Posterior density curves for two variants on a shared grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    counts_a: VariantCounts,
    counts_b: VariantCounts,
    posterior_a: BetaBinomial,
    posterior_b: BetaBinomial,
    x_grid: Vec<f64>,
    density_a: Vec<f64>,
    density_b: Vec<f64>,
    prob_b_beats_a: f64,
}

impl Comparison {
    /// Shared evaluation grid.
    #[must_use]
    pub fn x_grid(&self) -> &[f64] {
        &self.x_grid
    }

    /// Posterior density of variant A at each grid point.
    #[must_use]
    pub fn density_a(&self) -> &[f64] {
        &self.density_a
    }

    /// Posterior density of variant B at each grid point.
    #[must_use]
    pub fn density_b(&self) -> &[f64] {
        &self.density_b
    }

    /// Counts observed for variant A.
    #[must_use]
    pub fn counts_a(&self) -> VariantCounts {
        self.counts_a
    }

    /// Counts observed for variant B.
    #[must_use]
    pub fn counts_b(&self) -> VariantCounts {
        self.counts_b
    }

    /// Posterior model of variant A.
    #[must_use]
    pub fn posterior_a(&self) -> &BetaBinomial {
        &self.posterior_a
    }

    /// Posterior model of variant B.
    #[must_use]
    pub fn posterior_b(&self) -> &BetaBinomial {
        &self.posterior_b
    }

    /// Probability that B's conversion rate exceeds A's.
    #[must_use]
    pub fn prob_b_beats_a(&self) -> f64 {
        self.prob_b_beats_a
    }

    /// E[θ_B] − E[θ_A].
    #[must_use]
    pub fn expected_lift(&self) -> f64 {
        self.posterior_b.posterior_mean() - self.posterior_a.posterior_mean()
    }

    /// `(x, density_a, density_b)` rows in grid order.
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.x_grid
            .iter()
            .zip(&self.density_a)
            .zip(&self.density_b)
            .map(|((&x, &a), &b)| (x, a, b))
    }
}
