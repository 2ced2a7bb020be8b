//! Prior weight functions for grid approximation.
//!
//! A [`Prior`] maps a probability `p` to a non-negative, possibly
//! unnormalized weight. The grid estimator multiplies these weights into the
//! likelihood before normalizing, so only relative magnitudes matter.
//!
//! Any `Fn(f64) -> f64` closure is a prior:
//!
//! ```
//! use posterior_grid::bayesian::GridApproximation;
//!
//! // Triangular prior peaking at 0.5
//! let posterior = GridApproximation::new(21)
//!     .with_prior(|p: f64| 1.0 - (2.0 * p - 1.0).abs())
//!     .fit(9, 6)
//!     .unwrap();
//! assert_eq!(posterior.posterior()[0], 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::primitives::ProbabilityGrid;
use crate::{PosteriorError, Result};

/// Prior belief over the success probability.
pub trait Prior {
    /// Unnormalized prior weight at probability `p`.
    fn weight(&self, p: f64) -> f64;

    /// Evaluates the prior at every grid point.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if any weight is negative or not finite.
    fn weights(&self, grid: &ProbabilityGrid) -> Result<Vec<f64>> {
        grid.iter()
            .map(|p| {
                let w = self.weight(p);
                if w.is_finite() && w >= 0.0 {
                    Ok(w)
                } else {
                    Err(PosteriorError::invalid_argument(
                        "prior weight",
                        format!("{w} at p = {p}"),
                        "finite and >= 0",
                    ))
                }
            })
            .collect()
    }
}

impl<F> Prior for F
where
    F: Fn(f64) -> f64,
{
    fn weight(&self, p: f64) -> f64 {
        self(p)
    }
}

/// Flat prior: weight 1 everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformPrior;

impl Prior for UniformPrior {
    fn weight(&self, _p: f64) -> f64 {
        1.0
    }
}

/// Step prior: weight 0 below `threshold`, 1 at or above it.
///
/// Encodes the belief that the success probability is at least `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPrior {
    threshold: f64,
}

impl StepPrior {
    /// Creates a step prior.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `threshold` is not in `[0, 1]`.
    pub fn new(threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(PosteriorError::invalid_argument(
                "threshold",
                threshold,
                "in [0, 1]",
            ));
        }
        Ok(Self { threshold })
    }

    /// Probability below which the prior has no mass.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Prior for StepPrior {
    fn weight(&self, p: f64) -> f64 {
        if p < self.threshold {
            0.0
        } else {
            1.0
        }
    }
}

/// Serializable choice among the built-in priors.
///
/// Used by configuration files and front ends that pick a prior by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PriorShape {
    /// See [`UniformPrior`].
    #[default]
    Uniform,
    /// See [`StepPrior`].
    Step {
        /// Probability below which the prior has no mass
        threshold: f64,
    },
}

impl PriorShape {
    /// Checks shape parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a step threshold outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Uniform => Ok(()),
            Self::Step { threshold } => StepPrior::new(*threshold).map(|_| ()),
        }
    }
}

impl Prior for PriorShape {
    fn weight(&self, p: f64) -> f64 {
        match self {
            Self::Uniform => UniformPrior.weight(p),
            Self::Step { threshold } => StepPrior {
                threshold: *threshold,
            }
            .weight(p),
        }
    }

    fn weights(&self, grid: &ProbabilityGrid) -> Result<Vec<f64>> {
        self.validate()?;
        grid.iter().map(|p| Ok(self.weight(p))).collect()
    }
}
