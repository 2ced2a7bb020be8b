//! Bayesian inference for binomial data.
//!
//! Two independent, stateless components:
//! - Grid approximation: a prior × binomial likelihood evaluated on a
//!   probability grid and normalized ([`estimate`], [`GridApproximation`])
//! - Beta-conjugate comparison: closed-form Beta posteriors for two
//!   conversion-rate variants ([`compare`], [`Comparator`])
//!
//! # Example: Globe Tossing
//!
//! ```
//! use posterior_grid::bayesian::estimate;
//!
//! // 6 water, 3 land
//! let posterior = estimate(40, 6 + 3, 6).unwrap();
//! for (p, mass) in posterior.points() {
//!     assert!((0.0..=1.0).contains(&p));
//!     assert!(mass >= 0.0);
//! }
//! ```
//!
//! # Example: A/B Test
//!
//! ```
//! use posterior_grid::bayesian::compare;
//!
//! let result = compare(15, 30, 25, 30).unwrap();
//! let mode_b = result.posterior_b().posterior_mode().unwrap();
//! assert!((mode_b - 25.0 / 30.0).abs() < 1e-12);
//! ```

mod comparison;
mod conjugate;
mod curve;
mod grid;
mod likelihood;
mod prior;

pub use comparison::{compare, Comparator, Comparison, VariantCounts, DEFAULT_CURVE_POINTS};
pub use conjugate::BetaBinomial;
pub use curve::DensityCurve;
pub use grid::{estimate, GridApproximation, GridPosterior};
pub use likelihood::{binomial_likelihood, binomial_ln_likelihood, binomial_ln_pmf, binomial_pmf};
pub use prior::{Prior, PriorShape, StepPrior, UniformPrior};
