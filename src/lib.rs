//! Grid-approximated Bayesian posteriors for binomial data.
//!
//! The crate computes the numeric series behind two classic teaching
//! examples:
//!
//! - the globe-tossing posterior from *Statistical Rethinking*, built by
//!   brute-force grid approximation
//! - a Bayesian A/B test comparing two conversion rates through their
//!   closed-form Beta posteriors
//!
//! Every computation is a pure function: inputs in, numeric sequences out.
//! Rendering is left to the caller.
//!
//! # Quick Start
//!
//! ```
//! use posterior_grid::prelude::*;
//!
//! // 6 water and 3 land on a 40 point grid
//! let posterior = estimate(40, 9, 6).unwrap();
//! assert_eq!(posterior.grid().len(), 40);
//!
//! // 15/30 conversions for A, 25/30 for B
//! let ab = compare(15, 30, 25, 30).unwrap();
//! assert_eq!(ab.x_grid().len(), 1000);
//! ```
//!
//! # Modules
//!
//! - [`bayesian`]: grid estimator, priors, likelihood, Beta-Binomial model, A/B comparison
//! - [`primitives`]: the probability grid
//! - [`config`]: TOML-loadable defaults for front ends
//! - [`error`]: error type and `Result` alias

pub mod bayesian;
pub mod config;
pub mod error;
pub mod prelude;
pub mod primitives;

pub use error::{PosteriorError, Result};
pub use primitives::ProbabilityGrid;
