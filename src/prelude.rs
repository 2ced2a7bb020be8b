//! Convenience re-exports for common usage.
//!
//! ```
//! use posterior_grid::prelude::*;
//!
//! let posterior = estimate(40, 9, 6).unwrap();
//! let result = compare(15, 30, 25, 30).unwrap();
//! assert!(posterior.mean() > 0.5);
//! assert!(result.prob_b_beats_a() > 0.5);
//! ```

pub use crate::bayesian::{
    compare, estimate, BetaBinomial, Comparator, Comparison, GridApproximation, GridPosterior,
    Prior, PriorShape, StepPrior, UniformPrior, VariantCounts,
};
pub use crate::config::AnalysisConfig;
pub use crate::error::{PosteriorError, Result};
pub use crate::primitives::ProbabilityGrid;
