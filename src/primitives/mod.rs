//! Core numeric primitives.
//!
//! [`ProbabilityGrid`] is the discretization shared by the grid estimator and
//! the density curves of the conjugate comparator.

mod grid;

pub use grid::ProbabilityGrid;
