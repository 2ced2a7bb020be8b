//! Evenly spaced probability grid over `[0, 1]`.

use serde::Serialize;

use crate::{PosteriorError, Result};

/// An ordered sequence of evenly spaced probabilities in `[0, 1]`.
///
/// Invariants, checked on construction:
/// - length equals the requested number of points
/// - strictly increasing
/// - first point is exactly `0.0`, last point is exactly `1.0`
///
/// A single-point grid is `[0.0]`, matching `linspace(0, 1, 1)`.
///
/// # Example
///
/// ```
/// use posterior_grid::primitives::ProbabilityGrid;
///
/// let grid = ProbabilityGrid::linspace(5).unwrap();
/// assert_eq!(grid.points(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProbabilityGrid {
    points: Vec<f64>,
}

impl ProbabilityGrid {
    /// Builds a grid of `n` evenly spaced points from 0 to 1 inclusive.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `n == 0`.
    pub fn linspace(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(PosteriorError::invalid_argument("grid_points", n, "> 0"));
        }
        if n == 1 {
            return Ok(Self { points: vec![0.0] });
        }

        let last = n - 1;
        #[allow(clippy::cast_precision_loss)]
        let denom = last as f64;
        #[allow(clippy::cast_precision_loss)]
        let points = (0..n)
            .map(|i| if i == last { 1.0 } else { i as f64 / denom })
            .collect();

        Ok(Self { points })
    }

    /// Grid points in increasing order.
    #[must_use]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: an empty grid cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Spacing between neighbouring points, `None` for a single-point grid.
    #[must_use]
    pub fn step(&self) -> Option<f64> {
        match self.points.as_slice() {
            [first, second, ..] => Some(second - first),
            _ => None,
        }
    }

    /// Iterates over the grid points.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().copied()
    }

    /// Consumes the grid, returning the underlying points.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.points
    }
}

impl AsRef<[f64]> for ProbabilityGrid {
    fn as_ref(&self) -> &[f64] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_five_points() {
        let grid = ProbabilityGrid::linspace(5).expect("valid size");
        assert_eq!(grid.points(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid.step(), Some(0.25));
    }

    #[test]
    fn test_linspace_endpoints_exact() {
        for n in [2, 3, 7, 40, 999, 1000] {
            let grid = ProbabilityGrid::linspace(n).expect("valid size");
            assert_eq!(grid.points()[0], 0.0);
            assert_eq!(grid.points()[n - 1], 1.0);
            assert_eq!(grid.len(), n);
        }
    }

    #[test]
    fn test_linspace_strictly_increasing() {
        let grid = ProbabilityGrid::linspace(1000).expect("valid size");
        assert!(grid.points().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_linspace_single_point() {
        let grid = ProbabilityGrid::linspace(1).expect("valid size");
        assert_eq!(grid.points(), &[0.0]);
        assert_eq!(grid.step(), None);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_linspace_zero_is_invalid() {
        let err = ProbabilityGrid::linspace(0).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("grid_points"));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let grid = ProbabilityGrid::linspace(3).expect("valid size");
        let json = serde_json::to_string(&grid).expect("serializable");
        assert_eq!(json, "[0.0,0.5,1.0]");
    }
}
