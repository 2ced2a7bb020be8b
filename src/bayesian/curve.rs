//! Density curves sampled on a probability grid.

use serde::Serialize;

/// A continuous density evaluated at evenly spaced points of `[0, 1]`.
///
/// Produced by [`BetaBinomial::density_curve`](super::BetaBinomial::density_curve)
/// and consumed by charting front ends as `(x, density)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityCurve {
    x: Vec<f64>,
    density: Vec<f64>,
}

impl DensityCurve {
    pub(crate) fn new(x: Vec<f64>, density: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), density.len());
        Self { x, density }
    }

    /// Evaluation points.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Density at each evaluation point.
    #[must_use]
    pub fn density(&self) -> &[f64] {
        &self.density
    }

    /// Number of points on the curve.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True if the curve has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `(x, density)` pairs in order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.density.iter().copied())
    }

    /// The x with the largest density (first one on ties).
    #[must_use]
    pub fn peak(&self) -> Option<f64> {
        let mut best: Option<(f64, f64)> = None;
        for (x, d) in self.points() {
            if best.map_or(true, |(_, bd)| d > bd) {
                best = Some((x, d));
            }
        }
        best.map(|(x, _)| x)
    }

    /// Trapezoid-rule integral of the density.
    ///
    /// Non-finite endpoint densities (U-shaped Beta curves) are skipped.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.x
            .windows(2)
            .zip(self.density.windows(2))
            .map(|(xs, ds)| {
                let (d0, d1) = (ds[0], ds[1]);
                if d0.is_finite() && d1.is_finite() {
                    0.5 * (d0 + d1) * (xs[1] - xs[0])
                } else {
                    0.0
                }
            })
            .sum()
    }
}
