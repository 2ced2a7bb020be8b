//! Binomial likelihood evaluated over a probability grid.
//!
//! The PMF is computed in log space:
//!
//! ```text
//! ln P(k | n, p) = ln C(n, k) + k·ln(p) + (n-k)·ln(1-p)
//! ```
//!
//! A zero count contributes nothing regardless of the probability, so `0^0`
//! is 1. At `p = 0` the PMF is 1 for `k = 0` and 0 otherwise, and the
//! mirror rule holds at `p = 1`. No NaN is produced at the boundaries.

use statrs::function::factorial::ln_binomial;

use crate::primitives::ProbabilityGrid;
use crate::{PosteriorError, Result};

/// `count · ln(base)`, with a zero count contributing exactly 0.
fn count_ln(count: u64, base: f64) -> f64 {
    if count == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let k = count as f64;
        k * base.ln()
    }
}

fn check_counts(total_trials: u64, successes: u64) -> Result<()> {
    if successes > total_trials {
        return Err(PosteriorError::invalid_argument(
            "successes",
            successes,
            &format!("<= total_trials ({total_trials})"),
        ));
    }
    Ok(())
}

/// Log of the binomial PMF, `-inf` where the PMF is exactly zero.
///
/// # Errors
///
/// Returns `InvalidArgument` if `successes > total_trials` or `p` is not in
/// `[0, 1]`.
pub fn binomial_ln_pmf(total_trials: u64, successes: u64, p: f64) -> Result<f64> {
    check_counts(total_trials, successes)?;
    if !(0.0..=1.0).contains(&p) {
        return Err(PosteriorError::invalid_argument("p", p, "in [0, 1]"));
    }
    Ok(ln_pmf_unchecked(total_trials, successes, p))
}

/// Binomial PMF `C(n, k) p^k (1-p)^(n-k)`.
///
/// # Errors
///
/// Same conditions as [`binomial_ln_pmf`].
///
/// # Example
///
/// ```
/// use posterior_grid::bayesian::binomial_pmf;
///
/// // 6 water in 9 tosses at p = 0.5
/// let pmf = binomial_pmf(9, 6, 0.5).unwrap();
/// assert!((pmf - 84.0 / 512.0).abs() < 1e-12);
///
/// // 0^0 = 1 at the boundary
/// assert_eq!(binomial_pmf(3, 3, 1.0).unwrap(), 1.0);
/// assert_eq!(binomial_pmf(3, 0, 0.0).unwrap(), 1.0);
/// ```
pub fn binomial_pmf(total_trials: u64, successes: u64, p: f64) -> Result<f64> {
    binomial_ln_pmf(total_trials, successes, p).map(f64::exp)
}

/// Evaluates the binomial PMF at every point of `grid`.
///
/// # Errors
///
/// Returns `InvalidArgument` if `successes > total_trials`.
pub fn binomial_likelihood(
    grid: &ProbabilityGrid,
    total_trials: u64,
    successes: u64,
) -> Result<Vec<f64>> {
    check_counts(total_trials, successes)?;
    Ok(grid
        .iter()
        .map(|p| ln_pmf_unchecked(total_trials, successes, p).exp())
        .collect())
}

/// Log binomial PMF at every point of `grid`, `-inf` where the PMF is zero.
///
/// Unlike [`binomial_likelihood`] this does not underflow for large
/// `total_trials`.
///
/// # Errors
///
/// Returns `InvalidArgument` if `successes > total_trials`.
pub fn binomial_ln_likelihood(
    grid: &ProbabilityGrid,
    total_trials: u64,
    successes: u64,
) -> Result<Vec<f64>> {
    check_counts(total_trials, successes)?;
    Ok(grid
        .iter()
        .map(|p| ln_pmf_unchecked(total_trials, successes, p))
        .collect())
}

fn ln_pmf_unchecked(total_trials: u64, successes: u64, p: f64) -> f64 {
    let failures = total_trials - successes;
    ln_binomial(total_trials, successes) + count_ln(successes, p) + count_ln(failures, 1.0 - p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pmf_matches_closed_form() {
        // C(9,6) = 84
        let p: f64 = 0.3;
        let expected = 84.0 * p.powi(6) * (1.0 - p).powi(3);
        let pmf = binomial_pmf(9, 6, p).expect("valid inputs");
        assert!((pmf - expected).abs() < 1e-12);
    }

    #[test]
    fn test_pmf_sums_to_one_over_outcomes() {
        let total: f64 = (0..=12)
            .map(|k| binomial_pmf(12, k, 0.37).expect("valid inputs"))
            .sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_boundary_zero_probability() {
        assert_eq!(binomial_pmf(5, 0, 0.0).expect("valid"), 1.0);
        assert_eq!(binomial_pmf(5, 1, 0.0).expect("valid"), 0.0);
        assert_eq!(binomial_ln_pmf(5, 1, 0.0).expect("valid"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_boundary_unit_probability() {
        assert_eq!(binomial_pmf(5, 5, 1.0).expect("valid"), 1.0);
        assert_eq!(binomial_pmf(5, 4, 1.0).expect("valid"), 0.0);
    }

    #[test]
    fn test_zero_trials_is_certain() {
        for p in [0.0, 0.25, 1.0] {
            assert_eq!(binomial_pmf(0, 0, p).expect("valid"), 1.0);
        }
    }

    #[test]
    fn test_successes_exceeding_trials_rejected() {
        let err = binomial_pmf(3, 4, 0.5).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("successes"));
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        assert!(binomial_pmf(3, 1, -0.1).unwrap_err().is_invalid_argument());
        assert!(binomial_pmf(3, 1, 1.5).unwrap_err().is_invalid_argument());
        assert!(binomial_pmf(3, 1, f64::NAN).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_grid_likelihood_has_no_nan() {
        let grid = ProbabilityGrid::linspace(11).expect("valid size");
        for k in 0..=4 {
            let lik = binomial_likelihood(&grid, 4, k).expect("valid inputs");
            assert_eq!(lik.len(), 11);
            assert!(lik.iter().all(|v| v.is_finite() && *v >= 0.0));
        }
    }

    #[test]
    fn test_grid_ln_likelihood_survives_large_counts() {
        let grid = ProbabilityGrid::linspace(5).expect("valid size");
        let ln_lik = binomial_ln_likelihood(&grid, 10_000_000, 5_000_000).expect("valid inputs");
        assert_eq!(ln_lik[0], f64::NEG_INFINITY);
        assert_eq!(ln_lik[4], f64::NEG_INFINITY);
        assert!(ln_lik[2].is_finite());
        assert!(ln_lik[2] > ln_lik[1]);
        // The plain likelihood underflows at the same point.
        let lik = binomial_likelihood(&grid, 10_000_000, 5_000_000).expect("valid inputs");
        assert_eq!(lik[1], 0.0);
    }

    #[test]
    fn test_grid_likelihood_all_successes() {
        let grid = ProbabilityGrid::linspace(5).expect("valid size");
        let lik = binomial_likelihood(&grid, 3, 3).expect("valid inputs");
        assert_eq!(lik[0], 0.0);
        assert!((lik[2] - 0.125).abs() < 1e-12);
        assert_eq!(lik[4], 1.0);
    }
}
