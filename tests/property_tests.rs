//! Property-based tests using proptest.
//!
//! These tests verify invariants of the grid posterior and the
//! variant comparison over randomly drawn counts.

use posterior_grid::prelude::*;
use proptest::prelude::*;

// Strategy for (total_trials, successes) with successes <= total_trials
fn counts_strategy(max_trials: u64) -> impl Strategy<Value = (u64, u64)> {
    (0..=max_trials).prop_flat_map(|n| (Just(n), 0..=n))
}

// Strategy for variant counts with at least one trial
fn variant_strategy(max_trials: u64) -> impl Strategy<Value = VariantCounts> {
    (1..=max_trials)
        .prop_flat_map(|n| (0..=n, Just(n)))
        .prop_map(|(k, n)| VariantCounts::new(k, n).expect("strategy keeps counts valid"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Grid properties
    #[test]
    fn grid_spans_unit_interval(n in 2usize..500) {
        let grid = ProbabilityGrid::linspace(n).expect("n > 0");
        prop_assert_eq!(grid.len(), n);
        prop_assert_eq!(grid.points()[0], 0.0);
        prop_assert_eq!(grid.points()[n - 1], 1.0);
    }

    #[test]
    fn grid_is_strictly_increasing(n in 2usize..500) {
        let grid = ProbabilityGrid::linspace(n).expect("n > 0");
        for pair in grid.points().windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    // Posterior properties
    #[test]
    fn posterior_is_a_distribution(grid_points in 3usize..200, (n, k) in counts_strategy(200)) {
        let posterior = estimate(grid_points, n, k).expect("interior grid point exists");
        prop_assert_eq!(posterior.len(), grid_points);
        prop_assert!(posterior.posterior().iter().all(|&w| w >= 0.0 && w.is_finite()));
        let total: f64 = posterior.posterior().iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn posterior_mirrors_when_outcomes_swap(grid_points in 3usize..100, (n, k) in counts_strategy(60)) {
        let forward = estimate(grid_points, n, k).expect("valid");
        let mirrored = estimate(grid_points, n, n - k).expect("valid");
        let last = grid_points - 1;
        for i in 0..grid_points {
            prop_assert!((forward.posterior()[i] - mirrored.posterior()[last - i]).abs() < 1e-9);
        }
    }

    #[test]
    fn estimate_is_deterministic(grid_points in 1usize..100, (n, k) in counts_strategy(50)) {
        let first = estimate(grid_points, n, k);
        let second = estimate(grid_points, n, k);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn no_data_gives_uniform_posterior(grid_points in 1usize..200) {
        let posterior = estimate(grid_points, 0, 0).expect("valid");
        let expected = 1.0 / grid_points as f64;
        for &w in posterior.posterior() {
            prop_assert!((w - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn summaries_stay_in_unit_interval(grid_points in 3usize..200, (n, k) in counts_strategy(100)) {
        let posterior = estimate(grid_points, n, k).expect("valid");
        let mean = posterior.mean();
        prop_assert!((0.0..=1.0).contains(&mean));
        prop_assert!((0.0..=1.0).contains(&posterior.map_estimate()));

        let (lower, upper) = posterior.percentile_interval(0.89).expect("valid mass");
        prop_assert!(lower <= upper);
        prop_assert!(posterior.grid().contains(&lower));
        prop_assert!(posterior.grid().contains(&upper));
    }

    #[test]
    fn samples_land_on_grid(grid_points in 3usize..50, (n, k) in counts_strategy(30), seed in any::<u64>()) {
        let posterior = estimate(grid_points, n, k).expect("valid");
        let draws = posterior.sample(50, seed).expect("valid masses");
        prop_assert_eq!(draws.len(), 50);
        for x in draws {
            prop_assert!(posterior.grid().contains(&x));
        }
    }

    // Comparison properties
    #[test]
    fn comparison_probability_is_bounded(a in variant_strategy(100), b in variant_strategy(100)) {
        let result = Comparator::new().with_curve_points(200).compare(a, b).expect("valid");
        prop_assert!((0.0..=1.0).contains(&result.prob_b_beats_a()));
        prop_assert_eq!(result.x_grid().len(), 200);
        prop_assert!(result.density_a().iter().all(|&d| d >= 0.0));
        prop_assert!(result.density_b().iter().all(|&d| d >= 0.0));
    }

    #[test]
    fn swapping_variants_complements_probability(a in variant_strategy(50), b in variant_strategy(50)) {
        let forward = Comparator::new().compare(a, b).expect("valid");
        let backward = Comparator::new().compare(b, a).expect("valid");
        let total = forward.prob_b_beats_a() + backward.prob_b_beats_a();
        prop_assert!((total - 1.0).abs() < 0.02);
    }

    #[test]
    fn posterior_parameters_follow_counts(a in variant_strategy(1000), b in variant_strategy(1000)) {
        let result = compare(a.conversions(), a.trials(), b.conversions(), b.trials()).expect("valid");
        prop_assert_eq!(result.posterior_a().alpha(), 1.0 + a.conversions() as f64);
        prop_assert_eq!(result.posterior_a().beta(), 1.0 + a.failures() as f64);
        prop_assert_eq!(result.posterior_b().alpha(), 1.0 + b.conversions() as f64);
        prop_assert_eq!(result.posterior_b().beta(), 1.0 + b.failures() as f64);
    }

    #[test]
    fn conversions_above_trials_rejected(trials in 1u64..1000, extra in 1u64..100) {
        let err = compare(trials + extra, trials, 1, 1).expect_err("conversions > trials");
        prop_assert!(err.is_invalid_argument());
        prop_assert!(err.to_string().contains("conversions_a"));
    }
}
