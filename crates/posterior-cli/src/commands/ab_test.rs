//! Two-variant conversion comparison.

use posterior_grid::bayesian::{BetaBinomial, Comparator, Comparison, VariantCounts};
use posterior_grid::config::AbTestDefaults;
use posterior_grid::Result as PosteriorResult;
use serde::Serialize;

use crate::error::Result;
use crate::output;

/// Flags for `posterior ab-test`; `None` falls back to config.
#[derive(Debug, Clone, Default)]
pub(crate) struct AbTestArgs {
    pub(crate) conversions_a: Option<u64>,
    pub(crate) trials_a: Option<u64>,
    pub(crate) conversions_b: Option<u64>,
    pub(crate) trials_b: Option<u64>,
    pub(crate) alpha_prior: Option<f64>,
    pub(crate) beta_prior: Option<f64>,
    pub(crate) curve_points: Option<usize>,
    pub(crate) clamp: bool,
    pub(crate) table: bool,
}

#[derive(Debug, Serialize)]
struct VariantSummary {
    name: &'static str,
    conversions: u64,
    trials: u64,
    alpha: f64,
    beta: f64,
    mean: f64,
    mode: Option<f64>,
    credible_interval: (f64, f64),
}

impl VariantSummary {
    fn new(
        name: &'static str,
        counts: VariantCounts,
        posterior: &BetaBinomial,
        level: f64,
    ) -> PosteriorResult<Self> {
        Ok(Self {
            name,
            conversions: counts.conversions(),
            trials: counts.trials(),
            alpha: posterior.alpha(),
            beta: posterior.beta(),
            mean: posterior.posterior_mean(),
            mode: posterior.posterior_mode(),
            credible_interval: posterior.credible_interval(level)?,
        })
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    credible_level: f64,
    variants: [VariantSummary; 2],
    prob_b_beats_a: f64,
    expected_lift: f64,
    comparison: &'a Comparison,
}

fn counts(name: &str, conversions: u64, trials: u64, clamp: bool) -> Result<VariantCounts> {
    if clamp {
        let clamped = VariantCounts::clamped(conversions, trials);
        if clamped.conversions() != conversions || clamped.trials() != trials {
            output::warning(&format!(
                "variant {}: conversions cannot exceed trials, using {}/{}",
                name.to_uppercase(),
                clamped.conversions(),
                clamped.trials()
            ));
        }
        Ok(clamped)
    } else {
        Ok(VariantCounts::for_variant(name, conversions, trials)?)
    }
}

/// Run the ab-test command
pub(crate) fn run(args: &AbTestArgs, defaults: &AbTestDefaults, json: bool) -> Result<()> {
    let a = counts(
        "a",
        args.conversions_a.unwrap_or(defaults.conversions_a),
        args.trials_a.unwrap_or(defaults.trials_a),
        args.clamp,
    )?;
    let b = counts(
        "b",
        args.conversions_b.unwrap_or(defaults.conversions_b),
        args.trials_b.unwrap_or(defaults.trials_b),
        args.clamp,
    )?;

    let comparison = Comparator::new()
        .with_prior(
            args.alpha_prior.unwrap_or(defaults.alpha_prior),
            args.beta_prior.unwrap_or(defaults.beta_prior),
        )
        .with_curve_points(args.curve_points.unwrap_or(defaults.curve_points))
        .compare(a, b)?;

    let level = defaults.credible_level;
    let report = Report {
        credible_level: level,
        variants: [
            VariantSummary::new("A", a, comparison.posterior_a(), level)?,
            VariantSummary::new("B", b, comparison.posterior_b(), level)?,
        ],
        prob_b_beats_a: comparison.prob_b_beats_a(),
        expected_lift: comparison.expected_lift(),
        comparison: &comparison,
    };

    if json {
        output::json(&report)
    } else {
        print_report(&report, args.table);
        Ok(())
    }
}

fn print_report(report: &Report<'_>, table: bool) {
    for v in &report.variants {
        output::section(&format!("Version {}", v.name));
        output::kv("Conversions", format!("{}/{}", v.conversions, v.trials));
        output::kv("Posterior", format!("Beta({}, {})", v.alpha, v.beta));
        output::kv("Mean", format!("{:.4}", v.mean));
        output::kv("Mode", output::opt(v.mode));
        output::kv(
            &format!("{:.0}% credible interval", report.credible_level * 100.0),
            format!("[{:.4}, {:.4}]", v.credible_interval.0, v.credible_interval.1),
        );
    }

    output::section("Comparison");
    output::kv("P(B > A)", format!("{:.4}", report.prob_b_beats_a));
    output::kv("Expected lift", format!("{:+.4}", report.expected_lift));

    if table {
        output::section("Posterior densities");
        println!("  {:>8}  {:>12}  {:>12}", "x", "density A", "density B");
        for (x, a, b) in report.comparison.rows() {
            println!("  {x:>8.4}  {a:>12.6}  {b:>12.6}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_rejects_without_clamp() {
        assert!(counts("a", 40, 30, false).is_err());
    }

    #[test]
    fn test_counts_clamps_when_asked() {
        let c = counts("a", 40, 30, true).expect("clamped");
        assert_eq!(c.conversions(), 30);
        assert_eq!(c.trials(), 30);
    }
}
