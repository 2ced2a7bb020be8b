//! Globe-tossing grid posterior.

use clap::ValueEnum;
use posterior_grid::bayesian::{GridApproximation, GridPosterior, PriorShape};
use posterior_grid::config::BinomialDefaults;
use posterior_grid::PosteriorError;
use serde::Serialize;

use crate::error::Result;
use crate::output;

/// Prior choice on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PriorArg {
    Uniform,
    Step,
}

/// Flags for `posterior binomial`; `None` falls back to config.
#[derive(Debug, Clone, Default)]
pub(crate) struct BinomialArgs {
    pub(crate) water: Option<u64>,
    pub(crate) land: Option<u64>,
    pub(crate) grid_points: Option<usize>,
    pub(crate) prior: Option<PriorArg>,
    pub(crate) step_threshold: Option<f64>,
    pub(crate) interval: Option<f64>,
}

#[derive(Debug, Serialize)]
struct Summary {
    map: f64,
    mean: f64,
    std_dev: f64,
    interval_mass: f64,
    interval: (f64, f64),
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    water: u64,
    land: u64,
    prior: PriorShape,
    summary: Summary,
    #[serde(flatten)]
    posterior: &'a GridPosterior,
}

/// Resolve the prior from flags, falling back to the configured one.
fn resolve_prior(args: &BinomialArgs, defaults: &BinomialDefaults) -> PriorShape {
    let configured_threshold = match defaults.prior {
        PriorShape::Step { threshold } => Some(threshold),
        PriorShape::Uniform => None,
    };
    match (args.prior, args.step_threshold) {
        (Some(PriorArg::Uniform), _) => PriorShape::Uniform,
        (Some(PriorArg::Step), threshold) => PriorShape::Step {
            threshold: threshold.or(configured_threshold).unwrap_or(0.5),
        },
        (None, Some(threshold)) => PriorShape::Step { threshold },
        (None, None) => defaults.prior,
    }
}

/// Run the binomial command
pub(crate) fn run(args: &BinomialArgs, defaults: &BinomialDefaults, json: bool) -> Result<()> {
    let water = args.water.unwrap_or(defaults.water);
    let land = args.land.unwrap_or(defaults.land);
    let grid_points = args.grid_points.unwrap_or(defaults.grid_points);
    let interval_mass = args.interval.unwrap_or(defaults.interval_mass);
    let prior = resolve_prior(args, defaults);

    let total = water.checked_add(land).ok_or_else(|| {
        PosteriorError::invalid_argument("water + land", format!("{water} + {land}"), "<= u64::MAX")
    })?;

    let posterior = GridApproximation::new(grid_points)
        .with_prior(prior)
        .fit(total, water)?;

    let summary = Summary {
        map: posterior.map_estimate(),
        mean: posterior.mean(),
        std_dev: posterior.std_dev(),
        interval_mass,
        interval: posterior.percentile_interval(interval_mass)?,
    };

    let report = Report {
        water,
        land,
        prior,
        summary,
        posterior: &posterior,
    };

    if json {
        output::json(&report)
    } else {
        print_report(&report);
        Ok(())
    }
}

fn print_report(report: &Report<'_>) {
    output::section("Grid Posterior");
    output::kv("Water", report.water);
    output::kv("Land", report.land);
    output::kv("Grid points", report.posterior.len());
    match report.prior {
        PriorShape::Uniform => output::kv("Prior", "uniform"),
        PriorShape::Step { threshold } => output::kv("Prior", format!("step at {threshold}")),
    }

    output::section("Summary");
    let s = &report.summary;
    output::kv("MAP", format!("{:.4}", s.map));
    output::kv("Mean", format!("{:.4}", s.mean));
    output::kv("Std dev", format!("{:.4}", s.std_dev));
    output::kv(
        &format!("{:.0}% interval", s.interval_mass * 100.0),
        format!("[{:.4}, {:.4}]", s.interval.0, s.interval.1),
    );

    output::section("Posterior");
    let max = report
        .posterior
        .posterior()
        .iter()
        .copied()
        .fold(0.0_f64, f64::max);
    println!("  {:>8}  {:>10}", "p", "mass");
    for (p, mass) in report.posterior.points() {
        println!("  {p:>8.4}  {mass:>10.6}  {}", output::bar(mass, max, 40));
    }
}
