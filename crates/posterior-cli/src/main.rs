//! posterior - grid posteriors and Bayesian A/B tests from the terminal
//!
//! Usage:
//!   posterior binomial                         # 6 water, 3 land, 40 grid points
//!   posterior binomial --water 3 --land 0      # all water
//!   posterior binomial --prior step            # zero prior mass below 0.5
//!   posterior ab-test                          # 15/30 vs 25/30
//!   posterior ab-test --table                  # include density curves
//!   posterior --json ab-test                   # machine-readable output

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use posterior_grid::config::AnalysisConfig;

mod commands;
mod error;
mod logging;
mod output;

use commands::ab_test::{self, AbTestArgs};
use commands::binomial::{self, BinomialArgs, PriorArg};
use error::Result;

/// posterior - grid-approximated posteriors and conversion comparisons
#[derive(Parser)]
#[command(name = "posterior")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// TOML file with default inputs
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging (overridden by POSTERIOR_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Grid posterior of the water fraction from water/land counts
    Binomial {
        /// Times "water" was observed
        #[arg(long)]
        water: Option<u64>,

        /// Times "land" was observed
        #[arg(long)]
        land: Option<u64>,

        /// Number of grid points in [0, 1]
        #[arg(long)]
        grid_points: Option<usize>,

        /// Prior shape
        #[arg(long, value_enum)]
        prior: Option<PriorArg>,

        /// Threshold for the step prior (implies --prior step)
        #[arg(long)]
        step_threshold: Option<f64>,

        /// Mass of the reported percentile interval
        #[arg(long)]
        interval: Option<f64>,
    },

    /// Compare Beta posteriors of two conversion rates
    AbTest {
        /// Conversions for version A
        #[arg(long)]
        conversions_a: Option<u64>,

        /// Trials for version A
        #[arg(long)]
        trials_a: Option<u64>,

        /// Conversions for version B
        #[arg(long)]
        conversions_b: Option<u64>,

        /// Trials for version B
        #[arg(long)]
        trials_b: Option<u64>,

        /// Beta prior alpha for both versions
        #[arg(long)]
        alpha_prior: Option<f64>,

        /// Beta prior beta for both versions
        #[arg(long)]
        beta_prior: Option<f64>,

        /// Points on each density curve
        #[arg(long)]
        curve_points: Option<usize>,

        /// Clamp invalid counts instead of failing
        #[arg(long)]
        clamp: bool,

        /// Print the density curves
        #[arg(long)]
        table: bool,
    },
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    tracing::debug!(config_file = ?cli.config, json = cli.json, "configuration resolved");

    match cli.command {
        Commands::Binomial {
            water,
            land,
            grid_points,
            prior,
            step_threshold,
            interval,
        } => {
            let args = BinomialArgs {
                water,
                land,
                grid_points,
                prior,
                step_threshold,
                interval,
            };
            binomial::run(&args, &config.binomial, cli.json)
        }

        Commands::AbTest {
            conversions_a,
            trials_a,
            conversions_b,
            trials_b,
            alpha_prior,
            beta_prior,
            curve_points,
            clamp,
            table,
        } => {
            let args = AbTestArgs {
                conversions_a,
                trials_a,
                conversions_b,
                trials_b,
                alpha_prior,
                beta_prior,
                curve_points,
                clamp,
                table,
            };
            ab_test::run(&args, &config.ab_test, cli.json)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
