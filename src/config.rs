//! Defaults for front ends, loadable from TOML.
//!
//! Every field falls back to a compiled default, so a file only needs the
//! values it changes:
//!
//! ```
//! use posterior_grid::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::from_toml("[binomial]\ngrid_points = 100\n").unwrap();
//! assert_eq!(config.binomial.grid_points, 100);
//! assert_eq!(config.binomial.water, 6);
//! assert_eq!(config.ab_test.curve_points, 1000);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bayesian::{PriorShape, DEFAULT_CURVE_POINTS};

/// Configuration loading and validation errors.
///
/// ```
/// use posterior_grid::config::{AnalysisConfig, ConfigError};
///
/// match AnalysisConfig::from_toml("[ab_test]\ncurve_points = 1") {
///     Err(ConfigError::ValidationFailed { field, .. }) => {
///         assert_eq!(field, "ab_test.curve_points");
///     }
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// File that failed to open
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML or has mistyped values.
    #[error("Failed to parse config {path}: {message}")]
    ParseError {
        /// File being parsed (`<string>` for in-memory documents)
        path: String,
        /// Parser diagnostic
        message: String,
    },

    /// A value parsed but is outside its allowed range.
    #[error("Invalid config value for {field}: {message}")]
    ValidationFailed {
        /// Dotted key of the offending value, e.g. `ab_test.curve_points`
        field: String,
        /// Allowed range
        message: String,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    pub binomial: BinomialDefaults,
    pub ab_test: AbTestDefaults,
}

/// Defaults for the globe-tossing grid posterior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinomialDefaults {
    /// Grid resolution. Default: 40.
    pub grid_points: usize,
    /// Observed "water" count (successes). Default: 6.
    pub water: u64,
    /// Observed "land" count (failures). Default: 3.
    pub land: u64,
    /// Mass of the reported percentile interval. Default: 0.89.
    pub interval_mass: f64,
    /// Prior over the water fraction. Default: uniform.
    pub prior: PriorShape,
}

impl Default for BinomialDefaults {
    fn default() -> Self {
        Self {
            grid_points: 40,
            water: 6,
            land: 3,
            interval_mass: 0.89,
            prior: PriorShape::Uniform,
        }
    }
}

/// Defaults for the two-variant conversion comparison.
///
/// Counts are not range-checked here: front ends merge them with their own
/// overrides first and validate the result through `VariantCounts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbTestDefaults {
    /// Conversions observed for version A. Default: 15.
    pub conversions_a: u64,
    /// Visitors shown version A. Default: 30.
    pub trials_a: u64,
    /// Conversions observed for version B. Default: 25.
    pub conversions_b: u64,
    /// Visitors shown version B. Default: 30.
    pub trials_b: u64,
    /// Beta prior α shared by both variants. Default: 1.
    pub alpha_prior: f64,
    /// Beta prior β shared by both variants. Default: 1.
    pub beta_prior: f64,
    /// Density curve resolution. Default: 1000.
    pub curve_points: usize,
    /// Credible interval level. Default: 0.95.
    pub credible_level: f64,
}

impl Default for AbTestDefaults {
    fn default() -> Self {
        Self {
            conversions_a: 15,
            trials_a: 30,
            conversions_b: 25,
            trials_b: 30,
            alpha_prior: 1.0,
            beta_prior: 1.0,
            curve_points: DEFAULT_CURVE_POINTS,
            credible_level: 0.95,
        }
    }
}

impl AnalysisConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` for malformed TOML and `ValidationFailed` for
    /// out-of-range values.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Self::parse(toml_str, "<string>")
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, otherwise as
    /// [`AnalysisConfig::from_toml`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: shown.clone(),
            source,
        })?;
        let config = Self::parse(&contents, &shown)?;
        tracing::debug!(path = %shown, "config loaded");
        Ok(config)
    }

    fn parse(toml_str: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |field: &str, message: &str| {
            Err(ConfigError::ValidationFailed {
                field: field.to_string(),
                message: message.to_string(),
            })
        };

        let b = &self.binomial;
        if b.grid_points == 0 {
            return fail("binomial.grid_points", "must be > 0");
        }
        if b.prior.validate().is_err() {
            return fail("binomial.prior.threshold", "must be between 0.0 and 1.0");
        }
        if !(b.interval_mass > 0.0 && b.interval_mass <= 1.0) {
            return fail("binomial.interval_mass", "must be in (0, 1]");
        }

        let ab = &self.ab_test;
        if !(ab.alpha_prior.is_finite() && ab.alpha_prior > 0.0) {
            return fail("ab_test.alpha_prior", "must be > 0");
        }
        if !(ab.beta_prior.is_finite() && ab.beta_prior > 0.0) {
            return fail("ab_test.beta_prior", "must be > 0");
        }
        if ab.curve_points < 2 {
            return fail("ab_test.curve_points", "must be >= 2");
        }
        if !(ab.credible_level > 0.0 && ab.credible_level < 1.0) {
            return fail("ab_test.credible_level", "must be in (0, 1)");
        }
        Ok(())
    }
}
