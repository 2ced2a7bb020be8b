//! Output formatting utilities

use colored::Colorize;
use serde::Serialize;

use crate::error::Result;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print a warning message
pub(crate) fn warning(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// Print any serializable value as pretty JSON on stdout
pub(crate) fn json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Horizontal bar of `width` cells scaled by `value / max`
pub(crate) fn bar(value: f64, max: f64, width: usize) -> String {
    if !(max > 0.0) || !value.is_finite() {
        return String::new();
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let cells = ((value / max).clamp(0.0, 1.0) * width as f64).round() as usize;
    "#".repeat(cells)
}

/// Format an optional number, `-` when absent
pub(crate) fn opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}
