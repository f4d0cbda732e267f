// Value formatting for report cells. Nothing non-finite ever reaches output.

/// Marker for a value that is missing or not a finite number.
pub const NOT_AVAILABLE: &str = "N/A";

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Fixed decimals, or `N/A`.
pub fn fixed(value: Option<f64>, decimals: usize) -> String {
    match finite(value) {
        Some(v) => format!("{v:.decimals$}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// A 0..1 rate as a percentage with one decimal, or `N/A`.
pub fn percent(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) => format!("{:.1}%", v * 100.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// A counting stat as a whole number (truncated), or `missing`.
pub fn count_or(value: Option<f64>, missing: &str) -> String {
    match finite(value) {
        Some(v) => format!("{}", v.trunc() as i64),
        None => missing.to_string(),
    }
}

/// Innings in the notation they were recorded in (`5.1`), or `missing`.
pub fn innings_or(value: Option<f64>, missing: &str) -> String {
    match finite(value) {
        Some(v) => format!("{v:.1}"),
        None => missing.to_string(),
    }
}

/// Free text, or `missing` when absent.
pub fn text_or(value: Option<&str>, missing: &str) -> String {
    value.unwrap_or(missing).to_string()
}
