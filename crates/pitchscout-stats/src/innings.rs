// Innings-pitched conversion from baseball notation.
//
// Box scores record innings as `whole.outs`, where the digit after the point
// counts outs rather than tenths: 5.1 is 5 1/3 innings, 5.2 is 5 2/3.

use serde::{Deserialize, Serialize};

/// Allowed slack on the tenths digit before a fraction counts as out of range.
const FRACTION_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InningsError {
    #[error("innings value {0} is not finite")]
    NotFinite(f64),

    #[error("innings value {0} is negative")]
    Negative(f64),

    #[error("innings value {0} has fractional part outside .0/.1/.2")]
    InvalidFraction(f64),
}

/// What the loader does with an innings value that fails [`validate_innings`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InningsPolicy {
    /// Log a warning and keep the formula result.
    #[default]
    Warn,
    /// Abort the load.
    Reject,
}

/// Convert baseball-notation innings to true innings.
///
/// `whole + fraction * 10 / 3`. A missing value is 0. Fractions other than
/// .1/.2 run through the same formula unchecked; see [`validate_innings`].
pub fn convert_innings(raw: Option<f64>) -> f64 {
    let Some(ip) = raw else {
        return 0.0;
    };
    let whole = ip.trunc();
    let fraction = ip - whole;
    whole + fraction * 10.0 / 3.0
}

/// Check that a raw innings value is finite, non-negative, and has a
/// fractional part of .0, .1, or .2.
pub fn validate_innings(raw: f64) -> Result<(), InningsError> {
    if !raw.is_finite() {
        return Err(InningsError::NotFinite(raw));
    }
    if raw < 0.0 {
        return Err(InningsError::Negative(raw));
    }
    let tenths = (raw - raw.trunc()) * 10.0;
    let outs = tenths.round();
    if (tenths - outs).abs() > FRACTION_TOLERANCE || outs > 2.0 {
        return Err(InningsError::InvalidFraction(raw));
    }
    Ok(())
}
