//! Display formatting for summary values.
//!
//! Ratios are computed as `Option<f64>` (`None` when the denominator is zero)
//! and only turned into strings here, so no `NaN` or `inf` ever reaches a
//! caller.

/// Rendered in place of a value whose denominator is zero.
pub const UNDEFINED: &str = "-";

pub fn proportion(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

pub fn count_proportion(numerator: usize, denominator: usize) -> Option<f64> {
    proportion(numerator as f64, denominator as f64)
}

/// Two decimals, e.g. `"0.72"`.
pub fn decimal(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{:.2}", v + 0.0),
        None => UNDEFINED.to_string(),
    }
}

/// One decimal, e.g. `"4.5"`.
pub fn tenths(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}", value + 0.0)
    } else {
        UNDEFINED.to_string()
    }
}

/// One decimal with an explicit sign for positive values, e.g. `"+3.5"`.
pub fn signed_tenths(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) if v > 0.0 => format!("+{:.1}", v),
        Some(v) => format!("{:.1}", v + 0.0),
        None => UNDEFINED.to_string(),
    }
}

pub fn counts(left: usize, right: usize) -> String {
    format!("{left}:{right}")
}

pub fn count_to_weighted(left: usize, right: f64) -> String {
    format!("{left}:{}", tenths(right))
}

pub fn series(values: &[usize]) -> String {
    values
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(":")
}
