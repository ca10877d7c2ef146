//! Lenient numeric coercion for student-entered values.
//!
//! Students type answers into free-form inputs, so values arrive as JSON numbers, numeric
//! strings, strings with trailing units (`"12cm"`) or garbage. [`parse_number`] reads the
//! longest leading decimal literal and yields `NaN` when there is none, so a malformed answer
//! compares as not-equal instead of aborting the grading call.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static LEADING_DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?))")
        .expect("leading decimal pattern is valid")
});

/// Coerce a JSON value to `f64`, returning `NaN` when no number can be read.
pub fn parse_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_str(s),
        _ => f64::NAN,
    }
}

/// Same as [`parse_number`] for an optional field; absent reads as `NaN`.
pub fn parse_field(value: Option<&Value>) -> f64 {
    value.map(parse_number).unwrap_or(f64::NAN)
}

fn parse_str(s: &str) -> f64 {
    LEADING_DECIMAL
        .captures(s)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Slack added to every tolerance so that a difference of exactly `tolerance` in decimal
/// (e.g. `45.1 - 45` against `0.1`) still matches after binary rounding.
const FLOAT_SLACK: f64 = 1e-9;

/// `true` when `a` and `b` differ by at most `tolerance`. Any `NaN` makes this `false`.
#[inline]
pub fn within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance + FLOAT_SLACK
}
