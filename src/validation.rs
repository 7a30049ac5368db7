//! Form input checks run before a workout is constructed.

use crate::workout::WorkoutKind;
use crate::TrackerError;

/// True iff every value is a finite number.
pub fn are_all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// True iff every value is strictly greater than zero.
pub fn are_all_positive(values: &[f64]) -> bool {
    values.iter().all(|&v| v > 0.0)
}

/// Coerce raw field text to a number the way a browser's unary `+` does:
/// blank text is `0`, `0x`/`0o`/`0b` prefixes read as unsigned integers in
/// that base, anything unparseable is `NaN`. Spellings of infinity and NaN
/// are not matched exactly, but every such value fails [`are_all_finite`].
pub fn parse_field(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(value) = parse_prefixed_integer(trimmed) {
        return value;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// `None` when `text` has no radix prefix; `NaN` when the digits are bad.
fn parse_prefixed_integer(text: &str) -> Option<f64> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(f64::NAN))
}

/// Numbers read from the form for one submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldValues {
    pub distance: f64,
    pub duration: f64,
    /// Temperature for a run, climb for a ride.
    pub extra: f64,
}

/// Field values that passed both checks for a given kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidEntry {
    pub kind: WorkoutKind,
    pub distance: f64,
    pub duration: f64,
    pub extra: f64,
}

/// Check the three numbers relevant to `kind`. Positivity applies to the
/// extra field for both kinds, climb included.
pub fn validate(kind: WorkoutKind, values: FieldValues) -> Result<ValidEntry, TrackerError> {
    let checked = [values.distance, values.duration, values.extra];
    if !are_all_finite(&checked) || !are_all_positive(&checked) {
        return Err(TrackerError::InvalidInput);
    }
    Ok(ValidEntry {
        kind,
        distance: values.distance,
        duration: values.duration,
        extra: values.extra,
    })
}
