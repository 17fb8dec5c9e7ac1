//! Free-text print duration parsing.
//!
//! Accepts the shapes people type into a quote form: `2h30`, `2h30min`,
//! `2h`, `h45`, `150min`, or a bare number of minutes such as `90`.

use thiserror::Error;

const HOUR_MARKER: char = 'h';
const MINUTE_MARKER: &str = "min";

/// Shown to users whenever a duration cannot be interpreted
pub const DURATION_HINT: &str = "Could not interpret the duration. Use formats like `2h30` or `150min`.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("duration is empty")]
    Empty,
    #[error("hour segment '{0}' is not a whole number")]
    InvalidHours(String),
    #[error("minute segment '{0}' is not a whole number")]
    InvalidMinutes(String),
    #[error("'{0}' is not a non-negative number of minutes")]
    InvalidNumber(String),
}

impl FormatError {
    /// Single message suitable for showing to the person who typed the value
    pub fn user_message(&self) -> &'static str {
        DURATION_HINT
    }
}

/// Parse a duration expression into fractional hours
pub fn parse_duration(text: &str) -> Result<f64, FormatError> {
    let normalized: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    if normalized.is_empty() {
        return Err(FormatError::Empty);
    }

    let (hours, minutes) = if let Some((left, right)) = normalized.split_once(HOUR_MARKER) {
        let hours = if left.is_empty() {
            0
        } else {
            left.parse::<u64>()
                .map_err(|_| FormatError::InvalidHours(left.to_string()))?
        };
        (hours, parse_minute_segment(right)?)
    } else if normalized.contains(MINUTE_MARKER) {
        (0, parse_minute_segment(&normalized)?)
    } else {
        let minutes = normalized
            .parse::<f64>()
            .ok()
            .filter(|m| m.is_finite() && *m >= 0.0)
            .ok_or_else(|| FormatError::InvalidNumber(normalized.clone()))?;
        return Ok(minutes / 60.0);
    };

    Ok(hours as f64 + minutes as f64 / 60.0)
}

/// Minutes after the hour marker, or a whole `NNmin` expression.
/// Empty means zero; anything after the `min` marker is rejected.
fn parse_minute_segment(segment: &str) -> Result<u64, FormatError> {
    if segment.is_empty() {
        return Ok(0);
    }

    let digits = match segment.find(MINUTE_MARKER) {
        Some(idx) if idx + MINUTE_MARKER.len() == segment.len() => &segment[..idx],
        Some(_) => return Err(FormatError::InvalidMinutes(segment.to_string())),
        None => segment,
    };

    digits
        .parse::<u64>()
        .map_err(|_| FormatError::InvalidMinutes(segment.to_string()))
}
