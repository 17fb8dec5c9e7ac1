//! Best-effort metadata scan over sliced G-code.
//!
//! Only two slicer comment markers are read:
//! - `;TIME_ELAPSED:<seconds>`
//! - `;Filament used: <meters>m`
//!
//! Everything else in the file is ignored.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::AppError;
use crate::pricing::PrintJob;

/// Grams per meter of 1.75 mm PLA filament
pub const PLA_GRAMS_PER_METER: f64 = 1.24;

static TIME_ELAPSED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^;TIME_ELAPSED:(\d+(?:\.\d+)?)\s*$").unwrap()
});

static FILAMENT_USED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^;Filament used:\s*(\d+(?:\.\d+)?)m\b").unwrap()
});

/// Values recovered from a G-code file; absent fields were not found
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GCodeMetadata {
    pub hours: Option<f64>,
    pub filament_grams: Option<f64>,
}

impl GCodeMetadata {
    pub fn is_complete(&self) -> bool {
        self.hours.is_some() && self.filament_grams.is_some()
    }

    /// Names of the values that could not be extracted
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.hours.is_none() {
            missing.push("print time");
        }
        if self.filament_grams.is_none() {
            missing.push("filament usage");
        }
        missing
    }

    /// Build a job only when both values were found
    pub fn to_print_job(&self) -> Result<PrintJob, AppError> {
        match (self.hours, self.filament_grams) {
            (Some(hours), Some(filament_grams)) => Ok(PrintJob { hours, filament_grams }),
            _ => Err(AppError::MissingMetadata(self.missing_fields())),
        }
    }
}

/// Scan G-code text for the elapsed-time and filament markers
///
/// Slicers repeat `;TIME_ELAPSED:` at every layer change with a running
/// total, so the last occurrence is the job duration.
pub fn extract(text: &str) -> GCodeMetadata {
    let hours = TIME_ELAPSED_RE
        .captures_iter(text)
        .last()
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .map(|seconds| seconds / 3600.0);

    let filament_grams = FILAMENT_USED_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .map(|meters| meters * PLA_GRAMS_PER_METER);

    GCodeMetadata { hours, filament_grams }
}

/// Same as [`extract`] for raw uploads that may not be valid UTF-8
pub fn extract_bytes(bytes: &[u8]) -> GCodeMetadata {
    extract(&String::from_utf8_lossy(bytes))
}
