use serde::{Deserialize, Serialize};

/// Color reported when no threshold (or no threshold color) applies.
pub const NO_THRESHOLD_COLOR: &str = "transparent";

/// Labeled band of the 0-100 score range, inclusive at both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub color: Option<String>,
    pub min: f64,
    pub max: f64,
}

impl Threshold {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn display_color(&self) -> &str {
        match self.color.as_deref() {
            Some(color) if !color.is_empty() => color,
            _ => NO_THRESHOLD_COLOR,
        }
    }
}

/// Returns the first threshold, in list order, containing the rounded score.
///
/// Bands may overlap or leave gaps; authoring order decides which of two
/// overlapping bands wins.
pub fn find_matching_threshold(score: f64, thresholds: &[Threshold]) -> Option<&Threshold> {
    let rounded = round_half_up(score);
    thresholds.iter().find(|threshold| threshold.contains(rounded))
}

/// Nearest integer with halves rounded towards positive infinity. NaN stays NaN.
pub(crate) fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
