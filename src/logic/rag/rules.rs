//! RAG Classification Rules & Thresholds
//!
//! Threshold definitions only; the classify logic lives in `classifier`.

use serde::{Deserialize, Serialize};

/// At or above this score = Red
pub const RED_THRESHOLD: f64 = 7.0;

/// At or above this score (and below RED_THRESHOLD) = Amber
pub const AMBER_THRESHOLD: f64 = 4.0;

/// Thresholds for classification (configurable)
///
/// Band boundaries are inclusive: a score equal to a threshold belongs to
/// the higher-severity band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagThresholds {
    /// At or above this = Red
    pub red_min: f64,
    /// At or above this = Amber, below = Green
    pub amber_min: f64,
}

impl Default for RagThresholds {
    fn default() -> Self {
        Self {
            red_min: RED_THRESHOLD,
            amber_min: AMBER_THRESHOLD,
        }
    }
}

impl RagThresholds {
    /// High sensitivity - lower thresholds, more devices flagged
    pub fn high_sensitivity() -> Self {
        Self {
            red_min: 6.0,
            amber_min: 3.0,
        }
    }

    /// Low sensitivity - higher thresholds, fewer devices flagged
    pub fn low_sensitivity() -> Self {
        Self {
            red_min: 8.0,
            amber_min: 5.0,
        }
    }
}
