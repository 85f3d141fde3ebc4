//! Device Types
//!
//! Data structures for catalog entries. The derived `status` field is
//! cached on the record but has a single writer path: construction,
//! `set_vuln_score` and `DeviceCatalog::classify_all`. External code only
//! reads it.

use serde::{Deserialize, Serialize};

use crate::logic::rag::{self, RagStatus};

/// Raw device description as supplied by an external loader.
///
/// `vuln_score` is required; a record without one is a parse error, not a
/// device with a default status. A `status` field in the input is ignored
/// and recomputed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDevice {
    pub name: String,
    pub device_type: String,
    pub location: [f64; 2],
    pub vuln_score: f64,
    #[serde(default)]
    pub cves: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One IoT device known to the session catalog
#[derive(Debug, Clone, Serialize)]
pub struct DeviceRecord {
    pub name: String,
    pub device_type: String,
    /// Normalized [x, y] position on the reference port image, each
    /// conventionally in [0.0, 1.0]. Not validated.
    pub location: [f64; 2],
    pub vuln_score: f64,
    pub cves: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Derived from `vuln_score`; never an independent source of truth
    status: RagStatus,
}

impl DeviceRecord {
    /// Build a record, deriving the initial status.
    ///
    /// Rejects non-finite scores so no status is ever silently defaulted.
    pub fn new(raw: RawDevice) -> Result<Self, DeviceError> {
        if !raw.vuln_score.is_finite() {
            return Err(DeviceError::InvalidScore {
                name: raw.name,
                value: raw.vuln_score,
            });
        }

        Ok(Self {
            status: rag::classify(raw.vuln_score),
            name: raw.name,
            device_type: raw.device_type,
            location: raw.location,
            vuln_score: raw.vuln_score,
            cves: raw.cves,
            description: raw.description,
        })
    }

    /// Current RAG status (derived, read-only)
    pub fn status(&self) -> RagStatus {
        self.status
    }

    /// Update the score and re-derive the status in one step
    pub fn set_vuln_score(&mut self, score: f64) -> Result<(), DeviceError> {
        if !score.is_finite() {
            return Err(DeviceError::InvalidScore {
                name: self.name.clone(),
                value: score,
            });
        }
        self.vuln_score = score;
        self.status = rag::classify(score);
        Ok(())
    }

    /// Recompute the cached status from the current score.
    ///
    /// Catalog-internal; part of the single writer path for `status`.
    pub(crate) fn reclassify(&mut self) {
        self.status = rag::classify(self.vuln_score);
    }
}

/// Device validation errors
#[derive(Debug, Clone)]
pub enum DeviceError {
    /// Score is NaN or infinite
    InvalidScore { name: String, value: f64 },
    /// Malformed device description
    ParseError { message: String },
    /// Seed file could not be read
    Io { message: String },
}

impl std::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceError::InvalidScore { name, value } => {
                write!(f, "Invalid vulnerability score {} for device '{}'", value, name)
            }
            DeviceError::ParseError { message } => write!(f, "Parse error: {}", message),
            DeviceError::Io { message } => write!(f, "IO error: {}", message),
        }
    }
}

impl std::error::Error for DeviceError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, score: f64) -> RawDevice {
        RawDevice {
            name: name.to_string(),
            device_type: "PLC".to_string(),
            location: [0.5, 0.5],
            vuln_score: score,
            cves: vec![],
            description: None,
        }
    }

    #[test]
    fn test_status_derived_on_construction() {
        let device = DeviceRecord::new(raw("Crane_1", 8.2)).unwrap();
        assert_eq!(device.status(), RagStatus::Red);
    }

    #[test]
    fn test_set_vuln_score_rederives_status() {
        let mut device = DeviceRecord::new(raw("Camera_2", 3.0)).unwrap();
        assert_eq!(device.status(), RagStatus::Green);

        device.set_vuln_score(7.0).unwrap();
        assert_eq!(device.status(), RagStatus::Red);
    }

    #[test]
    fn test_non_finite_scores_rejected() {
        assert!(DeviceRecord::new(raw("bad", f64::NAN)).is_err());
        assert!(DeviceRecord::new(raw("bad", f64::INFINITY)).is_err());

        let mut device = DeviceRecord::new(raw("ok", 1.0)).unwrap();
        assert!(device.set_vuln_score(f64::NAN).is_err());
        // Score and status untouched after a rejected update
        assert_eq!(device.vuln_score, 1.0);
        assert_eq!(device.status(), RagStatus::Green);
    }
}
