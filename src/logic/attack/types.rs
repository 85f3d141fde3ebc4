//! Attack Analysis Types

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::logic::device::DeviceRecord;

/// A ranked attack path suggestion over the current catalog
#[derive(Debug, Clone, Serialize)]
pub struct AttackVectorSuggestion {
    /// Highest-scoring device; ties broken by earliest catalog position
    pub entry_point: DeviceRecord,
    /// Human-readable strategy text referencing the entry point's type and
    /// status. Enrichment may replace this string but never the selection.
    pub rationale: String,
    /// Remaining devices, ordered by descending vulnerability score
    pub lateral_targets: Vec<DeviceRecord>,
}

/// Full analysis output handed to the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,

    /// None when the catalog was empty at analysis time
    pub suggestion: Option<AttackVectorSuggestion>,

    /// Aggregate 0-10 risk over the whole catalog
    pub risk_score: f64,
    /// Devices at or above the Red threshold
    pub high_vuln_count: usize,
    pub avg_vuln_score: f64,

    /// Which rationale path actually produced the text
    pub rationale_source: String,
}

/// Analysis persistence errors
#[derive(Debug)]
pub enum AnalysisError {
    Io { message: String },
    Serialize { message: String },
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::Io { message } => write!(f, "IO error: {}", message),
            AnalysisError::Serialize { message } => write!(f, "Serialize error: {}", message),
        }
    }
}

impl std::error::Error for AnalysisError {}
