//! RAG Types
//!
//! Core types for severity classification. No logic here.

use serde::{Deserialize, Serialize};

/// RAG (Red/Amber/Green) severity status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RagStatus {
    /// Critical exposure, immediate attention
    Red,
    /// Elevated exposure, monitor and plan remediation
    Amber,
    /// Acceptable exposure
    Green,
}

impl RagStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RagStatus::Red => "RED",
            RagStatus::Amber => "AMBER",
            RagStatus::Green => "GREEN",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            RagStatus::Red => 2,
            RagStatus::Amber => 1,
            RagStatus::Green => 0,
        }
    }

    /// Marker color for the map/dashboard layer
    pub fn color(&self) -> &'static str {
        match self {
            RagStatus::Red => "#ef4444",   // Red
            RagStatus::Amber => "#f59e0b", // Amber
            RagStatus::Green => "#10b981", // Green
        }
    }
}

impl std::fmt::Display for RagStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
