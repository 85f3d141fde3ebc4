//! RAG Classifier
//!
//! Pure score-to-status mapping. Input: vulnerability score. Output:
//! RagStatus. The caller owns any stored status; this module never reads
//! or writes one.

use super::rules::RagThresholds;
use super::types::RagStatus;

/// Classify a vulnerability score with the default thresholds.
///
/// Total and deterministic for every finite input; negative scores fall
/// into Green. Non-finite scores are rejected upstream at record
/// construction and never reach this function.
pub fn classify(vuln_score: f64) -> RagStatus {
    classify_with_thresholds(vuln_score, &RagThresholds::default())
}

/// Classify with custom thresholds
pub fn classify_with_thresholds(vuln_score: f64, thresholds: &RagThresholds) -> RagStatus {
    if vuln_score >= thresholds.red_min {
        RagStatus::Red
    } else if vuln_score >= thresholds.amber_min {
        RagStatus::Amber
    } else {
        RagStatus::Green
    }
}
