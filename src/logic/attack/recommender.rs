//! Attack Vector Recommender
//!
//! Pure selection logic: pick the entry point, order the lateral targets,
//! attach the deterministic rule-based rationale. No state, no IO.

use super::rationale::rule_based_rationale;
use super::types::AttackVectorSuggestion;
use crate::logic::device::DeviceRecord;

/// Recommend an attack path over the given devices.
///
/// The entry point is the maximum-score device; on duplicate maxima the
/// earliest position wins, so the result is deterministic for a given
/// input order. An empty input yields `None`, never a fault.
pub fn recommend(devices: &[DeviceRecord]) -> Option<AttackVectorSuggestion> {
    let mut entry_idx = 0usize;
    for (i, device) in devices.iter().enumerate() {
        // Strictly greater: first occurrence of the maximum is kept
        if device.vuln_score > devices[entry_idx].vuln_score {
            entry_idx = i;
        }
    }
    let entry_point = devices.get(entry_idx)?.clone();

    let mut lateral_targets: Vec<DeviceRecord> = devices
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != entry_idx)
        .map(|(_, d)| d.clone())
        .collect();
    // Stable sort: equal scores keep their catalog order
    lateral_targets.sort_by(|a, b| {
        b.vuln_score
            .partial_cmp(&a.vuln_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let rationale = rule_based_rationale(&entry_point, &lateral_targets);

    Some(AttackVectorSuggestion {
        entry_point,
        rationale,
        lateral_targets,
    })
}
