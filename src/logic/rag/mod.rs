//! RAG Module - Severity Classification
//!
//! Maps a device vulnerability score to a three-valued Red/Amber/Green
//! status. Pure functions only; the catalog owns status storage.

pub mod classifier;
pub mod rules;
pub mod types;

pub use classifier::{classify, classify_with_thresholds};
pub use rules::RagThresholds;
pub use types::RagStatus;
