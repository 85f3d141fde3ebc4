//! Attack Module - Vector Recommendation & Analysis
//!
//! Selects the most advantageous entry point from the catalog, builds a
//! strategy rationale (rule-based, optionally AI-enriched) and rolls the
//! result into an analysis report for the dashboard.

pub mod analyzer;
pub mod rationale;
pub mod recommender;
pub mod types;

pub use analyzer::AttackVectorAnalyzer;
pub use rationale::{OpenAiRationale, RationaleProvider, RuleBasedRationale};
pub use recommender::recommend;
pub use types::{AnalysisError, AnalysisReport, AttackVectorSuggestion};
