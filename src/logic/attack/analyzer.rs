//! Attack Vector Analyzer
//!
//! Drives the recommender over a catalog, applies the configured rationale
//! provider and rolls everything into an `AnalysisReport`. The provider is
//! fixed at construction; a failing enrichment degrades to the rule-based
//! text without touching the entry point.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use super::rationale::{OpenAiRationale, RationaleProvider, RuleBasedRationale};
use super::recommender::recommend;
use super::types::{AnalysisError, AnalysisReport};
use crate::config::{CoreConfig, RationaleMode};
use crate::constants;
use crate::logic::device::DeviceCatalog;
use crate::logic::rag::rules::RED_THRESHOLD;

/// Weight of the catalog-wide average score in the aggregate risk
const AVG_SCORE_WEIGHT: f64 = 0.7;

/// Risk added per Red-status device
const HIGH_VULN_WEIGHT: f64 = 0.6;

pub struct AttackVectorAnalyzer {
    provider: Box<dyn RationaleProvider>,
}

impl AttackVectorAnalyzer {
    /// Rule-based analyzer, no external calls
    pub fn rule_based() -> Self {
        Self {
            provider: Box::new(RuleBasedRationale),
        }
    }

    pub fn with_provider(provider: Box<dyn RationaleProvider>) -> Self {
        Self { provider }
    }

    /// Resolve the provider from configuration, once per session
    pub fn from_config(config: &CoreConfig) -> Self {
        match config.rationale_mode() {
            RationaleMode::Enriched => {
                // Key presence is implied by the mode
                let key = config.openai_api_key.clone().unwrap_or_default();
                log::info!("Rationale enrichment enabled (model: {})", config.openai_model);
                Self::with_provider(Box::new(OpenAiRationale::new(
                    key,
                    config.openai_model.clone(),
                )))
            }
            RationaleMode::RuleBased => Self::rule_based(),
        }
    }

    /// Analyze the catalog and produce a report.
    ///
    /// An empty catalog yields a report with no suggestion and zeroed
    /// metrics; it is not an error.
    pub fn analyze(&self, catalog: &DeviceCatalog) -> AnalysisReport {
        let devices = catalog.all();

        let mut suggestion = recommend(devices);
        let mut rationale_source = "rule-based".to_string();

        if let Some(s) = suggestion.as_mut() {
            match self.provider.rationale(s, devices) {
                Ok(text) => {
                    s.rationale = text;
                    rationale_source = self.provider.name().to_string();
                }
                Err(e) => {
                    // Degrade, keep the deterministic text already attached
                    log::warn!(
                        "Rationale enrichment via {} failed ({}), using rule-based text",
                        self.provider.name(),
                        e
                    );
                    rationale_source = format!("rule-based ({} unavailable)", self.provider.name());
                }
            }
        }

        let (risk_score, high_vuln_count, avg_vuln_score) = aggregate_metrics(catalog);

        AnalysisReport {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            suggestion,
            risk_score,
            high_vuln_count,
            avg_vuln_score,
            rationale_source,
        }
    }

    /// Save a report as pretty-printed JSON, creating the directory
    pub fn save_report<P: AsRef<Path>>(
        report: &AnalysisReport,
        dir: P,
    ) -> Result<PathBuf, AnalysisError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| AnalysisError::Io {
            message: format!("{}: {}", dir.display(), e),
        })?;

        let path = dir.join(constants::DEFAULT_ANALYSIS_FILE);
        let json = serde_json::to_string_pretty(report).map_err(|e| AnalysisError::Serialize {
            message: e.to_string(),
        })?;
        fs::write(&path, json).map_err(|e| AnalysisError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;

        log::info!("Analysis saved to {}", path.display());
        Ok(path)
    }
}

/// Catalog-wide aggregate: `min(10, avg * 0.7 + red_count * 0.6)`,
/// rounded to one decimal like the per-device scores shown on the UI.
fn aggregate_metrics(catalog: &DeviceCatalog) -> (f64, usize, f64) {
    if catalog.is_empty() {
        return (0.0, 0, 0.0);
    }

    let devices = catalog.all();
    let avg = devices.iter().map(|d| d.vuln_score).sum::<f64>() / devices.len() as f64;
    let high = devices
        .iter()
        .filter(|d| d.vuln_score >= RED_THRESHOLD)
        .count();

    let risk = (avg * AVG_SCORE_WEIGHT + high as f64 * HIGH_VULN_WEIGHT).min(10.0);

    (round1(risk), high, round1(avg))
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
