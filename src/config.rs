//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::constants;

/// How the attack-vector rationale is produced.
///
/// Resolved exactly once from configuration; per-call branching on API key
/// presence is deliberately not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RationaleMode {
    /// Deterministic rule-based text only
    RuleBased,
    /// AI-generated text with rule-based fallback
    Enriched,
}

/// Core configuration
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Shodan API key (scans disabled when absent)
    pub shodan_api_key: Option<String>,

    /// OpenAI API key (rationale enrichment disabled when absent)
    pub openai_api_key: Option<String>,

    /// Model used for rationale enrichment
    pub openai_model: String,

    /// Offline mode: never call external services, use bundled samples
    pub simulation_mode: bool,

    /// Seed catalog path
    pub seed_data_path: PathBuf,

    /// Directory for saved analyses
    pub analysis_dir: PathBuf,
}

impl CoreConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            shodan_api_key: env::var("SHODAN_API_KEY").ok().filter(|k| !k.is_empty()),

            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),

            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| constants::DEFAULT_OPENAI_MODEL.to_string()),

            simulation_mode: env::var("PORTSHIELD_SIMULATION")
                .map(|s| s.to_lowercase() != "false" && s != "0")
                .unwrap_or(false),

            seed_data_path: env::var("PORTSHIELD_SEED_DATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(constants::DEFAULT_SEED_DATA)),

            analysis_dir: env::var("PORTSHIELD_ANALYSIS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(constants::DEFAULT_ANALYSIS_DIR)),
        }
    }

    /// Resolve the rationale capability for this session
    pub fn rationale_mode(&self) -> RationaleMode {
        if self.openai_api_key.is_some() && !self.simulation_mode {
            RationaleMode::Enriched
        } else {
            RationaleMode::RuleBased
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            shodan_api_key: None,
            openai_api_key: None,
            openai_model: constants::DEFAULT_OPENAI_MODEL.to_string(),
            simulation_mode: false,
            seed_data_path: PathBuf::from(constants::DEFAULT_SEED_DATA),
            analysis_dir: PathBuf::from(constants::DEFAULT_ANALYSIS_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rationale_mode_requires_key() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.rationale_mode(), RationaleMode::RuleBased);

        let cfg = CoreConfig {
            openai_api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.rationale_mode(), RationaleMode::Enriched);
    }

    #[test]
    fn test_simulation_mode_forces_rule_based() {
        let cfg = CoreConfig {
            openai_api_key: Some("sk-test".to_string()),
            simulation_mode: true,
            ..Default::default()
        };
        assert_eq!(cfg.rationale_mode(), RationaleMode::RuleBased);
    }
}
