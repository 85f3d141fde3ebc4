//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.

/// App name
pub const APP_NAME: &str = "PortShield";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default seed catalog shipped with the crate
pub const DEFAULT_SEED_DATA: &str = "data/sample_devices.json";

/// Default directory for saved attack analyses
pub const DEFAULT_ANALYSIS_DIR: &str = "data/analysis";

/// Default filename for a saved attack analysis
pub const DEFAULT_ANALYSIS_FILE: &str = "attack_analysis.json";

/// OpenAI chat completions endpoint
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Default model for rationale enrichment
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Shodan REST API base
pub const SHODAN_API_BASE: &str = "https://api.shodan.io";

/// Default search term for port-city scans
pub const DEFAULT_SEARCH_TERM: &str = "ICS";

/// Default search radius around a port city (km)
pub const DEFAULT_SEARCH_RADIUS_KM: u32 = 5;
