//! External Intelligence Module
//!
//! Shodan-backed scanning for the port-city view: query generation, a
//! blocking API client with rate limiting and offline samples, host risk
//! assessment, and a parser for raw text exports.

pub mod analysis;
pub mod parser;
pub mod query;
pub mod shodan;
pub mod types;

pub use analysis::{analyze_host, host_to_device, mitigation_recommendations};
pub use query::{build_search_query, city_coordinates};
pub use shodan::ShodanClient;
pub use types::{HostRiskAssessment, RiskLevel, ShodanError, ShodanHost};
