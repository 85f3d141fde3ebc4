//! External Intelligence Types

use serde::{Deserialize, Serialize};

// ============================================================================
// SHODAN API TYPES
// ============================================================================

/// One host as returned by the Shodan API.
///
/// Lenient on purpose: everything except the IP is optional or defaulted,
/// since sample exports and live responses vary in shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShodanHost {
    pub ip_str: String,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// CVE identifiers known for this host
    #[serde(default)]
    pub vulns: Vec<String>,
    #[serde(default)]
    pub ports: Vec<u16>,
    /// Per-service banners
    #[serde(default)]
    pub data: Vec<ShodanService>,
}

/// One service banner on a host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShodanService {
    pub port: u16,
    #[serde(default)]
    pub transport: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Shodan module name, e.g. "modbus", "s7", "http"
    #[serde(default, rename = "_shodan")]
    pub shodan: Option<ShodanModuleInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShodanModuleInfo {
    #[serde(default)]
    pub module: Option<String>,
}

/// Search endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct ShodanSearchResponse {
    #[serde(default)]
    pub matches: Vec<ShodanHost>,
    #[serde(default)]
    pub total: u64,
}

// ============================================================================
// RISK ASSESSMENT TYPES
// ============================================================================

/// Coarse risk level for a scanned host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One known vulnerability on a scanned host
#[derive(Debug, Clone, Serialize)]
pub struct VulnFinding {
    pub id: String,
    /// CVSS-scale severity, 0-10
    pub severity: f64,
    pub description: String,
}

/// One exposed service with its assessed risk
#[derive(Debug, Clone, Serialize)]
pub struct ServiceExposure {
    pub port: u16,
    pub service: String,
    pub product: String,
    pub version: String,
    /// Relative exposure risk, 0.0-1.0
    pub risk: f64,
}

/// Full risk assessment for one host
#[derive(Debug, Clone, Serialize)]
pub struct HostRiskAssessment {
    pub ip: String,
    /// Aggregate risk, 0-10
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub vulnerabilities: Vec<VulnFinding>,
    pub open_services: Vec<ServiceExposure>,
}

// ============================================================================
// ERRORS
// ============================================================================

/// Shodan client error types
#[derive(Debug, Clone)]
pub enum ShodanError {
    /// No API key configured
    MissingApiKey,
    /// Rate limit exceeded
    RateLimited { retry_after: u64 },
    /// Host not found
    NotFound,
    /// Network error
    NetworkError { message: String },
    /// Parse error
    ParseError { message: String },
    /// Sample file error
    Io { message: String },
}

impl std::fmt::Display for ShodanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShodanError::MissingApiKey => write!(f, "Shodan API key not configured"),
            ShodanError::RateLimited { retry_after } => {
                write!(f, "Rate limited, retry after {} seconds", retry_after)
            }
            ShodanError::NotFound => write!(f, "Host not found on Shodan"),
            ShodanError::NetworkError { message } => write!(f, "Network error: {}", message),
            ShodanError::ParseError { message } => write!(f, "Parse error: {}", message),
            ShodanError::Io { message } => write!(f, "IO error: {}", message),
        }
    }
}

impl std::error::Error for ShodanError {}

/// Query building errors
#[derive(Debug, Clone)]
pub enum QueryError {
    /// City is not in the port-city table
    UnknownCity { city: String },
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::UnknownCity { city } => {
                write!(f, "City '{}' not found in the port-city database", city)
            }
        }
    }
}

impl std::error::Error for QueryError {}
