//! Shodan API Client
//!
//! Blocking client for host lookups and searches, with a per-minute rate
//! window and sample-file save/load so the dashboard can run offline in
//! simulation mode.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::types::{ShodanError, ShodanHost, ShodanSearchResponse};
use crate::constants::SHODAN_API_BASE;

/// Requests allowed per minute window
const RATE_LIMIT_PER_MINUTE: u32 = 60;

/// Request timeout
const REQUEST_TIMEOUT_SECS: u64 = 30;

struct RateWindow {
    minute_start: Instant,
    requests: u32,
}

impl RateWindow {
    fn new() -> Self {
        Self {
            minute_start: Instant::now(),
            requests: 0,
        }
    }

    /// Count one request, or report how long to wait
    fn check(&mut self) -> Result<(), ShodanError> {
        let now = Instant::now();

        if now.duration_since(self.minute_start) >= Duration::from_secs(60) {
            self.minute_start = now;
            self.requests = 0;
        }

        if self.requests >= RATE_LIMIT_PER_MINUTE {
            let wait = 60 - now.duration_since(self.minute_start).as_secs();
            return Err(ShodanError::RateLimited { retry_after: wait });
        }

        self.requests += 1;
        Ok(())
    }
}

pub struct ShodanClient {
    api_key: Option<String>,
    limiter: Mutex<RateWindow>,
}

impl ShodanClient {
    pub fn new(api_key: Option<String>) -> Self {
        if api_key.is_none() {
            log::warn!("No Shodan API key provided, live lookups disabled");
        }
        Self {
            api_key,
            limiter: Mutex::new(RateWindow::new()),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("SHODAN_API_KEY").ok().filter(|k| !k.is_empty()))
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn key(&self) -> Result<&str, ShodanError> {
        self.api_key.as_deref().ok_or(ShodanError::MissingApiKey)
    }

    /// Search hosts matching a query (blocking)
    pub fn search(&self, query: &str, limit: u32) -> Result<ShodanSearchResponse, ShodanError> {
        let key = self.key()?;
        self.limiter.lock().check()?;

        let url = format!("{}/shodan/host/search", SHODAN_API_BASE);
        let response = ureq::get(&url)
            .query("key", key)
            .query("query", query)
            .query("limit", &limit.to_string())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .call()
            .map_err(map_ureq_error)?;

        response
            .into_json::<ShodanSearchResponse>()
            .map_err(|e| ShodanError::ParseError {
                message: e.to_string(),
            })
    }

    /// Look up a single IP (blocking)
    pub fn host_info(&self, ip: &str) -> Result<ShodanHost, ShodanError> {
        let key = self.key()?;
        self.limiter.lock().check()?;

        let url = format!("{}/shodan/host/{}", SHODAN_API_BASE, ip);
        let response = ureq::get(&url)
            .query("key", key)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .call()
            .map_err(map_ureq_error)?;

        response
            .into_json::<ShodanHost>()
            .map_err(|e| ShodanError::ParseError {
                message: e.to_string(),
            })
    }

    /// Save a host response for offline simulation
    pub fn save_sample<P: AsRef<Path>>(
        host: &ShodanHost,
        dir: P,
        filename: &str,
    ) -> Result<PathBuf, ShodanError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| ShodanError::Io {
            message: format!("{}: {}", dir.display(), e),
        })?;

        let path = dir.join(filename);
        let json = serde_json::to_string_pretty(host).map_err(|e| ShodanError::ParseError {
            message: e.to_string(),
        })?;
        fs::write(&path, json).map_err(|e| ShodanError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;

        log::info!("Saved Shodan sample to {}", path.display());
        Ok(path)
    }

    /// Load a saved host response
    pub fn load_sample<P: AsRef<Path>>(path: P) -> Result<ShodanHost, ShodanError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ShodanError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| ShodanError::ParseError {
            message: e.to_string(),
        })
    }
}

fn map_ureq_error(err: ureq::Error) -> ShodanError {
    match err {
        ureq::Error::Status(404, _) => ShodanError::NotFound,
        ureq::Error::Status(429, _) => ShodanError::RateLimited { retry_after: 60 },
        other => ShodanError::NetworkError {
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_client_errors() {
        let client = ShodanClient::new(None);
        assert!(!client.is_configured());
        assert!(matches!(
            client.host_info("198.51.100.1"),
            Err(ShodanError::MissingApiKey)
        ));
    }

    #[test]
    fn test_rate_window_counts_and_limits() {
        let mut window = RateWindow::new();
        for _ in 0..RATE_LIMIT_PER_MINUTE {
            assert!(window.check().is_ok());
        }
        assert!(matches!(
            window.check(),
            Err(ShodanError::RateLimited { .. })
        ));
    }

    #[test]
    fn test_sample_round_trip() {
        let host = ShodanHost {
            ip_str: "198.51.100.7".to_string(),
            org: Some("Harbor Authority".to_string()),
            city: Some("Rotterdam".to_string()),
            country_name: Some("Netherlands".to_string()),
            latitude: Some(51.9244),
            longitude: Some(4.4777),
            vulns: vec!["CVE-2015-5374".to_string()],
            ports: vec![502],
            data: vec![],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = ShodanClient::save_sample(&host, dir.path(), "clean_sample.json").unwrap();
        let loaded = ShodanClient::load_sample(path).unwrap();

        assert_eq!(loaded.ip_str, "198.51.100.7");
        assert_eq!(loaded.vulns, vec!["CVE-2015-5374"]);
    }

    #[test]
    fn test_load_sample_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            ShodanClient::load_sample(&path),
            Err(ShodanError::ParseError { .. })
        ));
    }
}
