//! Shodan Text Export Parser
//!
//! Some Shodan exports arrive as plain text: blank-line-separated blocks
//! of `Key: value` lines, one block per host record. This parser converts
//! them to structured data for the analysis pipeline and can persist the
//! result as JSON.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::types::ShodanError;

static BLOCK_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// A parsed text export
#[derive(Debug, Clone, Serialize)]
pub struct ParsedExport {
    /// One key/value map per host block
    pub hosts: Vec<HashMap<String, String>>,
    pub total: usize,
}

/// Vulnerability line pulled out of a text export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextVulnRecord {
    pub ip: String,
    pub port: Option<String>,
    pub service: Option<String>,
    pub cve: Option<String>,
    pub description: Option<String>,
}

/// Roll-up of a parsed export
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub total_hosts: usize,
    pub unique_ips: usize,
    pub countries: Vec<String>,
    pub organizations: Vec<String>,
}

/// Parse export text into host records
pub fn parse_text(content: &str) -> ParsedExport {
    let mut hosts = Vec::new();

    for block in BLOCK_SPLIT.split(content) {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }

        let mut host = HashMap::new();
        for line in block.lines() {
            if let Some((key, value)) = line.split_once(':') {
                host.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        if !host.is_empty() {
            hosts.push(host);
        }
    }

    let total = hosts.len();
    ParsedExport { hosts, total }
}

/// Parse a text export file, optionally writing the structured JSON
pub fn parse_file<P: AsRef<Path>>(
    path: P,
    output: Option<&Path>,
) -> Result<ParsedExport, ShodanError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ShodanError::Io {
        message: format!("{}: {}", path.display(), e),
    })?;

    let parsed = parse_text(&content);
    log::info!("Parsed {} host records from {}", parsed.total, path.display());

    if let Some(out) = output {
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent).map_err(|e| ShodanError::Io {
                message: format!("{}: {}", parent.display(), e),
            })?;
        }
        let json = serde_json::to_string_pretty(&parsed).map_err(|e| ShodanError::ParseError {
            message: e.to_string(),
        })?;
        fs::write(out, json).map_err(|e| ShodanError::Io {
            message: format!("{}: {}", out.display(), e),
        })?;
        log::info!("Saved parsed export to {}", out.display());
    }

    Ok(parsed)
}

/// Map each port to the services seen on it
pub fn extract_port_services(parsed: &ParsedExport) -> BTreeMap<u16, Vec<String>> {
    let mut port_services: BTreeMap<u16, Vec<String>> = BTreeMap::new();

    for host in &parsed.hosts {
        let (Some(port), Some(service)) = (host.get("Port"), host.get("Service")) else {
            continue;
        };
        let Ok(port) = port.parse::<u16>() else {
            continue;
        };

        let services = port_services.entry(port).or_default();
        if !services.contains(service) {
            services.push(service.clone());
        }
    }

    port_services
}

/// Pull vulnerability rows out of the export
pub fn extract_vulnerabilities(parsed: &ParsedExport) -> Vec<TextVulnRecord> {
    parsed
        .hosts
        .iter()
        .filter(|h| h.contains_key("CVE") || h.contains_key("Vulnerability"))
        .map(|h| TextVulnRecord {
            ip: h.get("IP").cloned().unwrap_or_else(|| "Unknown".to_string()),
            port: h.get("Port").cloned(),
            service: h.get("Service").cloned(),
            cve: h.get("CVE").cloned(),
            description: h.get("Vulnerability").cloned(),
        })
        .collect()
}

/// Summarize a parsed export
pub fn summary(parsed: &ParsedExport) -> ExportSummary {
    let mut unique_ips = HashSet::new();
    let mut countries = HashSet::new();
    let mut organizations = HashSet::new();

    for host in &parsed.hosts {
        if let Some(ip) = host.get("IP") {
            unique_ips.insert(ip.clone());
        }
        if let Some(country) = host.get("Country") {
            countries.insert(country.clone());
        }
        if let Some(org) = host.get("Organization") {
            organizations.insert(org.clone());
        }
    }

    let mut countries: Vec<String> = countries.into_iter().collect();
    countries.sort();
    let mut organizations: Vec<String> = organizations.into_iter().collect();
    organizations.sort();

    ExportSummary {
        total_hosts: parsed.hosts.len(),
        unique_ips: unique_ips.len(),
        countries,
        organizations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
IP: 198.51.100.7
Port: 502
Service: modbus
Country: Netherlands
Organization: Harbor Authority


IP: 198.51.100.8
Port: 23
Service: telnet
CVE: CVE-2018-10561
Vulnerability: Authentication bypass
Country: Netherlands
Organization: Terminal Operator

IP: 198.51.100.7
Port: 80
Service: http
Country: Netherlands
Organization: Harbor Authority
";

    #[test]
    fn test_parse_blocks() {
        let parsed = parse_text(SAMPLE);
        assert_eq!(parsed.total, 3);
        assert_eq!(parsed.hosts[0].get("IP").unwrap(), "198.51.100.7");
        assert_eq!(parsed.hosts[1].get("Service").unwrap(), "telnet");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_text("").total, 0);
        assert_eq!(parse_text("\n\n\n").total, 0);
    }

    #[test]
    fn test_extract_port_services() {
        let parsed = parse_text(SAMPLE);
        let ports = extract_port_services(&parsed);

        assert_eq!(ports.len(), 3);
        assert_eq!(ports[&502], vec!["modbus"]);
        assert_eq!(ports[&23], vec!["telnet"]);
    }

    #[test]
    fn test_extract_vulnerabilities() {
        let parsed = parse_text(SAMPLE);
        let vulns = extract_vulnerabilities(&parsed);

        assert_eq!(vulns.len(), 1);
        assert_eq!(vulns[0].ip, "198.51.100.8");
        assert_eq!(vulns[0].cve.as_deref(), Some("CVE-2018-10561"));
    }

    #[test]
    fn test_summary_counts() {
        let parsed = parse_text(SAMPLE);
        let s = summary(&parsed);

        assert_eq!(s.total_hosts, 3);
        assert_eq!(s.unique_ips, 2);
        assert_eq!(s.countries, vec!["Netherlands"]);
        assert_eq!(
            s.organizations,
            vec!["Harbor Authority", "Terminal Operator"]
        );
    }

    #[test]
    fn test_parse_file_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.txt");
        let output = dir.path().join("out/export.json");
        std::fs::write(&input, SAMPLE).unwrap();

        let parsed = parse_file(&input, Some(output.as_path())).unwrap();
        assert_eq!(parsed.total, 3);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["total"], 3);
    }
}
