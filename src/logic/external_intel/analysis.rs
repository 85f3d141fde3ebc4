//! Host Risk Assessment
//!
//! Rule-based scoring of a scanned host: per-service exposure from a table
//! of ICS/maritime-relevant ports, vulnerability findings from the host's
//! CVE list, and a weighted 0-10 aggregate. Also converts an assessed host
//! into a catalog device for the digital-twin view.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::types::{
    HostRiskAssessment, RiskLevel, ServiceExposure, ShodanHost, ShodanService, VulnFinding,
};
use crate::logic::device::{DeviceError, DeviceRecord, RawDevice};
use crate::logic::rag::rules::{AMBER_THRESHOLD, RED_THRESHOLD};

/// Weight of service exposure in the aggregate
const SERVICE_WEIGHT: f64 = 0.4;

/// Weight of known vulnerabilities in the aggregate
const VULN_WEIGHT: f64 = 0.6;

/// Severity assumed for CVEs not in the local table
const DEFAULT_CVE_SEVERITY: f64 = 7.0;

/// Exposure risk for services not in the table
const DEFAULT_SERVICE_RISK: f64 = 0.4;

/// Exposure risk per well-known port, 0.0-1.0.
/// ICS protocols exposed to the internet dominate the table.
static SERVICE_RISK: Lazy<HashMap<u16, (&'static str, f64)>> = Lazy::new(|| {
    HashMap::from([
        (21, ("ftp", 0.7)),
        (22, ("ssh", 0.4)),
        (23, ("telnet", 0.9)),
        (80, ("http", 0.5)),
        (102, ("s7", 0.9)),
        (161, ("snmp", 0.7)),
        (443, ("https", 0.3)),
        (502, ("modbus", 0.9)),
        (1911, ("fox", 0.8)),
        (3389, ("rdp", 0.75)),
        (5900, ("vnc", 0.8)),
        (20000, ("dnp3", 0.85)),
        (44818, ("ethernet-ip", 0.85)),
        (47808, ("bacnet", 0.8)),
    ])
});

/// Severities for CVEs commonly seen on exposed port infrastructure.
/// Anything else gets `DEFAULT_CVE_SEVERITY`.
static KNOWN_CVES: Lazy<HashMap<&'static str, (f64, &'static str)>> = Lazy::new(|| {
    HashMap::from([
        ("CVE-2015-5374", (7.8, "Siemens SIPROTEC denial of service")),
        ("CVE-2017-7921", (10.0, "Hikvision camera authentication bypass")),
        ("CVE-2018-10561", (9.8, "GPON router authentication bypass")),
        ("CVE-2019-6340", (8.1, "Drupal remote code execution")),
        ("CVE-2020-14750", (9.8, "Oracle WebLogic remote code execution")),
        ("CVE-2021-44228", (10.0, "Log4j remote code execution (Log4Shell)")),
        ("CVE-2022-1068", (9.8, "Modbus tools buffer overflow")),
    ])
});

fn service_name(svc: &ShodanService) -> String {
    if let Some(module) = svc.shodan.as_ref().and_then(|s| s.module.as_deref()) {
        return module.to_string();
    }
    SERVICE_RISK
        .get(&svc.port)
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn service_risk(port: u16) -> f64 {
    SERVICE_RISK
        .get(&port)
        .map(|(_, risk)| *risk)
        .unwrap_or(DEFAULT_SERVICE_RISK)
}

/// Assess one scanned host
pub fn analyze_host(host: &ShodanHost) -> HostRiskAssessment {
    let open_services: Vec<ServiceExposure> = host
        .data
        .iter()
        .map(|svc| ServiceExposure {
            port: svc.port,
            service: service_name(svc),
            product: svc.product.clone().unwrap_or_else(|| "unknown".to_string()),
            version: svc.version.clone().unwrap_or_else(|| "unknown".to_string()),
            risk: service_risk(svc.port),
        })
        .collect();

    let vulnerabilities: Vec<VulnFinding> = host
        .vulns
        .iter()
        .map(|id| {
            let (severity, description) = KNOWN_CVES
                .get(id.as_str())
                .copied()
                .unwrap_or((DEFAULT_CVE_SEVERITY, "Listed in Shodan vulnerability data"));
            VulnFinding {
                id: id.clone(),
                severity,
                description: description.to_string(),
            }
        })
        .collect();

    // Service component: worst exposed service on a 0-10 scale
    let service_component = open_services
        .iter()
        .map(|s| s.risk)
        .fold(0.0f64, f64::max)
        * 10.0;

    // Vulnerability component: worst severity, nudged up by volume
    let vuln_component = if vulnerabilities.is_empty() {
        0.0
    } else {
        let max_severity = vulnerabilities
            .iter()
            .map(|v| v.severity)
            .fold(0.0f64, f64::max);
        (max_severity + 0.5 * (vulnerabilities.len() as f64 - 1.0)).min(10.0)
    };

    let risk_score = round1(
        (service_component * SERVICE_WEIGHT + vuln_component * VULN_WEIGHT).clamp(0.0, 10.0),
    );

    // Same band boundaries as the device RAG view
    let risk_level = if risk_score >= RED_THRESHOLD {
        RiskLevel::High
    } else if risk_score >= AMBER_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    HostRiskAssessment {
        ip: host.ip_str.clone(),
        risk_score,
        risk_level,
        vulnerabilities,
        open_services,
    }
}

/// Prioritized hardening advice for an assessed host
pub fn mitigation_recommendations(assessment: &HostRiskAssessment) -> Vec<String> {
    let mut recs = Vec::new();

    if !assessment.vulnerabilities.is_empty() {
        let ids: Vec<&str> = assessment
            .vulnerabilities
            .iter()
            .map(|v| v.id.as_str())
            .collect();
        recs.push(format!(
            "CRITICAL: Patch known vulnerabilities immediately: {}",
            ids.join(", ")
        ));
    }

    if assessment.open_services.iter().any(|s| s.service == "telnet") {
        recs.push("URGENT: Disable Telnet and replace with SSH".to_string());
    }

    let ics: Vec<&str> = assessment
        .open_services
        .iter()
        .filter(|s| {
            matches!(
                s.service.as_str(),
                "modbus" | "s7" | "dnp3" | "bacnet" | "ethernet-ip" | "fox"
            )
        })
        .map(|s| s.service.as_str())
        .collect();
    if !ics.is_empty() {
        recs.push(format!(
            "HIGH: Isolate ICS protocols from the public internet: {}",
            ics.join(", ")
        ));
    }

    if assessment
        .open_services
        .iter()
        .any(|s| matches!(s.service.as_str(), "rdp" | "vnc"))
    {
        recs.push("HIGH: Restrict remote desktop access to a VPN".to_string());
    }

    recs.push("Implement network segmentation between IT and OT zones".to_string());
    recs.push("Schedule regular vulnerability assessments".to_string());

    recs
}

/// Convert an assessed host into a catalog device for the twin view.
///
/// Placed at the image center; the frontend repositions markers once real
/// coordinates are mapped onto the reference image.
pub fn host_to_device(
    host: &ShodanHost,
    assessment: &HostRiskAssessment,
) -> Result<DeviceRecord, DeviceError> {
    let description = format!(
        "Port system in {}, {}",
        host.city.as_deref().unwrap_or("Unknown"),
        host.country_name.as_deref().unwrap_or("Unknown")
    );

    DeviceRecord::new(RawDevice {
        name: format!("Port System {}", host.ip_str),
        device_type: "ICS/SCADA".to_string(),
        location: [0.5, 0.5],
        vuln_score: assessment.risk_score,
        cves: host.vulns.clone(),
        description: Some(description),
    })
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rag::RagStatus;

    fn service(port: u16, module: Option<&str>) -> ShodanService {
        ShodanService {
            port,
            transport: Some("tcp".to_string()),
            product: None,
            version: None,
            shodan: module.map(|m| super::super::types::ShodanModuleInfo {
                module: Some(m.to_string()),
            }),
        }
    }

    fn host(vulns: Vec<&str>, data: Vec<ShodanService>) -> ShodanHost {
        ShodanHost {
            ip_str: "198.51.100.7".to_string(),
            org: Some("Harbor Authority".to_string()),
            city: Some("Rotterdam".to_string()),
            country_name: Some("Netherlands".to_string()),
            latitude: Some(51.9244),
            longitude: Some(4.4777),
            vulns: vulns.into_iter().map(String::from).collect(),
            ports: data.iter().map(|s| s.port).collect(),
            data,
        }
    }

    #[test]
    fn test_exposed_ics_with_vulns_is_high() {
        let h = host(
            vec!["CVE-2022-1068", "CVE-2015-5374"],
            vec![service(502, Some("modbus")), service(23, None)],
        );
        let assessment = analyze_host(&h);

        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert!(assessment.risk_score >= 7.0);
        assert_eq!(assessment.open_services.len(), 2);
        assert_eq!(assessment.vulnerabilities[0].severity, 9.8);
    }

    #[test]
    fn test_hardened_host_is_low() {
        let h = host(vec![], vec![service(443, Some("https"))]);
        let assessment = analyze_host(&h);

        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert!(assessment.risk_score < 4.0);
    }

    #[test]
    fn test_no_services_no_vulns_scores_zero() {
        let assessment = analyze_host(&host(vec![], vec![]));
        assert_eq!(assessment.risk_score, 0.0);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_unknown_cve_uses_default_severity() {
        let assessment = analyze_host(&host(vec!["CVE-2099-0001"], vec![]));
        assert_eq!(assessment.vulnerabilities[0].severity, DEFAULT_CVE_SEVERITY);
    }

    #[test]
    fn test_recommendations_prioritized() {
        let h = host(
            vec!["CVE-2022-1068"],
            vec![service(502, Some("modbus")), service(23, Some("telnet"))],
        );
        let recs = mitigation_recommendations(&analyze_host(&h));

        assert!(recs[0].starts_with("CRITICAL:"));
        assert!(recs.iter().any(|r| r.starts_with("URGENT:") && r.contains("Telnet")));
        assert!(recs.iter().any(|r| r.starts_with("HIGH:") && r.contains("modbus")));
    }

    #[test]
    fn test_host_to_device() {
        let h = host(
            vec!["CVE-2022-1068"],
            vec![service(502, Some("modbus"))],
        );
        let assessment = analyze_host(&h);
        let device = host_to_device(&h, &assessment).unwrap();

        assert_eq!(device.name, "Port System 198.51.100.7");
        assert_eq!(device.device_type, "ICS/SCADA");
        assert_eq!(device.vuln_score, assessment.risk_score);
        assert_eq!(device.status(), RagStatus::Red);
        assert_eq!(
            device.description.as_deref(),
            Some("Port system in Rotterdam, Netherlands")
        );
    }
}
