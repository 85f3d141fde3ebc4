//! Rationale Providers
//!
//! Two ways to produce the strategy text: the deterministic rule-based
//! writer and an OpenAI-backed enrichment. The capability is chosen once
//! at configuration time; enrichment failures degrade to the rule-based
//! text and are never surfaced as errors.

use serde_json::json;

use super::types::AttackVectorSuggestion;
use crate::constants;
use crate::logic::device::DeviceRecord;
use crate::logic::rag::rules::AMBER_THRESHOLD;

/// Lateral targets shown in the rule-based text
const MAX_LATERAL_SHOWN: usize = 3;

/// Request timeout for enrichment calls
const ENRICHMENT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// RULE-BASED TEXT
// ============================================================================

/// Deterministic strategy text for a selected entry point.
///
/// References the entry point's device type and RAG status; lists at most
/// three lateral targets at or above the Amber threshold.
pub fn rule_based_rationale(entry: &DeviceRecord, lateral: &[DeviceRecord]) -> String {
    let cves = if entry.cves.is_empty() {
        "None".to_string()
    } else {
        entry.cves.join(", ")
    };

    let mut text = format!(
        "## Potential Attack Vector (Rule-based Analysis)\n\
         \n\
         ### Initial Entry Point\n\
         - **{name}** ({device_type}) - Status: {status}\n\
         - Vulnerability Score: {score}\n\
         - CVEs: {cves}\n\
         \n\
         ### Attack Progression\n\
         1. Attacker exploits vulnerabilities in {name}\n\
         2. Gains initial foothold in the port network\n",
        name = entry.name,
        device_type = entry.device_type,
        status = entry.status(),
        score = entry.vuln_score,
        cves = cves,
    );

    let targets: Vec<&DeviceRecord> = lateral
        .iter()
        .filter(|d| d.vuln_score >= AMBER_THRESHOLD)
        .take(MAX_LATERAL_SHOWN)
        .collect();

    if !targets.is_empty() {
        text.push_str("\n### Lateral Movement Targets\n");
        for (i, target) in targets.iter().enumerate() {
            text.push_str(&format!(
                "{}. **{}** ({}) - Vulnerability Score: {}\n",
                i + 1,
                target.name,
                target.device_type,
                target.vuln_score
            ));
        }
    }

    text.push_str(
        "\n### Recommended Mitigations\n\
         1. Patch all systems with known vulnerabilities\n\
         2. Implement network segmentation\n\
         3. Deploy intrusion detection systems\n\
         4. Regular security assessments\n",
    );

    text
}

// ============================================================================
// PROVIDER INTERFACE
// ============================================================================

/// Produces the rationale text for an already-selected suggestion.
///
/// Implementations may only decorate the text; entry point selection is
/// the recommender's and is done before any provider runs.
pub trait RationaleProvider {
    fn name(&self) -> &'static str;

    fn rationale(
        &self,
        suggestion: &AttackVectorSuggestion,
        devices: &[DeviceRecord],
    ) -> Result<String, EnrichmentError>;
}

/// Deterministic provider; cannot fail
pub struct RuleBasedRationale;

impl RationaleProvider for RuleBasedRationale {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    fn rationale(
        &self,
        suggestion: &AttackVectorSuggestion,
        _devices: &[DeviceRecord],
    ) -> Result<String, EnrichmentError> {
        Ok(rule_based_rationale(
            &suggestion.entry_point,
            &suggestion.lateral_targets,
        ))
    }
}

// ============================================================================
// OPENAI ENRICHMENT
// ============================================================================

/// AI-backed provider (blocking chat-completions call)
pub struct OpenAiRationale {
    api_key: String,
    model: String,
    api_base: String,
}

impl OpenAiRationale {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            api_base: constants::OPENAI_API_BASE.to_string(),
        }
    }

    /// Override the endpoint (tests, proxies)
    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base;
        self
    }

    /// Device inventory section of the prompt, most vulnerable first
    fn build_context(devices: &[DeviceRecord]) -> String {
        let mut sorted: Vec<&DeviceRecord> = devices.iter().collect();
        sorted.sort_by(|a, b| {
            b.vuln_score
                .partial_cmp(&a.vuln_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut context = String::from(
            "The following IoT devices are present in a maritime port environment:\n\n",
        );
        for (i, device) in sorted.iter().enumerate() {
            context.push_str(&format!(
                "{}. {} ({}):\n   - Vulnerability Score: {}\n   - Status: {}\n",
                i + 1,
                device.name,
                device.device_type,
                device.vuln_score,
                device.status()
            ));
            if !device.cves.is_empty() {
                context.push_str(&format!("   - CVEs: {}\n", device.cves.join(", ")));
            }
            context.push('\n');
        }
        context
    }

    fn build_prompt(suggestion: &AttackVectorSuggestion, devices: &[DeviceRecord]) -> String {
        format!(
            "{context}\
             The device selected as the initial entry point is {entry} \
             ({entry_type}, status {status}).\n\n\
             Based on these devices and their vulnerabilities, generate a detailed \
             cyber attack scenario that could target this maritime port. Include:\n\n\
             1. Initial entry point (use the selected device above)\n\
             2. Step-by-step attack progression\n\
             3. Potential lateral movement between devices\n\
             4. Impact assessment\n\
             5. Recommended mitigations\n\n\
             Format your response with markdown headers and bullet points for readability.",
            context = Self::build_context(devices),
            entry = suggestion.entry_point.name,
            entry_type = suggestion.entry_point.device_type,
            status = suggestion.entry_point.status(),
        )
    }
}

impl RationaleProvider for OpenAiRationale {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn rationale(
        &self,
        suggestion: &AttackVectorSuggestion,
        devices: &[DeviceRecord],
    ) -> Result<String, EnrichmentError> {
        let body = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": "You are a cybersecurity expert specializing in maritime infrastructure security."
                },
                {
                    "role": "user",
                    "content": Self::build_prompt(suggestion, devices)
                }
            ],
            "max_tokens": 1200,
            "temperature": 0.7
        });

        let url = format!("{}/chat/completions", self.api_base);
        let response = ureq::post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .timeout(std::time::Duration::from_secs(ENRICHMENT_TIMEOUT_SECS))
            .send_json(body)
            .map_err(|e| EnrichmentError::NetworkError {
                message: e.to_string(),
            })?;

        let payload: serde_json::Value =
            response
                .into_json()
                .map_err(|e| EnrichmentError::ParseError {
                    message: e.to_string(),
                })?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(EnrichmentError::EmptyResponse)
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Enrichment error types
#[derive(Debug, Clone)]
pub enum EnrichmentError {
    NetworkError { message: String },
    ParseError { message: String },
    EmptyResponse,
}

impl std::fmt::Display for EnrichmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrichmentError::NetworkError { message } => write!(f, "Network error: {}", message),
            EnrichmentError::ParseError { message } => write!(f, "Parse error: {}", message),
            EnrichmentError::EmptyResponse => write!(f, "Empty enrichment response"),
        }
    }
}

impl std::error::Error for EnrichmentError {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::device::RawDevice;

    fn device(name: &str, device_type: &str, score: f64, cves: Vec<&str>) -> DeviceRecord {
        DeviceRecord::new(RawDevice {
            name: name.to_string(),
            device_type: device_type.to_string(),
            location: [0.5, 0.5],
            vuln_score: score,
            cves: cves.into_iter().map(String::from).collect(),
            description: None,
        })
        .unwrap()
    }

    #[test]
    fn test_rule_based_references_type_and_status() {
        let entry = device("Crane_1", "Crane Control Unit", 8.2, vec!["CVE-2022-1068"]);
        let text = rule_based_rationale(&entry, &[]);

        assert!(text.contains("Crane_1"));
        assert!(text.contains("Crane Control Unit"));
        assert!(text.contains("Status: RED"));
        assert!(text.contains("CVE-2022-1068"));
    }

    #[test]
    fn test_rule_based_without_cves() {
        let entry = device("Sensor_1", "Water Level Sensor", 7.1, vec![]);
        let text = rule_based_rationale(&entry, &[]);
        assert!(text.contains("CVEs: None"));
        assert!(!text.contains("Lateral Movement Targets"));
    }

    #[test]
    fn test_lateral_cutoff_and_cap() {
        let entry = device("entry", "PLC", 9.0, vec![]);
        let lateral = vec![
            device("a", "PLC", 6.0, vec![]),
            device("b", "PLC", 5.0, vec![]),
            device("c", "PLC", 4.0, vec![]),
            device("d", "PLC", 4.0, vec![]),
            device("e", "PLC", 3.9, vec![]),
        ];
        let text = rule_based_rationale(&entry, &lateral);

        // Top three at or above the Amber threshold; sub-Amber devices and
        // overflow are left out
        assert!(text.contains("**a**"));
        assert!(text.contains("**b**"));
        assert!(text.contains("**c**"));
        assert!(!text.contains("**d**"));
        assert!(!text.contains("**e**"));
    }

    #[test]
    fn test_prompt_mentions_selected_entry_point() {
        let devices = vec![
            device("Crane_1", "Crane Control Unit", 8.2, vec![]),
            device("Camera_2", "IP CCTV Camera", 3.0, vec![]),
        ];
        let suggestion = crate::logic::attack::recommender::recommend(&devices).unwrap();
        let prompt = OpenAiRationale::build_prompt(&suggestion, &devices);

        assert!(prompt.contains("entry point is Crane_1"));
        assert!(prompt.contains("maritime port"));
    }
}
