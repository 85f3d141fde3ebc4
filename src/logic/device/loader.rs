//! Catalog Loader
//!
//! Builds a catalog from an external JSON source (the static seed file or
//! a previously saved catalog). Statuses are always re-derived on load, so
//! a round trip through `DeviceCatalog::to_json` reproduces them exactly.

use std::fs;
use std::path::Path;

use super::catalog::DeviceCatalog;
use super::types::{DeviceError, RawDevice};

/// Parse a JSON array of device descriptions into a catalog
pub fn parse_devices(json: &str) -> Result<DeviceCatalog, DeviceError> {
    let raw: Vec<RawDevice> = serde_json::from_str(json).map_err(|e| DeviceError::ParseError {
        message: e.to_string(),
    })?;
    DeviceCatalog::from_raw(raw)
}

/// Load a catalog from a JSON file
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<DeviceCatalog, DeviceError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| DeviceError::Io {
        message: format!("{}: {}", path.display(), e),
    })?;

    let catalog = parse_devices(&content)?;
    log::info!("Loaded {} devices from {}", catalog.len(), path.display());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_devices() {
        let json = r#"[
            {"name": "Crane_1", "device_type": "Crane Control Unit",
             "location": [0.2, 0.7], "vuln_score": 8.2,
             "cves": ["CVE-2022-1068"]},
            {"name": "Camera_2", "device_type": "IP CCTV Camera",
             "location": [0.6, 0.3], "vuln_score": 3.0}
        ]"#;

        let catalog = parse_devices(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.all()[0].name, "Crane_1");
        assert_eq!(catalog.all()[0].cves, vec!["CVE-2022-1068"]);
        assert!(catalog.all()[1].cves.is_empty());
    }

    #[test]
    fn test_missing_score_is_a_parse_error() {
        let json = r#"[{"name": "x", "device_type": "y", "location": [0.0, 0.0]}]"#;
        assert!(matches!(
            parse_devices(json),
            Err(DeviceError::ParseError { .. })
        ));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        // A saved catalog carries `status`; reloads must not reject it
        let json = r#"[{"name": "x", "device_type": "y", "location": [0.0, 0.0],
                        "vuln_score": 5.0, "cves": [], "status": "AMBER"}]"#;
        let catalog = parse_devices(json).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_from_file("no/such/file.json"),
            Err(DeviceError::Io { .. })
        ));
    }
}
