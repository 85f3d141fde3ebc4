//! Device Catalog
//!
//! Insertion-ordered device inventory for one session. Insertion order is
//! part of the contract: the attack recommender breaks score ties by
//! earliest position.

use serde::Serialize;

use super::types::{DeviceError, DeviceRecord, RawDevice};
use crate::logic::rag::RagStatus;

/// The session's device inventory
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DeviceCatalog {
    devices: Vec<DeviceRecord>,
}

/// Catalog roll-up for the dashboard header
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub red: usize,
    pub amber: usize,
    pub green: usize,
    pub avg_vuln_score: f64,
}

impl DeviceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from loader-supplied raw descriptions.
    ///
    /// Statuses are derived here; the input is never trusted to carry them.
    pub fn from_raw(raw: Vec<RawDevice>) -> Result<Self, DeviceError> {
        let devices = raw
            .into_iter()
            .map(DeviceRecord::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { devices })
    }

    /// Append a device, preserving insertion order.
    ///
    /// Duplicate names are permitted; name uniqueness is a soft invariant
    /// owned by data suppliers, not enforced here.
    pub fn add(&mut self, device: DeviceRecord) {
        self.devices.push(device);
    }

    /// Replace the device with the same name, or append.
    ///
    /// Used when a scanned host is re-imported so the catalog does not
    /// accumulate stale copies of the same system.
    pub fn upsert(&mut self, device: DeviceRecord) {
        self.devices.retain(|d| d.name != device.name);
        self.devices.push(device);
    }

    /// Read-only view in insertion order
    pub fn all(&self) -> &[DeviceRecord] {
        &self.devices
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeviceRecord> {
        self.devices.iter()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Re-derive every cached status from the current scores.
    ///
    /// Call after appends or any external score mutation.
    pub fn classify_all(&mut self) {
        for device in &mut self.devices {
            device.reclassify();
        }
    }

    /// Roll-up counts per status plus the average score
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            total: self.devices.len(),
            red: 0,
            amber: 0,
            green: 0,
            avg_vuln_score: 0.0,
        };

        if self.devices.is_empty() {
            return stats;
        }

        let mut sum = 0.0;
        for device in &self.devices {
            sum += device.vuln_score;
            match device.status() {
                RagStatus::Red => stats.red += 1,
                RagStatus::Amber => stats.amber += 1,
                RagStatus::Green => stats.green += 1,
            }
        }
        stats.avg_vuln_score = sum / self.devices.len() as f64;
        stats
    }

    /// Serialize the catalog (including derived statuses) to JSON
    pub fn to_json(&self) -> Result<String, DeviceError> {
        serde_json::to_string_pretty(&self.devices).map_err(|e| DeviceError::ParseError {
            message: e.to_string(),
        })
    }
}

impl<'a> IntoIterator for &'a DeviceCatalog {
    type Item = &'a DeviceRecord;
    type IntoIter = std::slice::Iter<'a, DeviceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.iter()
    }
}
