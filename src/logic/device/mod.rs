//! Device Module - Records & Session Catalog
//!
//! Owns the IoT device inventory for one dashboard session. The catalog is
//! created at session start, passed by reference into every operation and
//! dropped at session end; there is no process-wide device list.

pub mod catalog;
pub mod loader;
pub mod types;


pub use catalog::{CatalogStats, DeviceCatalog};
pub use types::{DeviceError, DeviceRecord, RawDevice};
