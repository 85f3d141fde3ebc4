//! Logic Module - Business Logic & Engines
//!
//! - `rag/` - RAG (Red/Amber/Green) severity classification
//! - `device/` - Device records and the session catalog
//! - `attack/` - Attack vector recommendation and analysis reports
//! - `external_intel/` - Shodan queries, host risk assessment, parsing

pub mod attack;
pub mod device;
pub mod external_intel;
pub mod rag;
