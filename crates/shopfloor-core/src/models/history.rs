//! Finalization history records.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Snapshot of a product taken when it was finalized.
///
/// History entries outlive the product they describe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: u64,
    pub product_id: u64,
    pub name: String,
    pub description: String,
    pub registered_at: Timestamp,
    pub finalized_at: Timestamp,
}
