//! Account storage quota

use super::wire;
use crate::format::format_size;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Percentage at which a quota counts as almost full
pub const ALMOST_FULL_PERCENTAGE: f64 = 90.0;

/// Current storage usage against the account's tier limits.
///
/// `percentage` is computed by the server; `storage_used <= storage_limit` is
/// expected but not enforced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuotaStatus {
    /// Tier name, e.g. `free`
    pub tier: String,
    /// Bytes in use
    #[serde(deserialize_with = "wire::size")]
    pub storage_used: u64,
    /// Bytes allowed
    #[serde(deserialize_with = "wire::size")]
    pub storage_limit: u64,
    /// Usage percentage, 0 to 100
    pub percentage: f64,
    /// Number of stored files
    #[serde(deserialize_with = "wire::size")]
    pub files_count: u64,
    /// Largest single upload allowed, in bytes
    #[serde(deserialize_with = "wire::size")]
    pub file_size_limit: u64,
    /// Capability names enabled for the tier
    pub features: Vec<String>,
    /// End of the paid subscription, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_expires_at: Option<DateTime<Utc>>,
}

impl QuotaStatus {
    /// Bytes left before the limit
    pub fn remaining(&self) -> u64 {
        self.storage_limit.saturating_sub(self.storage_used)
    }

    pub fn is_almost_full(&self) -> bool {
        self.percentage >= ALMOST_FULL_PERCENTAGE
    }

    pub fn is_full(&self) -> bool {
        self.percentage >= 100.0
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    pub fn used_formatted(&self) -> String {
        format_size(self.storage_used)
    }

    pub fn limit_formatted(&self) -> String {
        format_size(self.storage_limit)
    }

    pub fn remaining_formatted(&self) -> String {
        format_size(self.remaining())
    }
}
