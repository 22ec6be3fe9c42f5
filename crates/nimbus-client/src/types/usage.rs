//! Storage usage broken down by file category

use super::{wire, FileCategory};
use crate::format::format_size;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Usage of a single category
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryUsage {
    /// Bytes used by the category
    #[serde(deserialize_with = "wire::size")]
    pub size: u64,
    /// Number of files in the category
    #[serde(deserialize_with = "wire::size")]
    pub count: u64,
    /// Share of total usage, 0 to 100
    pub percentage: f64,
}

/// Usage grouped by category name.
///
/// Category sizes should add up to roughly `total_size`; the client does not
/// check this.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UsageBreakdown {
    #[serde(deserialize_with = "wire::size")]
    pub total_size: u64,
    #[serde(deserialize_with = "wire::size")]
    pub total_files: u64,
    pub categories: BTreeMap<String, CategoryUsage>,
}

impl UsageBreakdown {
    /// Usage of a known category, if the server reported it
    pub fn category(&self, category: FileCategory) -> Option<&CategoryUsage> {
        self.categories.get(category.as_str())
    }

    /// Category using the most bytes
    pub fn largest_category(&self) -> Option<(&str, &CategoryUsage)> {
        self.categories
            .iter()
            .max_by_key(|(_, usage)| usage.size)
            .map(|(name, usage)| (name.as_str(), usage))
    }

    pub fn total_size_formatted(&self) -> String {
        format_size(self.total_size)
    }
}
