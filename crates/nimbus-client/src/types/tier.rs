//! Service plans

use super::wire;
use crate::format::format_size;
use serde::{Deserialize, Serialize};

/// A purchasable service tier.
///
/// A price of zero marks a free tier; a negative price marks a custom plan
/// that is priced by contacting sales.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierOffering {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "wire::size")]
    pub storage_limit: u64,
    #[serde(deserialize_with = "wire::size")]
    pub file_size_limit: u64,
    pub price: f64,
    pub currency: String,
    pub billing_period: String,
    pub features: Vec<String>,
    pub is_popular: bool,
    pub is_current: bool,
}

impl TierOffering {
    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }

    pub fn is_custom(&self) -> bool {
        self.price < 0.0
    }

    /// Price for display: `Free`, `Custom`, or e.g. `9.99 USD/month`
    pub fn display_price(&self) -> String {
        if self.is_custom() {
            "Custom".to_string()
        } else if self.is_free() {
            "Free".to_string()
        } else {
            format!("{:.2} {}/{}", self.price, self.currency, self.billing_period)
        }
    }

    pub fn storage_limit_formatted(&self) -> String {
        format_size(self.storage_limit)
    }

    pub fn file_size_limit_formatted(&self) -> String {
        format_size(self.file_size_limit)
    }
}
