//! Domain models decoded from service responses
//!
//! All models are immutable values built from a response payload. Wire keys
//! are snake_case. Size and count fields accept both integer and
//! floating-point JSON numbers.

mod file;
mod page;
mod quota;
mod tier;
mod usage;

pub use file::{FileCategory, FileRecord, UploadOutcome};
pub use page::Page;
pub use quota::QuotaStatus;
pub use tier::TierOffering;
pub use usage::{CategoryUsage, UsageBreakdown};

use crate::{ClientError, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Opaque user metadata attached to a file
pub type Metadata = BTreeMap<String, Value>;

/// Conversion between a model and its JSON wire form
pub trait WireModel: Serialize + DeserializeOwned {
    /// Decode from a JSON value, failing with
    /// [`ClientError::MalformedPayload`] on missing or mistyped fields
    fn from_wire(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| {
            ClientError::malformed(format!("cannot decode {}: {}", std::any::type_name::<Self>(), e))
        })
    }

    /// Encode to a JSON value
    fn to_wire(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(ClientError::from)
    }
}

impl WireModel for FileRecord {}
impl WireModel for UploadOutcome {}
impl WireModel for QuotaStatus {}
impl WireModel for TierOffering {}
impl WireModel for UsageBreakdown {}
impl WireModel for CategoryUsage {}

/// Serde helpers for lenient numeric fields
pub(crate) mod wire {
    use serde::{de::Error, Deserialize, Deserializer};
    use serde_json::Number;

    fn number_to_u64(n: &Number) -> Option<u64> {
        n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && *f <= u64::MAX as f64 && f.fract() == 0.0)
                .map(|f| f as u64)
        })
    }

    /// Non-negative integer that may arrive as `1536` or `1536.0`; a
    /// fractional value such as `1536.7` is rejected
    pub fn size<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let n = Number::deserialize(deserializer)?;
        number_to_u64(&n).ok_or_else(|| D::Error::custom(format!("expected a non-negative number, got {}", n)))
    }

    /// Absolute folder path, normalized on the way in
    pub fn folder<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(crate::request::normalize_folder(Some(&raw)))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_number_to_u64() {
            assert_eq!(number_to_u64(&Number::from(42u64)), Some(42));
            assert_eq!(number_to_u64(&Number::from_f64(1536.0).unwrap()), Some(1536));
            assert_eq!(number_to_u64(&Number::from(-1i64)), None);
            assert_eq!(number_to_u64(&Number::from_f64(-0.5).unwrap()), None);
            assert_eq!(number_to_u64(&Number::from_f64(1536.7).unwrap()), None);
            assert_eq!(number_to_u64(&Number::from_f64(-0.0).unwrap()), Some(0));
        }

        #[test]
        fn test_fractional_size_is_malformed() {
            use crate::{types::FileRecord, ClientError, WireModel};

            let value = serde_json::json!({
                "id": "f1",
                "file_name": "a.txt",
                "file_size": 1536.7,
                "folder": "/",
                "created_at": "2024-01-01T00:00:00Z"
            });
            assert!(matches!(FileRecord::from_wire(value), Err(ClientError::MalformedPayload(_))));
        }
    }
}
