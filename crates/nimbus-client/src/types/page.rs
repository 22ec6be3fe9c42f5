//! Offset-based pagination

use super::{wire, WireModel};
use crate::{ClientError, Result};
use serde::Deserialize;
use serde_json::{json, Value};

/// One page of a listing.
///
/// Wire shape: `{ items, total, limit, offset, has_more }`. The container is
/// payload-agnostic; decoding takes a decoder for the item type.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    /// Items on this page, in server order
    pub items: Vec<T>,
    /// Total items across all pages
    pub total: u64,
    /// Page size, always > 0
    pub limit: u64,
    /// Index of the first item on this page
    pub offset: u64,
    /// Whether more items follow this page
    pub has_more: bool,
}

#[derive(Deserialize)]
struct RawPage {
    items: Vec<Value>,
    #[serde(deserialize_with = "wire::size")]
    total: u64,
    #[serde(deserialize_with = "wire::size")]
    limit: u64,
    #[serde(deserialize_with = "wire::size")]
    offset: u64,
    has_more: bool,
}

impl<T> Page<T> {
    /// Decode a page, turning each raw item into a `T` with `decode_item`
    pub fn from_wire_with<F>(value: Value, decode_item: F) -> Result<Self>
    where
        F: FnMut(Value) -> Result<T>,
    {
        let raw: RawPage = serde_json::from_value(value)
            .map_err(|e| ClientError::malformed(format!("cannot decode page: {}", e)))?;
        if raw.limit == 0 {
            return Err(ClientError::malformed("page limit must be greater than zero"));
        }

        let items = raw.items.into_iter().map(decode_item).collect::<Result<Vec<_>>>()?;

        Ok(Self {
            items,
            total: raw.total,
            limit: raw.limit,
            offset: raw.offset,
            has_more: raw.has_more,
        })
    }

    /// Encode a page, turning each item into JSON with `encode_item`
    pub fn to_wire_with<F>(&self, encode_item: F) -> Result<Value>
    where
        F: FnMut(&T) -> Result<Value>,
    {
        let items = self.items.iter().map(encode_item).collect::<Result<Vec<_>>>()?;
        Ok(json!({
            "items": items,
            "total": self.total,
            "limit": self.limit,
            "offset": self.offset,
            "has_more": self.has_more,
        }))
    }

    /// 1-based page number
    pub fn current_page(&self) -> u64 {
        (self.offset / self.limit).saturating_add(1)
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.limit)
    }

    pub fn is_first_page(&self) -> bool {
        self.offset == 0
    }

    pub fn is_last_page(&self) -> bool {
        !self.has_more
    }

    /// Offset of the following page, saturating at `u64::MAX`
    pub fn next_offset(&self) -> u64 {
        self.offset.saturating_add(self.limit)
    }

    /// Offset of the previous page, clamped to `[0, total]`
    pub fn previous_offset(&self) -> u64 {
        self.offset.saturating_sub(self.limit).min(self.total)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform the items, keeping the pagination fields
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
            has_more: self.has_more,
        }
    }
}

impl<T: WireModel> Page<T> {
    /// Decode a page of wire models
    pub fn from_wire(value: Value) -> Result<Self> {
        Self::from_wire_with(value, T::from_wire)
    }

    /// Encode a page of wire models
    pub fn to_wire(&self) -> Result<Value> {
        self.to_wire_with(T::to_wire)
    }
}
