//! Response decoding
//!
//! Status is checked first; a non-2xx response becomes a [`ClientError`] via
//! [`ClientError::from_response`]. Successful JSON bodies are unwrapped from
//! their `{ "data": ... }` envelope and handed to the model decoder.

use crate::{transport::RawResponse, types::WireModel, ClientError, Result};
use bytes::Bytes;
use serde_json::Value;

/// Fail with the mapped error kind unless the status is 2xx
pub fn check_status(response: &RawResponse) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        Err(ClientError::from_response(response.status, &response.body))
    }
}

/// Check the status and return the envelope's `data` payload
pub fn unwrap_envelope(response: &RawResponse) -> Result<Value> {
    check_status(response)?;

    let value: Value = serde_json::from_slice(&response.body)
        .map_err(|e| ClientError::malformed(format!("response is not valid JSON: {}", e)))?;

    match value {
        Value::Object(mut map) => map
            .remove("data")
            .ok_or_else(|| ClientError::malformed("response envelope has no `data` field")),
        other => Err(ClientError::malformed(format!(
            "expected a JSON object envelope, got {}",
            json_kind(&other)
        ))),
    }
}

/// Decode the `data` payload with a custom decoder
pub fn decode_with<T, F>(response: &RawResponse, decode: F) -> Result<T>
where
    F: FnOnce(Value) -> Result<T>,
{
    decode(unwrap_envelope(response)?)
}

/// Decode the `data` payload as a single model
pub fn decode<T: WireModel>(response: &RawResponse) -> Result<T> {
    decode_with(response, T::from_wire)
}

/// Decode the `data` payload as an array of models
pub fn decode_list<T: WireModel>(response: &RawResponse) -> Result<Vec<T>> {
    decode_with(response, |data| match data {
        Value::Array(items) => items.into_iter().map(T::from_wire).collect(),
        other => Err(ClientError::malformed(format!(
            "expected an array, got {}",
            json_kind(&other)
        ))),
    })
}

/// Extract `data.url` from a download-url response
pub fn decode_download_url(response: &RawResponse) -> Result<String> {
    decode_with(response, |data| {
        data.get("url")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ClientError::malformed("download-url response has no string `url`"))
    })
}

/// Body of a signed-URL download.
///
/// The signed URL is outside the API, so anything but 200 is reported as a
/// network failure rather than run through the API error mapping.
pub fn download_body(response: RawResponse) -> Result<Bytes> {
    if response.status != 200 {
        return Err(ClientError::network(format!(
            "download failed with HTTP {}",
            response.status
        )));
    }
    Ok(response.body)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
