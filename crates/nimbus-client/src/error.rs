//! Client error types
//!
//! Every failure surfaced by the client is one [`ClientError`] variant. Each
//! variant carries the same [`ErrorDetails`] payload: a human-readable
//! message, a machine-readable code and, when an HTTP response was received,
//! its status code.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Message used when an error response carries no readable body
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Code used when an error response carries no readable body
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";

/// Server code that distinguishes a full account from an oversized file on 413
pub const QUOTA_EXCEEDED_CODE: &str = "QUOTA_EXCEEDED";

/// Message, code and optional HTTP status shared by every error kind
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorDetails {
    /// Human-readable description
    pub message: String,
    /// Machine-readable code, server-supplied or synthesized locally
    pub code: String,
    /// HTTP status, absent for failures that never reached the server
    pub status_code: Option<u16>,
}

impl ErrorDetails {
    /// Create a new error payload
    pub fn new(message: impl Into<String>, code: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            status_code,
        }
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(status) => write!(f, "{} [{}, HTTP {}]", self.message, self.code, status),
            None => write!(f, "{} [{}]", self.message, self.code),
        }
    }
}

/// Client errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Missing or rejected API key (401)
    #[error("authentication failed: {0}")]
    Authentication(ErrorDetails),

    /// Account storage quota exhausted (413 + `QUOTA_EXCEEDED`)
    #[error("storage quota exceeded: {0}")]
    QuotaExceeded(ErrorDetails),

    /// Single file larger than the tier allows (413, any other code)
    #[error("file size limit exceeded: {0}")]
    FileSizeLimit(ErrorDetails),

    /// Unknown file id (404)
    #[error("file not found: {0}")]
    FileNotFound(ErrorDetails),

    /// Request rejected as invalid (400)
    #[error("bad request: {0}")]
    BadRequest(ErrorDetails),

    /// Too many requests (429)
    #[error("rate limited: {0}")]
    RateLimited(ErrorDetails),

    /// Server-side failure (5xx)
    #[error("server error: {0}")]
    ServerFault(ErrorDetails),

    /// Connection, DNS, timeout or protocol failure; no HTTP status
    #[error("network error: {0}")]
    Network(ErrorDetails),

    /// Any other non-success status
    #[error("request failed: {0}")]
    Generic(ErrorDetails),

    /// Response body missing required fields or of the wrong shape
    #[error("malformed payload: {0}")]
    MalformedPayload(ErrorDetails),

    /// Invalid client configuration
    #[error("configuration error: {0}")]
    Configuration(ErrorDetails),
}

/// Body shape of an error response: `{ message, code }`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
}

impl ClientError {
    /// Authentication error with the default code
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(ErrorDetails::new(message, "AUTHENTICATION_ERROR", Some(401)))
    }

    /// Quota error with the default code
    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::QuotaExceeded(ErrorDetails::new(message, QUOTA_EXCEEDED_CODE, Some(413)))
    }

    /// File size error with the default code
    pub fn file_size_limit(message: impl Into<String>) -> Self {
        Self::FileSizeLimit(ErrorDetails::new(message, "FILE_SIZE_LIMIT_EXCEEDED", Some(413)))
    }

    /// Not-found error with the default code
    pub fn file_not_found(message: impl Into<String>) -> Self {
        Self::FileNotFound(ErrorDetails::new(message, "FILE_NOT_FOUND", Some(404)))
    }

    /// Bad request error with the default code
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(ErrorDetails::new(message, "BAD_REQUEST", Some(400)))
    }

    /// Rate limit error with the default code
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited(ErrorDetails::new(message, "RATE_LIMIT_EXCEEDED", Some(429)))
    }

    /// Server error with the default code
    pub fn server_fault(message: impl Into<String>) -> Self {
        Self::ServerFault(ErrorDetails::new(message, "SERVER_ERROR", Some(500)))
    }

    /// Transport-level failure
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(ErrorDetails::new(message, "NETWORK_ERROR", None))
    }

    /// Catch-all for an unexpected status
    pub fn generic(message: impl Into<String>, status_code: u16) -> Self {
        Self::Generic(ErrorDetails::new(message, UNKNOWN_ERROR_CODE, Some(status_code)))
    }

    /// Decode failure
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload(ErrorDetails::new(message, "MALFORMED_PAYLOAD", None))
    }

    /// Configuration failure
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(ErrorDetails::new(message, "CONFIGURATION_ERROR", None))
    }

    /// Map a non-success response to an error kind.
    ///
    /// The status picks the kind; a 413 further branches on the server code
    /// to separate quota exhaustion from an oversized file. Unreadable bodies
    /// fall back to [`DEFAULT_ERROR_MESSAGE`] / [`UNKNOWN_ERROR_CODE`].
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<ErrorBody>(body).ok();
        let (message, code) = match parsed {
            Some(body) => (
                body.message.unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
                body.code.unwrap_or_else(|| UNKNOWN_ERROR_CODE.to_string()),
            ),
            None => (DEFAULT_ERROR_MESSAGE.to_string(), UNKNOWN_ERROR_CODE.to_string()),
        };
        let details = ErrorDetails::new(message, code, Some(status));

        match status {
            401 => Self::Authentication(details),
            404 => Self::FileNotFound(details),
            400 => Self::BadRequest(details),
            413 if details.code == QUOTA_EXCEEDED_CODE => Self::QuotaExceeded(details),
            413 => Self::FileSizeLimit(details),
            429 => Self::RateLimited(details),
            s if s >= 500 => Self::ServerFault(details),
            _ => Self::Generic(details),
        }
    }

    /// Shared payload of this error
    pub fn details(&self) -> &ErrorDetails {
        match self {
            Self::Authentication(d)
            | Self::QuotaExceeded(d)
            | Self::FileSizeLimit(d)
            | Self::FileNotFound(d)
            | Self::BadRequest(d)
            | Self::RateLimited(d)
            | Self::ServerFault(d)
            | Self::Network(d)
            | Self::Generic(d)
            | Self::MalformedPayload(d)
            | Self::Configuration(d) => d,
        }
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.details().message
    }

    /// Machine-readable code
    pub fn code(&self) -> &str {
        &self.details().code
    }

    /// HTTP status, if a response was received
    pub fn status_code(&self) -> Option<u16> {
        self.details().status_code
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }

    /// Check if this is an authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Whether a caller-side retry could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::ServerFault(_) | Self::Network(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        Self::network(message)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(code: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({ "message": "nope", "code": code })).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(ClientError::from_response(401, &body("X")), ClientError::Authentication(_)));
        assert!(matches!(ClientError::from_response(404, &body("X")), ClientError::FileNotFound(_)));
        assert!(matches!(ClientError::from_response(400, &body("X")), ClientError::BadRequest(_)));
        assert!(matches!(ClientError::from_response(429, &body("X")), ClientError::RateLimited(_)));
        assert!(matches!(ClientError::from_response(500, &body("X")), ClientError::ServerFault(_)));
        assert!(matches!(ClientError::from_response(503, &body("X")), ClientError::ServerFault(_)));
    }

    #[test]
    fn test_413_branches_on_code() {
        let quota = ClientError::from_response(413, &body("QUOTA_EXCEEDED"));
        assert!(matches!(quota, ClientError::QuotaExceeded(_)));

        let size = ClientError::from_response(413, &body("FILE_TOO_LARGE"));
        assert!(matches!(size, ClientError::FileSizeLimit(_)));
        assert_eq!(size.code(), "FILE_TOO_LARGE");
    }

    #[test]
    fn test_other_status_is_generic_with_status() {
        let err = ClientError::from_response(418, &body("TEAPOT"));
        match err {
            ClientError::Generic(details) => {
                assert_eq!(details.status_code, Some(418));
                assert_eq!(details.code, "TEAPOT");
                assert_eq!(details.message, "nope");
            }
            other => panic!("Expected Generic, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_body_uses_defaults() {
        let err = ClientError::from_response(502, b"<html>Bad Gateway</html>");
        assert!(matches!(err, ClientError::ServerFault(_)));
        assert_eq!(err.message(), DEFAULT_ERROR_MESSAGE);
        assert_eq!(err.code(), UNKNOWN_ERROR_CODE);
        assert_eq!(err.status_code(), Some(502));

        // 413 without a readable code is a size error, never quota
        let err = ClientError::from_response(413, b"");
        assert!(matches!(err, ClientError::FileSizeLimit(_)));
    }

    #[test]
    fn test_factory_defaults() {
        let err = ClientError::authentication("bad key");
        assert_eq!(err.code(), "AUTHENTICATION_ERROR");
        assert_eq!(err.status_code(), Some(401));

        let err = ClientError::network("refused");
        assert_eq!(err.status_code(), None);
        assert!(err.is_retryable());
        assert!(!ClientError::bad_request("x").is_retryable());
    }

    #[test]
    fn test_display_includes_code_and_status() {
        let err = ClientError::file_not_found("missing");
        assert_eq!(err.to_string(), "file not found: missing [FILE_NOT_FOUND, HTTP 404]");
    }
}
