//! HTTP transport
//!
//! The [`Transport`] trait is the seam between request building and the
//! network. [`HttpTransport`] is the reqwest-backed implementation: one
//! attempt per call, no retries, and every connection-level failure comes back
//! as [`ClientError::Network`].

use crate::{
    request::{ApiRequest, RequestBody, UploadForm, FILE_FIELD, FOLDER_FIELD, METADATA_FIELD},
    ClientError, Config, ErrorDetails, Result,
};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    multipart::{Form, Part},
    Client,
};
use tracing::debug;
use url::Url;

/// A completed HTTP exchange, before any status interpretation
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes requests against the service.
///
/// Implementations must be safe to share between concurrent calls and must
/// map every failure that produced no HTTP response to
/// [`ClientError::Network`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an authenticated API request
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;

    /// Plain GET of an absolute URL, without credentials
    async fn fetch(&self, url: &str) -> Result<RawResponse>;
}

/// reqwest-backed transport with a pooled connection set
#[derive(Clone, Debug)]
pub struct HttpTransport {
    http: Client,
    api_base: Url,
    authorization: Option<HeaderValue>,
}

impl HttpTransport {
    /// Create a transport for the given configuration
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ClientError::configuration(format!("invalid user agent: {}", e)))?,
        );

        let authorization = match &config.api_key {
            Some(key) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", key))
                    .map_err(|e| ClientError::configuration(format!("invalid API key: {}", e)))?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::configuration(format!("cannot build HTTP client: {}", e)))?;

        let api_base = Url::parse(&config.api_base())
            .map_err(|e| ClientError::configuration(format!("invalid endpoint: {}", e)))?;

        Ok(Self {
            http,
            api_base,
            authorization,
        })
    }

    /// Absolute URL for a request, with path segments percent-encoded
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::configuration("endpoint cannot carry a path"))?
            .pop_if_empty()
            .extend(&request.segments);

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

impl UploadForm {
    /// Encode as a multipart form: `file`, `folder`, then `metadata` if set
    pub fn into_multipart(self) -> Result<Form> {
        let part = Part::bytes(self.file.data.to_vec())
            .file_name(self.file.file_name)
            .mime_str(&self.file.content_type)
            .map_err(|e| {
                ClientError::BadRequest(ErrorDetails::new(
                    format!("invalid content type {:?}: {}", self.file.content_type, e),
                    "INVALID_MIME_TYPE",
                    None,
                ))
            })?;

        let mut form = Form::new()
            .part(FILE_FIELD, part)
            .text(FOLDER_FIELD, self.folder);
        if let Some(metadata) = self.metadata {
            form = form.text(METADATA_FIELD, metadata);
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let url = self.url_for(&request)?;
        debug!("Sending {} request to {}", request.method, url);

        let mut req = self
            .http
            .request(request.method, url)
            .header(header::ACCEPT, "application/json");

        if let Some(auth) = &self.authorization {
            req = req.header(header::AUTHORIZATION, auth.clone());
        }

        if let RequestBody::Multipart(form) = request.body {
            req = req.multipart(form.into_multipart()?);
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!(status, bytes = body.len(), "Received response");

        Ok(RawResponse { status, body })
    }

    async fn fetch(&self, url: &str) -> Result<RawResponse> {
        let url = Url::parse(url)
            .map_err(|e| ClientError::network(format!("invalid download URL {:?}: {}", url, e)))?;
        debug!("Fetching {}", url);

        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(RawResponse { status, body })
    }
}
