//! Main client implementation

use crate::{
    request::{ApiRequest, ListOptions, UploadRequest},
    response,
    transport::{HttpTransport, Transport},
    types::*,
    ClientError, Config, Result,
};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Nimbus storage client.
///
/// Cheap to clone; clones share the underlying connection pool. Every call
/// is a single request/response with no retries.
#[derive(Clone)]
pub struct NimbusClient {
    config: Config,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for NimbusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NimbusClient")
            .field("endpoint", &self.config.endpoint)
            .finish_non_exhaustive()
    }
}

impl NimbusClient {
    /// Create a new client with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client from `NIMBUS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    /// Create a client over a custom transport
    pub fn with_transport(config: Config, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Release this handle. Pooled connections close once the last clone
    /// is gone.
    pub fn close(self) {
        debug!(endpoint = %self.config.endpoint, "Closing client");
    }

    // ==================== File Operations ====================

    /// Upload a file as multipart form data
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name, size = upload.data.len()))]
    pub async fn upload_file(&self, upload: UploadRequest) -> Result<UploadOutcome> {
        let request = ApiRequest::upload(upload)?;
        let response = self.transport.send(request).await?;
        response::decode(&response)
    }

    /// Get a file's metadata
    #[instrument(skip(self))]
    pub async fn get_file(&self, file_id: &str) -> Result<FileRecord> {
        let response = self.transport.send(ApiRequest::get_file(file_id)?).await?;
        response::decode(&response)
    }

    /// Check whether a file exists
    #[instrument(skip(self))]
    pub async fn file_exists(&self, file_id: &str) -> Result<bool> {
        match self.get_file(file_id).await {
            Ok(_) => Ok(true),
            Err(ClientError::FileNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Get a short-lived signed download URL
    #[instrument(skip(self))]
    pub async fn get_download_url(&self, file_id: &str) -> Result<String> {
        let response = self.transport.send(ApiRequest::download_url(file_id)?).await?;
        response::decode_download_url(&response)
    }

    /// Download a file's contents via its signed URL
    #[instrument(skip(self))]
    pub async fn download_file(&self, file_id: &str) -> Result<Bytes> {
        let url = self.get_download_url(file_id).await?;
        let response = self.transport.fetch(&url).await?;
        let data = response::download_body(response)?;
        debug!(bytes = data.len(), "Downloaded file");
        Ok(data)
    }

    /// Delete a file
    #[instrument(skip(self))]
    pub async fn delete_file(&self, file_id: &str) -> Result<()> {
        let response = self.transport.send(ApiRequest::delete_file(file_id)?).await?;
        response::check_status(&response)
    }

    /// List one page of files
    #[instrument(skip(self))]
    pub async fn list_files(&self, options: ListOptions) -> Result<Page<FileRecord>> {
        let response = self.transport.send(ApiRequest::list_files(&options)).await?;
        response::decode_with(&response, Page::from_wire)
    }

    /// List every file, one request per page, starting at `options.offset`.
    ///
    /// Fails with [`ClientError::MalformedPayload`] if the server answers
    /// with a different offset than requested or the offset stops advancing.
    #[instrument(skip(self))]
    pub async fn list_all_files(&self, options: ListOptions) -> Result<Vec<FileRecord>> {
        let mut options = options;
        let mut files = Vec::new();

        loop {
            let requested = options.offset;
            let page = self.list_files(options.clone()).await?;
            if page.offset != requested {
                return Err(ClientError::malformed(format!(
                    "requested offset {} but server returned offset {}",
                    requested, page.offset
                )));
            }

            let done = page.is_last_page() || page.is_empty();
            let next = page.next_offset();
            files.extend(page.items);
            if done {
                break;
            }
            if next <= requested {
                return Err(ClientError::malformed(format!("page offset stopped advancing at {}", requested)));
            }
            options.offset = next;
        }

        Ok(files)
    }

    // ==================== Account Operations ====================

    /// Get the account's storage quota
    #[instrument(skip(self))]
    pub async fn get_quota(&self) -> Result<QuotaStatus> {
        let response = self.transport.send(ApiRequest::quota()).await?;
        response::decode(&response)
    }

    /// Get storage usage per file category
    #[instrument(skip(self))]
    pub async fn get_usage_breakdown(&self) -> Result<UsageBreakdown> {
        let response = self.transport.send(ApiRequest::usage_breakdown()).await?;
        response::decode(&response)
    }

    /// List available service tiers
    #[instrument(skip(self))]
    pub async fn get_tiers(&self) -> Result<Vec<TierOffering>> {
        let response = self.transport.send(ApiRequest::tiers()).await?;
        response::decode_list(&response)
    }
}
