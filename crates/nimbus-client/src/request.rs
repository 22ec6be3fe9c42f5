//! Request building
//!
//! Turns typed calls into transport-ready [`ApiRequest`] values. Nothing in
//! here touches the network, so every request can be inspected before it is
//! sent.

use crate::{types::Metadata, ClientError, ErrorDetails, Result};
use bytes::Bytes;
use reqwest::Method;
use serde_json::Value;

/// Multipart field carrying the file bytes
pub const FILE_FIELD: &str = "file";
/// Multipart field carrying the target folder
pub const FOLDER_FIELD: &str = "folder";
/// Multipart field carrying JSON-encoded metadata
pub const METADATA_FIELD: &str = "metadata";

/// Fallback content type for unknown extensions
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Default page size for listings
pub const DEFAULT_LIST_LIMIT: u64 = 20;

/// Normalize a folder path.
///
/// Empty or absent → `/`; a single leading slash is enforced and trailing
/// slashes are stripped unless the result is the root.
pub fn normalize_folder(folder: Option<&str>) -> String {
    let inner = folder
        .unwrap_or("")
        .trim_start_matches('/')
        .trim_end_matches('/');
    format!("/{}", inner)
}

/// Pick a content type: an explicit override wins, otherwise the file
/// extension is looked up, falling back to `application/octet-stream`.
pub fn resolve_mime_type(file_name: &str, override_type: Option<&str>) -> String {
    match override_type.map(str::trim).filter(|t| !t.is_empty()) {
        Some(explicit) => explicit.to_string(),
        None => mime_guess::from_path(file_name)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
    }
}

// ==================== Inputs ====================

/// A file to upload
#[derive(Clone, Debug)]
pub struct UploadRequest {
    /// File contents
    pub data: Bytes,
    /// File name, also used for MIME inference
    pub file_name: String,
    /// Target folder, root when absent
    pub folder: Option<String>,
    /// Explicit content type
    pub mime_type: Option<String>,
    /// User-defined metadata
    pub metadata: Option<Metadata>,
}

impl UploadRequest {
    /// Upload `data` as `file_name` into the root folder
    pub fn new(data: impl Into<Bytes>, file_name: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            file_name: file_name.into(),
            folder: None,
            mime_type: None,
            metadata: None,
        }
    }

    /// Set the target folder
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Override the inferred content type
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Replace the metadata map
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Add one metadata entry
    pub fn with_metadata_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Metadata::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Field to sort listings by
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    CreatedAt,
    FileName,
    FileSize,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::FileName => "file_name",
            Self::FileSize => "file_size",
        }
    }
}

/// Sort direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Options for listing files
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListOptions {
    /// Page size
    pub limit: u64,
    /// Index of the first item
    pub offset: u64,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    /// Restrict to one folder
    pub folder: Option<String>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            folder: None,
        }
    }
}

impl ListOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_sort(mut self, sort_by: SortField, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Point the offset at a 1-based page number, saturating at `u64::MAX`
    pub fn for_page(mut self, page_number: u64) -> Self {
        self.offset = page_number.saturating_sub(1).saturating_mul(self.limit);
        self
    }

    /// Query pairs in wire order; `folder` only when supplied
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("limit".to_string(), self.limit.to_string()),
            ("offset".to_string(), self.offset.to_string()),
            ("sort_by".to_string(), self.sort_by.as_str().to_string()),
            ("sort_order".to_string(), self.sort_order.as_str().to_string()),
        ];
        if let Some(folder) = &self.folder {
            query.push(("folder".to_string(), normalize_folder(Some(folder))));
        }
        query
    }
}

// ==================== Transport-ready requests ====================

/// The single file part of an upload body
#[derive(Clone, Debug, PartialEq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Multipart upload body: one `file` part, a `folder` field and an optional
/// `metadata` field holding the JSON-encoded map
#[derive(Clone, Debug, PartialEq)]
pub struct UploadForm {
    pub file: FilePart,
    pub folder: String,
    pub metadata: Option<String>,
}

/// Request body
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Multipart(UploadForm),
}

/// A request relative to the API base URL
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Unescaped path segments after `/api/v1`
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Path for display, e.g. `/files/abc`
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// `POST /files`
    pub fn upload(upload: UploadRequest) -> Result<Self> {
        if upload.file_name.trim().is_empty() {
            return Err(invalid_input("INVALID_FILE_NAME", "file name must not be empty"));
        }

        let content_type = resolve_mime_type(&upload.file_name, upload.mime_type.as_deref());
        let metadata = match upload.metadata {
            Some(map) if !map.is_empty() => Some(serde_json::to_string(&map)?),
            _ => None,
        };

        let mut request = Self::new(Method::POST, &["files"]);
        request.body = RequestBody::Multipart(UploadForm {
            file: FilePart {
                file_name: upload.file_name,
                content_type,
                data: upload.data,
            },
            folder: normalize_folder(upload.folder.as_deref()),
            metadata,
        });
        Ok(request)
    }

    /// `GET /files/{id}`
    pub fn get_file(file_id: &str) -> Result<Self> {
        Ok(Self::new(Method::GET, &["files", checked_id(file_id)?]))
    }

    /// `GET /files/{id}/download-url`
    pub fn download_url(file_id: &str) -> Result<Self> {
        Ok(Self::new(Method::GET, &["files", checked_id(file_id)?, "download-url"]))
    }

    /// `DELETE /files/{id}`
    pub fn delete_file(file_id: &str) -> Result<Self> {
        Ok(Self::new(Method::DELETE, &["files", checked_id(file_id)?]))
    }

    /// `GET /files?limit&offset&sort_by&sort_order[&folder]`
    pub fn list_files(options: &ListOptions) -> Self {
        let mut request = Self::new(Method::GET, &["files"]);
        request.query = options.to_query();
        request
    }

    /// `GET /quota`
    pub fn quota() -> Self {
        Self::new(Method::GET, &["quota"])
    }

    /// `GET /quota/breakdown`
    pub fn usage_breakdown() -> Self {
        Self::new(Method::GET, &["quota", "breakdown"])
    }

    /// `GET /tiers`
    pub fn tiers() -> Self {
        Self::new(Method::GET, &["tiers"])
    }
}

fn invalid_input(code: &str, message: &str) -> ClientError {
    ClientError::BadRequest(ErrorDetails::new(message, code, None))
}

fn checked_id(file_id: &str) -> Result<&str> {
    if file_id.trim().is_empty() {
        return Err(invalid_input("INVALID_FILE_ID", "file id must not be empty"));
    }
    Ok(file_id)
}
