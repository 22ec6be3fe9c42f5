//! # Nimbus Client SDK
//!
//! A typed client for the Nimbus cloud storage service.
//!
//! ## Features
//!
//! - **Files**: upload (multipart), metadata, signed-URL download, delete, paginated listing
//! - **Account**: quota, per-category usage breakdown, available tiers
//! - **Typed errors**: every failure is one [`ClientError`] kind, derived from
//!   the HTTP status and the server's error code
//! - **Pluggable transport**: swap the reqwest-backed [`HttpTransport`] for
//!   any [`Transport`] implementation
//!
//! ## Pipeline
//!
//! ```text
//! caller ─▶ request (ApiRequest) ─▶ transport ─▶ response ─▶ model
//!                                        │            │
//!                                        └── Network  └── status ─▶ ClientError
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use nimbus_client::{Config, ListOptions, NimbusClient, UploadRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = NimbusClient::new(
//!         Config::new("https://storage.example.com").with_api_key("your-api-key"),
//!     )?;
//!
//!     let uploaded = client
//!         .upload_file(UploadRequest::new(b"Hello, World!".to_vec(), "hello.txt").with_folder("notes"))
//!         .await?;
//!
//!     let page = client.list_files(ListOptions::new().with_folder("notes")).await?;
//!     println!("{} of {} files", page.len(), page.total);
//!
//!     let data = client.download_file(&uploaded.file_id).await?;
//!     println!("Content: {}", String::from_utf8_lossy(&data));
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod format;
pub mod request;
pub mod response;
pub mod transport;
mod types;

pub use client::NimbusClient;
pub use config::{Config, API_BASE_PATH, ENV_API_KEY, ENV_ENDPOINT, ENV_TIMEOUT_SECS};
pub use error::{
    ClientError, ErrorDetails, Result, DEFAULT_ERROR_MESSAGE, QUOTA_EXCEEDED_CODE, UNKNOWN_ERROR_CODE,
};
pub use format::format_size;
pub use request::{
    normalize_folder, resolve_mime_type, ApiRequest, ListOptions, RequestBody, SortField, SortOrder,
    UploadForm, UploadRequest,
};
pub use transport::{HttpTransport, RawResponse, Transport};
pub use types::*;
