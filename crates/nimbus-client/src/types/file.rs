//! File metadata and upload results

use super::{wire, Metadata};
use crate::format::format_size;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse file-type bucket used by the usage breakdown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Images,
    Documents,
    Videos,
    Audio,
    Other,
}

impl FileCategory {
    /// All categories in breakdown order
    pub const ALL: [FileCategory; 5] = [
        FileCategory::Images,
        FileCategory::Documents,
        FileCategory::Videos,
        FileCategory::Audio,
        FileCategory::Other,
    ];

    /// Key used for this category in the usage breakdown
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Documents => "documents",
            Self::Videos => "videos",
            Self::Audio => "audio",
            Self::Other => "other",
        }
    }

    /// Classify a MIME type
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.to_ascii_lowercase();
        let (top, sub) = mime.split_once('/').unwrap_or((mime.as_str(), ""));
        match top {
            "image" => Self::Images,
            "video" => Self::Videos,
            "audio" => Self::Audio,
            "text" => Self::Documents,
            "application"
                if sub == "pdf"
                    || sub == "msword"
                    || sub == "rtf"
                    || sub.starts_with("vnd.openxmlformats-officedocument")
                    || sub.starts_with("vnd.ms-")
                    || sub.starts_with("vnd.oasis.opendocument") =>
            {
                Self::Documents
            }
            _ => Self::Other,
        }
    }
}

/// Metadata of a stored file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique file id
    pub id: String,
    /// Original file name
    pub file_name: String,
    /// Size in bytes
    #[serde(deserialize_with = "wire::size")]
    pub file_size: u64,
    /// Content type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Absolute folder path
    #[serde(deserialize_with = "wire::folder")]
    pub folder: String,
    /// User-defined metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Expiry time, if the tier expires files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl FileRecord {
    /// Size as a human-readable string
    pub fn formatted_size(&self) -> String {
        format_size(self.file_size)
    }

    /// Lower-cased extension of the file name, if any
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    /// Usage category derived from the content type
    pub fn category(&self) -> FileCategory {
        self.mime_type
            .as_deref()
            .map(FileCategory::from_mime)
            .unwrap_or(FileCategory::Other)
    }

    /// Whether the file had expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }

    /// Copy of this record moved to another folder
    pub fn with_folder(&self, folder: &str) -> Self {
        Self {
            folder: crate::request::normalize_folder(Some(folder)),
            ..self.clone()
        }
    }

    /// Copy of this record with replaced metadata
    pub fn with_metadata(&self, metadata: Option<Metadata>) -> Self {
        Self {
            metadata,
            ..self.clone()
        }
    }
}

/// Result of a successful upload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Id of the new file
    pub file_id: String,
    /// Stored file name
    pub file_name: String,
    /// Size in bytes
    #[serde(deserialize_with = "wire::size")]
    pub file_size: u64,
    /// Content type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Direct download URL
    pub download_url: String,
    /// Absolute folder path
    #[serde(deserialize_with = "wire::folder")]
    pub folder: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl UploadOutcome {
    /// Size as a human-readable string
    pub fn formatted_size(&self) -> String {
        format_size(self.file_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WireModel;
    use crate::ClientError;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_record() -> FileRecord {
        let mut metadata = Metadata::new();
        metadata.insert("album".to_string(), json!("holiday"));
        metadata.insert("rating".to_string(), json!(5));

        FileRecord {
            id: "file_123".to_string(),
            file_name: "beach.jpg".to_string(),
            file_size: 2_048_000,
            mime_type: Some("image/jpeg".to_string()),
            folder: "/photos/2024".to_string(),
            metadata: Some(metadata),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap(),
            expires_at: Some(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_file_record_round_trip() {
        let record = sample_record();
        let decoded = FileRecord::from_wire(record.to_wire().unwrap()).unwrap();
        assert_eq!(decoded, record);

        let bare = FileRecord {
            mime_type: None,
            metadata: None,
            expires_at: None,
            ..sample_record()
        };
        assert_eq!(FileRecord::from_wire(bare.to_wire().unwrap()).unwrap(), bare);
    }

    #[test]
    fn test_file_record_round_trip_varied() {
        let mut nested = Metadata::new();
        nested.insert("exif".to_string(), json!({ "camera": { "make": "Fuji", "iso": [200, 400] }, "flash": false }));
        nested.insert("tags".to_string(), json!(["a", "b", null]));
        nested.insert("score".to_string(), json!(0.25));

        let records = [
            FileRecord { file_size: 0, metadata: Some(Metadata::new()), ..sample_record() },
            FileRecord { file_size: u64::MAX, folder: "/".to_string(), metadata: Some(nested), ..sample_record() },
            FileRecord {
                file_name: "résumé final (2).PDF".to_string(),
                mime_type: Some("application/octet-stream".to_string()),
                created_at: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
                expires_at: None,
                ..sample_record()
            },
        ];

        for record in records {
            assert_eq!(FileRecord::from_wire(record.to_wire().unwrap()).unwrap(), record);
        }
    }

    #[test]
    fn test_file_record_decodes_wire_json() {
        let record = FileRecord::from_wire(json!({
            "id": "f1",
            "file_name": "report.pdf",
            "file_size": 1536.0,
            "mime_type": null,
            "folder": "docs/",
            "created_at": "2024-01-15T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(record.file_size, 1536);
        assert_eq!(record.folder, "/docs");
        assert!(record.mime_type.is_none());
        assert!(record.metadata.is_none());
        assert!(record.expires_at.is_none());
        assert_eq!(record.formatted_size(), "1.5 KB");
        assert_eq!(record.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn test_file_record_missing_field_is_malformed() {
        let err = FileRecord::from_wire(json!({
            "id": "f1",
            "file_size": 10,
            "folder": "/",
            "created_at": "2024-01-15T10:00:00Z"
        }))
        .unwrap_err();
        assert!(matches!(err, ClientError::MalformedPayload(_)));

        let err = FileRecord::from_wire(json!({
            "id": "f1",
            "file_name": "a.txt",
            "file_size": "ten",
            "folder": "/",
            "created_at": "2024-01-15T10:00:00Z"
        }))
        .unwrap_err();
        assert!(matches!(err, ClientError::MalformedPayload(_)));
    }

    #[test]
    fn test_field_replacement_leaves_original() {
        let record = sample_record();
        let moved = record.with_folder("archive/");
        assert_eq!(moved.folder, "/archive");
        assert_eq!(record.folder, "/photos/2024");
        assert_eq!(moved.id, record.id);

        let stripped = record.with_metadata(None);
        assert!(stripped.metadata.is_none());
        assert!(record.metadata.is_some());
    }

    #[test]
    fn test_expiry_and_category() {
        let record = sample_record();
        assert!(!record.is_expired(Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap()));
        assert!(record.is_expired(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()));
        assert_eq!(record.category(), FileCategory::Images);
    }

    #[test]
    fn test_category_from_mime() {
        assert_eq!(FileCategory::from_mime("image/png"), FileCategory::Images);
        assert_eq!(FileCategory::from_mime("video/mp4"), FileCategory::Videos);
        assert_eq!(FileCategory::from_mime("audio/mpeg"), FileCategory::Audio);
        assert_eq!(FileCategory::from_mime("application/pdf"), FileCategory::Documents);
        assert_eq!(FileCategory::from_mime("text/plain"), FileCategory::Documents);
        assert_eq!(
            FileCategory::from_mime("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
            FileCategory::Documents
        );
        assert_eq!(FileCategory::from_mime("application/zip"), FileCategory::Other);
    }

    #[test]
    fn test_upload_outcome_round_trip() {
        let outcome = UploadOutcome {
            file_id: "file_9".to_string(),
            file_name: "doc.pdf".to_string(),
            file_size: 0,
            mime_type: Some("application/pdf".to_string()),
            download_url: "https://cdn.example.com/file_9".to_string(),
            folder: "/".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 3, 3, 3, 3).unwrap(),
        };
        assert_eq!(UploadOutcome::from_wire(outcome.to_wire().unwrap()).unwrap(), outcome);

        let untyped = UploadOutcome {
            file_size: 10_485_760,
            mime_type: None,
            folder: "/deeply/nested/folder".to_string(),
            ..outcome
        };
        assert_eq!(UploadOutcome::from_wire(untyped.to_wire().unwrap()).unwrap(), untyped);
    }
}
