//! Client-side rules applied before a file is handed to object storage:
//! size cap, filename sanitization, and the bucket path convention.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Upload cap applied before storage is contacted.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Policy dial for upload validation.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_bytes: u64,
}

impl UploadPolicy {
    pub fn new(max_bytes: u64) -> Self {
        let sanitized = if max_bytes == 0 {
            DEFAULT_MAX_UPLOAD_BYTES
        } else {
            max_bytes
        };

        Self {
            max_bytes: sanitized,
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

/// A file the user wants stored, before validation.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub user_id: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Validation failures surfaced inline, before any storage call is issued.
#[derive(Debug, thiserror::Error)]
pub enum UploadValidationError {
    #[error("file exceeds the {max} byte upload cap ({found} bytes)")]
    TooLarge { max: u64, found: u64 },
    #[error("filename must not be empty")]
    EmptyFilename,
    #[error("uploader id must not be empty")]
    MissingUser,
}

/// A validated upload carrying the derived storage path and content type.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedUpload {
    pub path: String,
    pub content_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Replace anything outside `[A-Za-z0-9._-]` so the name is safe as a storage
/// key segment.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build the `{user_id}/{epoch_millis}_{sanitized_filename}` storage key.
pub fn storage_path(user_id: &str, uploaded_at: DateTime<Utc>, filename: &str) -> String {
    format!(
        "{}/{}_{}",
        user_id,
        uploaded_at.timestamp_millis(),
        sanitize_filename(filename)
    )
}

/// Validate an upload against the policy and derive its storage key.
pub fn prepare_upload(
    policy: &UploadPolicy,
    upload: DocumentUpload,
    uploaded_at: DateTime<Utc>,
) -> Result<PreparedUpload, UploadValidationError> {
    if upload.user_id.trim().is_empty() {
        return Err(UploadValidationError::MissingUser);
    }

    let sanitized = sanitize_filename(&upload.filename);
    if sanitized.is_empty() {
        return Err(UploadValidationError::EmptyFilename);
    }

    let found = upload.bytes.len() as u64;
    if found > policy.max_bytes() {
        return Err(UploadValidationError::TooLarge {
            max: policy.max_bytes(),
            found,
        });
    }

    let content_type = mime_guess::from_path(&sanitized)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(PreparedUpload {
        path: storage_path(&upload.user_id, uploaded_at, &upload.filename),
        content_type,
        bytes: upload.bytes,
    })
}

/// Object-storage seam so the vault can be exercised without a live bucket.
pub trait StorageGateway: Send + Sync {
    fn store(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<(), StorageError>;
}

/// Storage-side failure, distinct from pre-submission validation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage rejected the object: {0}")]
    Rejected(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Failures raised by [`store_document`].
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    Validation(#[from] UploadValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Validate and store in one step. The gateway is only invoked once the
/// upload has passed validation.
pub fn store_document<G: StorageGateway>(
    gateway: &G,
    policy: &UploadPolicy,
    bucket: &str,
    upload: DocumentUpload,
) -> Result<PreparedUpload, DocumentError> {
    let prepared = prepare_upload(policy, upload, Utc::now())?;
    gateway.store(bucket, &prepared.path, &prepared.content_type, &prepared.bytes)?;
    Ok(prepared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingGateway {
        stored: Mutex<Vec<(String, String)>>,
    }

    impl StorageGateway for RecordingGateway {
        fn store(
            &self,
            bucket: &str,
            path: &str,
            _content_type: &str,
            _bytes: &[u8],
        ) -> Result<(), StorageError> {
            self.stored
                .lock()
                .expect("gateway mutex poisoned")
                .push((bucket.to_string(), path.to_string()));
            Ok(())
        }
    }

    fn upload(filename: &str, len: usize) -> DocumentUpload {
        DocumentUpload {
            user_id: "user-42".to_string(),
            filename: filename.to_string(),
            bytes: vec![0; len],
        }
    }

    #[test]
    fn sanitizes_unsafe_filename_characters() {
        assert_eq!(
            sanitize_filename("lease agreement (final).pdf"),
            "lease_agreement__final_.pdf"
        );
        assert_eq!(sanitize_filename("  paystub.png "), "paystub.png");
    }

    #[test]
    fn storage_path_follows_the_convention() {
        let uploaded_at = Utc
            .timestamp_millis_opt(1_700_000_000_123)
            .single()
            .expect("valid timestamp");
        assert_eq!(
            storage_path("user-42", uploaded_at, "id scan.jpg"),
            "user-42/1700000000123_id_scan.jpg"
        );
    }

    #[test]
    fn oversized_upload_is_rejected_before_the_gateway_is_invoked() {
        let gateway = RecordingGateway::default();
        let policy = UploadPolicy::new(1024);
        let result = store_document(&gateway, &policy, "documents", upload("big.pdf", 2048));

        match result {
            Err(DocumentError::Validation(UploadValidationError::TooLarge { max, found })) => {
                assert_eq!(max, 1024);
                assert_eq!(found, 2048);
            }
            other => panic!("expected size rejection, got {other:?}"),
        }
        assert!(gateway.stored.lock().expect("gateway mutex poisoned").is_empty());
    }

    #[test]
    fn valid_upload_reaches_the_gateway_with_guessed_content_type() {
        let gateway = RecordingGateway::default();
        let policy = UploadPolicy::default();
        let prepared = store_document(&gateway, &policy, "documents", upload("paystub.png", 64))
            .expect("upload stores");

        assert_eq!(prepared.content_type, "image/png");
        let stored = gateway.stored.lock().expect("gateway mutex poisoned");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].0, "documents");
        assert!(stored[0].1.starts_with("user-42/"));
        assert!(stored[0].1.ends_with("_paystub.png"));
    }

    #[test]
    fn size_cap_boundary_is_inclusive() {
        let policy = UploadPolicy::new(64);
        let uploaded_at = Utc
            .timestamp_millis_opt(1_700_000_000_000)
            .single()
            .expect("valid timestamp");
        assert!(prepare_upload(&policy, upload("ok.txt", 64), uploaded_at).is_ok());
        assert!(prepare_upload(&policy, upload("no.txt", 65), uploaded_at).is_err());
    }
}
