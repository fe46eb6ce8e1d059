//! Asset Storage Port - uploading step images
//!
//! Upload validation lives here, next to the trait, so every adapter
//! enforces the same rules before any bytes leave the client.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use ethicsbowl_domain::{ModuleId, StepId, StepKind};

/// Content types accepted for step images.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/png", "image/jpeg", "image/webp", "image/gif"];

/// Upload size ceiling, 5 MiB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("Image is too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },
    #[error("Upload failed: {0}")]
    UploadFailed(String),
}

/// An image the user picked for upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Storage-relative path the object was written to.
    pub path: String,
    /// Public URL for rendering.
    pub url: String,
}

/// Reject unsupported types and oversized payloads before uploading.
pub fn validate_image_upload(upload: &ImageUpload) -> Result<(), StorageError> {
    if !ALLOWED_IMAGE_TYPES.contains(&upload.content_type.as_str()) {
        return Err(StorageError::UnsupportedType(upload.content_type.clone()));
    }
    if upload.bytes.len() > MAX_IMAGE_BYTES {
        return Err(StorageError::TooLarge {
            size: upload.bytes.len(),
            limit: MAX_IMAGE_BYTES,
        });
    }
    Ok(())
}

/// Replace anything outside `[a-zA-Z0-9._-]` so the name is safe as a
/// storage object key segment.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build the storage path for a step image.
///
/// New steps have no id yet; their images land one level up and are
/// re-associated on save.
pub fn storage_path(
    module_id: ModuleId,
    kind: StepKind,
    step_id: Option<StepId>,
    uploaded_at: DateTime<Utc>,
    file_name: &str,
) -> String {
    let name = sanitize_file_name(file_name);
    let stamp = uploaded_at.timestamp_millis();
    match step_id {
        Some(step_id) => format!(
            "modules/{module_id}/stepImages/{}/{step_id}/{stamp}_{name}",
            kind.collection_name()
        ),
        None => format!(
            "modules/{module_id}/stepImages/{}/{stamp}_{name}",
            kind.collection_name()
        ),
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStoragePort: Send + Sync {
    /// Upload a validated image and return its stored location.
    async fn upload_step_image(
        &self,
        path: &str,
        upload: ImageUpload,
    ) -> Result<UploadedImage, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_upload(len: usize) -> ImageUpload {
        ImageUpload {
            file_name: "photo.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0; len],
        }
    }

    #[test]
    fn test_accepts_png_under_limit() {
        assert!(validate_image_upload(&png_upload(1024)).is_ok());
    }

    #[test]
    fn test_rejects_svg() {
        let mut upload = png_upload(16);
        upload.content_type = "image/svg+xml".to_string();
        assert!(matches!(
            validate_image_upload(&upload),
            Err(StorageError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_rejects_oversized() {
        let upload = png_upload(MAX_IMAGE_BYTES + 1);
        assert!(matches!(
            validate_image_upload(&upload),
            Err(StorageError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_sanitize_file_name_strips_specials() {
        assert_eq!(sanitize_file_name("my photo (1).png"), "my_photo__1_.png");
        assert_eq!(sanitize_file_name("ok-name_2.webp"), "ok-name_2.webp");
    }

    #[test]
    fn test_storage_path_shapes() {
        let module = ModuleId::new();
        let step = StepId::new();
        let at = Utc::now();

        let with_step = storage_path(module, StepKind::Sorting, Some(step), at, "a b.png");
        assert!(with_step.starts_with(&format!("modules/{module}/stepImages/sorting/{step}/")));
        assert!(with_step.ends_with("_a_b.png"));

        let without = storage_path(module, StepKind::Quiz, None, at, "a.png");
        assert!(without.starts_with(&format!("modules/{module}/stepImages/quizzes/")));
    }
}
