//! Outbound ports - interfaces implemented by infrastructure adapters.

mod asset_storage_port;
mod step_repository_port;

pub use asset_storage_port::{
    sanitize_file_name, storage_path, validate_image_upload, AssetStoragePort, ImageUpload,
    StorageError, UploadedImage, ALLOWED_IMAGE_TYPES, MAX_IMAGE_BYTES,
};
pub use step_repository_port::{RepositoryError, StepRepositoryPort};

#[cfg(test)]
pub use step_repository_port::MockStepRepositoryPort;
