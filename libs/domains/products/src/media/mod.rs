//! Image hosting for product pictures.
//!
//! Product images are pushed to an external media host before the row is
//! written; only the returned public URL is stored.

pub mod cloudinary;
pub mod memory;

pub use cloudinary::{CloudinaryConfig, CloudinaryUploader};
pub use memory::InMemoryMediaUploader;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::models::ImageUpload;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Image upload timed out after {:?}", .0)]
    Timeout(Duration),

    #[error("Image upload failed: {0}")]
    Rejected(String),

    #[error("Image upload failed: {0}")]
    Transport(String),

    #[error("Image upload failed: {0}")]
    InvalidResponse(String),
}

pub type MediaResult<T> = Result<T, MediaError>;

/// Where an uploaded image ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    /// HTTPS URL served to clients
    pub secure_url: String,
    /// Host-side identifier, needed to delete the asset later
    pub public_id: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Upload an image into `folder` and return its public location
    async fn upload(&self, image: &ImageUpload, folder: &str) -> MediaResult<UploadedMedia>;
}
