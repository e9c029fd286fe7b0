use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{MediaError, MediaResult, MediaUploader, UploadedMedia};
use crate::models::ImageUpload;

/// Uploader that keeps images in memory, for tests and local runs without
/// media credentials.
#[derive(Clone)]
pub struct InMemoryMediaUploader {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    base_url: String,
    upload_count: Arc<Mutex<usize>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl InMemoryMediaUploader {
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            base_url: "https://media.example.com".to_string(),
            upload_count: Arc::new(Mutex::new(0)),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Make every following upload fail with `message`
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().await = Some(message.into());
    }

    pub async fn upload_count(&self) -> usize {
        *self.upload_count.lock().await
    }

    pub async fn files(&self) -> HashMap<String, Vec<u8>> {
        self.files.lock().await.clone()
    }
}

impl Default for InMemoryMediaUploader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaUploader for InMemoryMediaUploader {
    async fn upload(&self, image: &ImageUpload, folder: &str) -> MediaResult<UploadedMedia> {
        if let Some(message) = self.failure.lock().await.clone() {
            return Err(MediaError::Rejected(message));
        }

        let mut count = self.upload_count.lock().await;
        *count += 1;

        let public_id = format!("{}/{}", folder, *count);
        self.files
            .lock()
            .await
            .insert(public_id.clone(), image.data.clone());

        Ok(UploadedMedia {
            secure_url: format!("{}/{}.img", self.base_url, public_id),
            public_id,
        })
    }
}
