//! Product Service - Business logic layer

use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, warn};
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::media::{MediaError, MediaUploader, UploadedMedia, cloudinary::DEFAULT_FOLDER};
use crate::models::{
    CreateProduct, DeleteProductResponse, ImageUpload, NewProduct, Product, UpdateProduct,
};
use crate::repository::ProductRepository;

const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Product service providing business logic operations
///
/// Creation uploads the image first and only inserts once a URL is known, so
/// a failed upload never leaves a row behind.
pub struct ProductService<R: ProductRepository, M: MediaUploader> {
    repository: Arc<R>,
    uploader: Arc<M>,
    folder: String,
    upload_timeout: Duration,
}

impl<R: ProductRepository, M: MediaUploader> ProductService<R, M> {
    pub fn new(repository: R, uploader: M) -> Self {
        Self {
            repository: Arc::new(repository),
            uploader: Arc::new(uploader),
            folder: DEFAULT_FOLDER.to_string(),
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }

    /// Folder images are uploaded into
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// Upload the image, then insert the product pointing at it
    #[instrument(skip(self, input, image), fields(product_name = %input.name, image_bytes = image.data.len()))]
    pub async fn create_product(
        &self,
        input: CreateProduct,
        image: ImageUpload,
    ) -> ProductResult<Product> {
        input.validate()?;

        if image.is_empty() {
            return Err(ProductError::Validation(
                "Image file is required".to_string(),
            ));
        }

        let UploadedMedia {
            secure_url,
            public_id,
        } = tokio::time::timeout(
            self.upload_timeout,
            self.uploader.upload(&image, &self.folder),
        )
        .await
        .map_err(|_| MediaError::Timeout(self.upload_timeout))??;

        // A failed insert leaves the uploaded image unreferenced.
        self.repository
            .create(NewProduct::from_input(input, secure_url))
            .await
            .inspect_err(|e| {
                warn!(
                    public_id = %public_id,
                    error = %e,
                    "Product insert failed, uploaded image is orphaned"
                );
            })
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Replace all fields of a product; the image URL is stored as given
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;

        self.repository.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<DeleteProductResponse> {
        if self.repository.delete(id).await? {
            Ok(DeleteProductResponse::for_id(id))
        } else {
            Err(ProductError::NotFound(id))
        }
    }
}
