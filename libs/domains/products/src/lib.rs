//! Products Domain
//!
//! Inventory products backed by PostgreSQL, with images hosted by an external
//! media service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (multipart create, JSON update)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌───────────────┐
//! │   Service   │ ──▶ │ MediaUploader │  ← image hosting (Cloudinary / in-memory)
//! └──────┬──────┘     └───────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     CloudinaryConfig, CloudinaryUploader, PgProductRepository, ProductService,
//!     handlers::{self, DEFAULT_MAX_UPLOAD_BYTES},
//! };
//! use sea_orm::DatabaseConnection;
//!
//! # fn example(db: DatabaseConnection) -> Result<(), Box<dyn std::error::Error>> {
//! let uploader = CloudinaryUploader::new(CloudinaryConfig::new("demo", "key", "secret"))?;
//! let service = ProductService::new(PgProductRepository::new(db), uploader);
//!
//! let router = handlers::router(service, DEFAULT_MAX_UPLOAD_BYTES);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod media;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::{ApiDoc, ProductId};
pub use media::{
    CloudinaryConfig, CloudinaryUploader, InMemoryMediaUploader, MediaError, MediaUploader,
    UploadedMedia,
};
pub use models::{
    CreateProduct, DeleteProductResponse, ImageUpload, NewProduct, Product, UpdateProduct,
};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
