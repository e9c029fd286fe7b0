use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Rejects NaN and infinities, which `range` lets through.
fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() {
        return Err(ValidationError::new("finite"));
    }
    Ok(())
}

/// Image references must be absolute web URLs.
fn validate_image_url(img: &str) -> Result<(), ValidationError> {
    if !(img.starts_with("https://") || img.starts_with("http://")) {
        return Err(ValidationError::new("http_url"));
    }
    Ok(())
}

/// A catalogue entry as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Desk lamp")]
    pub name: String,
    #[schema(example = 24.5)]
    pub price: f64,
    #[schema(example = 12)]
    pub quantity: i32,
    #[schema(example = "Lighting")]
    pub category: String,
    #[schema(example = "Acme")]
    pub supplier: String,
    /// Public URL of the product image
    #[schema(example = "https://res.cloudinary.com/demo/image/upload/v1/imgs-products-store/lamp.jpg")]
    pub img: String,
}

/// Text fields of the create form; the image arrives separately as a file.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0), custom(function = "validate_price"))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(length(min = 1, max = 50))]
    pub supplier: String,
}

/// Full replacement of a product's fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0), custom(function = "validate_price"))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(length(min = 1, max = 50))]
    pub supplier: String,
    #[validate(length(min = 1, max = 200), url, custom(function = "validate_image_url"))]
    pub img: String,
}

/// Row to insert once the image URL is known
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub category: String,
    pub supplier: String,
    pub img: String,
}

impl NewProduct {
    pub fn from_input(input: CreateProduct, img: String) -> Self {
        Self {
            name: input.name,
            price: input.price,
            quantity: input.quantity,
            category: input.category,
            supplier: input.supplier,
            img,
        }
    }
}

/// Raw image file taken from the multipart `img` part
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteProductResponse {
    #[schema(example = "Product deleted id: 1")]
    pub message: String,
}

impl DeleteProductResponse {
    pub fn for_id(id: i32) -> Self {
        Self {
            message: format!("Product deleted id: {}", id),
        }
    }
}

/// OpenAPI shape of the `multipart/form-data` create request
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct CreateProductForm {
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub category: String,
    pub supplier: String,
    /// Image file
    #[schema(value_type = String, format = Binary)]
    pub img: Vec<u8>,
}
