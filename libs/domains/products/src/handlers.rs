//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, FromRequestParts, Multipart, State,
        multipart::{Field, MultipartRejection},
    },
    http::{StatusCode, request::Parts},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, IdPath, IdPathRejection, ValidatedJson,
    errors::responses::{
        BadGatewayResponse, BadRequestPathResponse, BadRequestValidationResponse,
        GatewayTimeoutResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::media::MediaUploader;
use crate::models::{
    CreateProduct, CreateProductForm, DeleteProductResponse, ImageUpload, Product, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Default cap on a create request, image included
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, CreateProductForm, UpdateProduct, DeleteProductResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestPathResponse,
            BadGatewayResponse,
            GatewayTimeoutResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product inventory endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R, M>(service: ProductService<R, M>, max_upload_bytes: usize) -> Router
where
    R: ProductRepository + 'static,
    M: MediaUploader + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(shared_service)
}

/// `{id}` path segment naming a product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub i32);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match IdPath::<i32>::from_request_parts(parts, state).await {
            Ok(IdPath(id)) => Ok(ProductId(id)),
            Err(IdPathRejection::Invalid(raw)) => Err(AppError::BadRequest(format!(
                "Invalid product id: {}",
                raw
            ))),
            Err(IdPathRejection::Path(e)) => Err(AppError::BadRequest(e.body_text())),
        }
    }
}

async fn read_text(field: Field<'_>) -> ProductResult<String> {
    Ok(field.text().await?)
}

fn require(value: Option<String>, name: &str) -> ProductResult<String> {
    value.ok_or_else(|| ProductError::Validation(format!("Missing field: {}", name)))
}

fn parse_number<T: std::str::FromStr>(value: Option<String>, name: &str) -> ProductResult<T> {
    let raw = require(value, name)?;
    raw.trim()
        .parse()
        .map_err(|_| ProductError::Validation(format!("Invalid number for {}: {}", name, raw)))
}

/// Pull the create form apart; parts other than the six known ones are ignored.
async fn read_create_form(
    mut multipart: Multipart,
) -> ProductResult<(CreateProduct, ImageUpload)> {
    let mut name = None;
    let mut price = None;
    let mut quantity = None;
    let mut category = None;
    let mut supplier = None;
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let part = field.name().map(str::to_string);
        match part.as_deref() {
            Some("name") => name = Some(read_text(field).await?),
            Some("price") => price = Some(read_text(field).await?),
            Some("quantity") => quantity = Some(read_text(field).await?),
            Some("category") => category = Some(read_text(field).await?),
            Some("supplier") => supplier = Some(read_text(field).await?),
            Some("img") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                image = Some(ImageUpload {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            _ => {}
        }
    }

    let input = CreateProduct {
        name: require(name, "name")?,
        price: parse_number(price, "price")?,
        quantity: parse_number(quantity, "quantity")?,
        category: require(category, "category")?,
        supplier: require(supplier, "supplier")?,
    };
    let image =
        image.ok_or_else(|| ProductError::Validation("Image file is required".to_string()))?;

    Ok((input, image))
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products ordered by id", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository, M: MediaUploader>(
    State(service): State<Arc<ProductService<R, M>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a product, uploading its image
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body(content = CreateProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 504, response = GatewayTimeoutResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository, M: MediaUploader>(
    State(service): State<Arc<ProductService<R, M>>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let (input, image) = read_create_form(multipart?).await?;
    let product = service.create_product(input, image).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository, M: MediaUploader>(
    State(service): State<Arc<ProductService<R, M>>>,
    ProductId(id): ProductId,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product's fields
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository, M: MediaUploader>(
    State(service): State<Arc<ProductService<R, M>>>,
    ProductId(id): ProductId,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = DeleteProductResponse),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository, M: MediaUploader>(
    State(service): State<Arc<ProductService<R, M>>>,
    ProductId(id): ProductId,
) -> ProductResult<Json<DeleteProductResponse>> {
    let response = service.delete_product(id).await?;
    Ok(Json(response))
}
