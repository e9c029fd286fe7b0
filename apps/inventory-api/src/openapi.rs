//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Inventory API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = "Product inventory CRUD with hosted product images",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product inventory endpoints")
    )
)]
pub struct ApiDoc;
