//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({ "error": "An unexpected error occurred" })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "error": "Request validation failed",
        "details": {
            "price": [{
                "code": "range",
                "message": null,
                "params": {"min": 0.0, "value": -1.0}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid path parameter",
    content_type = "application/json",
    example = json!({ "error": "Invalid product id: abc" })
)]
pub struct BadRequestPathResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({ "error": "Product not found" })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Gateway - Upstream service failed",
    content_type = "application/json",
    example = json!({ "error": "Image upload failed: Invalid image file" })
)]
pub struct BadGatewayResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Gateway Timeout - Upstream service did not answer in time",
    content_type = "application/json",
    example = json!({ "error": "Image upload timed out after 30s" })
)]
pub struct GatewayTimeoutResponse(pub ErrorResponse);
