//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use super::error::ApiError;
use super::{analysis, health, recommendations};

#[derive(OpenApi)]
#[openapi(
    paths(
        analysis::analyze,
        analysis::greenwashing,
        analysis::upload_image,
        recommendations::alternatives,
        recommendations::list_categories,
        recommendations::category_products,
        recommendations::material_alternatives_handler,
        health::liveness,
        health::readiness,
    ),
    components(schemas(super::error::ErrorResponse)),
    tags(
        (name = "analysis", description = "Sustainability and greenwashing analysis"),
        (name = "recommendations", description = "Sustainable alternatives"),
        (name = "health", description = "Service health")
    ),
    info(title = "Eco Analysis Service")
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> Result<HttpResponse, ApiError> {
    let yaml = ApiDoc::openapi()
        .to_yaml()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(HttpResponse::Ok().content_type("text/yaml").body(yaml))
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
