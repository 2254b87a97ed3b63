//! Alternative product and material recommendation endpoints

use std::collections::BTreeMap;

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::analysis::DescriptionForm;
use super::error::ApiError;
use crate::model::{Alternative, Category, MaterialAlternative};
use crate::service::RecommendationEngine;
use crate::service::recommendation::{categories, category_alternatives, material_alternatives};

#[derive(Debug, Deserialize, ToSchema)]
pub struct MaterialsForm {
    /// Comma-separated material names, e.g. "plastic, cotton"
    pub materials: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AlternativesResponse {
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryProductsResponse {
    pub products: Vec<Alternative>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MaterialAlternativesResponse {
    /// Alternatives keyed by the material as submitted
    pub alternatives: BTreeMap<String, Vec<MaterialAlternative>>,
}

/// Find more sustainable alternatives for a product
#[utoipa::path(
    post,
    path = "/alternatives",
    request_body(content = DescriptionForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Alternatives found", body = AlternativesResponse),
        (status = 400, description = "Missing description", body = super::error::ErrorResponse)
    ),
    tag = "recommendations"
)]
#[post("/alternatives")]
pub async fn alternatives(
    engine: web::Data<RecommendationEngine>,
    form: web::Form<DescriptionForm>,
) -> Result<HttpResponse, ApiError> {
    let description = form.require_description()?;
    let alternatives = engine
        .find_alternatives(description, form.category())
        .await;
    tracing::debug!(count = alternatives.len(), "Found alternatives");

    Ok(HttpResponse::Ok().json(AlternativesResponse { alternatives }))
}

/// List browsable product categories
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Categories", body = CategoriesResponse)
    ),
    tag = "recommendations"
)]
#[get("/categories")]
pub async fn list_categories() -> HttpResponse {
    HttpResponse::Ok().json(CategoriesResponse {
        categories: categories(),
    })
}

/// Store search links for sustainable products in a category
#[utoipa::path(
    get,
    path = "/category_products/{category}",
    params(
        ("category" = String, Path, description = "Category id or free-text category name")
    ),
    responses(
        (status = 200, description = "Products for the category", body = CategoryProductsResponse)
    ),
    tag = "recommendations"
)]
#[get("/category_products/{category}")]
pub async fn category_products(path: web::Path<String>) -> HttpResponse {
    let category = path.into_inner();
    HttpResponse::Ok().json(CategoryProductsResponse {
        products: category_alternatives(&category),
    })
}

/// Suggest substitutes for raw materials
#[utoipa::path(
    post,
    path = "/material_alternatives",
    request_body(content = MaterialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Material alternatives", body = MaterialAlternativesResponse),
        (status = 400, description = "No materials given", body = super::error::ErrorResponse)
    ),
    tag = "recommendations"
)]
#[post("/material_alternatives")]
pub async fn material_alternatives_handler(
    form: web::Form<MaterialsForm>,
) -> Result<HttpResponse, ApiError> {
    let materials = form
        .materials
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No materials specified".to_string()))?;

    Ok(HttpResponse::Ok().json(MaterialAlternativesResponse {
        alternatives: material_alternatives(materials),
    }))
}

/// Configure recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(alternatives)
        .service(list_categories)
        .service(category_products)
        .service(material_alternatives_handler);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test as actix_test};

    use super::*;
    use crate::service::ProductCatalog;

    fn engine() -> web::Data<RecommendationEngine> {
        web::Data::new(RecommendationEngine::new(
            Arc::new(ProductCatalog::with_demo_products()),
            None,
        ))
    }

    #[actix_web::test]
    async fn test_categories() {
        let app = actix_test::init_service(App::new().configure(configure)).await;
        let req = actix_test::TestRequest::get().uri("/categories").to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

        let categories = body["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 10);
        assert_eq!(categories[0]["id"], "clothing");
    }

    #[actix_web::test]
    async fn test_category_products_always_three() {
        let app = actix_test::init_service(App::new().configure(configure)).await;
        let req = actix_test::TestRequest::get()
            .uri("/category_products/garden%20tools")
            .to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["products"].as_array().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn test_alternatives_for_description() {
        let app = actix_test::init_service(App::new().app_data(engine()).configure(configure)).await;
        let req = actix_test::TestRequest::post()
            .uri("/alternatives")
            .set_form([("description", "Aluminium road bicycle")])
            .to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

        let found = body["alternatives"].as_array().unwrap();
        assert!(!found.is_empty());
        assert!(found.iter().all(|a| a["eco_score"].as_f64().unwrap() >= 7.0));
    }

    #[actix_web::test]
    async fn test_alternatives_requires_description() {
        let app = actix_test::init_service(App::new().app_data(engine()).configure(configure)).await;
        let req = actix_test::TestRequest::post()
            .uri("/alternatives")
            .set_form([("category", "toys")])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_material_alternatives() {
        let app = actix_test::init_service(App::new().configure(configure)).await;
        let req = actix_test::TestRequest::post()
            .uri("/material_alternatives")
            .set_form([("materials", "plastic, cotton")])
            .to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["alternatives"]["plastic"].as_array().unwrap().len(), 3);
        assert!(body["alternatives"]["cotton"].is_array());

        let req = actix_test::TestRequest::post()
            .uri("/material_alternatives")
            .set_form([("materials", "")])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
