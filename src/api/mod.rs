pub mod analysis;
pub mod error;
pub mod health;
pub mod openapi;
pub mod recommendations;

use actix_web::web;

/// Register every route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::form_config())
        .configure(analysis::configure)
        .configure(recommendations::configure)
        .configure(health::configure)
        .configure(openapi::configure);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test as actix_test};

    use super::*;
    use crate::model::UploadConfig;
    use crate::service::{AnalysisService, ProductCatalog, RecommendationEngine};

    macro_rules! app {
        () => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(AnalysisService::new(None, None)))
                    .app_data(web::Data::new(RecommendationEngine::new(
                        Arc::new(ProductCatalog::with_demo_products()),
                        None,
                    )))
                    .app_data(web::Data::new(UploadConfig::default()))
                    .configure(configure),
            )
        };
    }

    #[actix_web::test]
    async fn test_oversized_form_is_json_error() {
        let app = app!().await;
        let description = "eco ".repeat(error::MAX_FORM_BYTES / 2);

        let req = actix_test::TestRequest::post()
            .uri("/greenwashing")
            .set_form([("description", description.as_str())])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["error"], "payload_too_large");
        assert!(body["request_id"].is_string());
    }

    #[actix_web::test]
    async fn test_wrong_content_type_is_json_error() {
        let app = app!().await;

        for uri in ["/analyze", "/alternatives", "/material_alternatives"] {
            let req = actix_test::TestRequest::post()
                .uri(uri)
                .set_json(serde_json::json!({"description": "Organic cotton tee"}))
                .to_request();
            let resp = actix_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");

            let body: serde_json::Value = actix_test::read_body_json(resp).await;
            assert_eq!(body["error"], "bad_request", "{uri}");
        }
    }

    #[actix_web::test]
    async fn test_routes_are_registered() {
        let app = app!().await;

        let req = actix_test::TestRequest::get().uri("/categories").to_request();
        assert!(actix_test::call_service(&app, req).await.status().is_success());

        let req = actix_test::TestRequest::get().uri("/openapi.json").to_request();
        assert!(actix_test::call_service(&app, req).await.status().is_success());
    }
}
