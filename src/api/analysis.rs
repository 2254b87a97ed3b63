//! Product analysis endpoints

use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, post, web};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::ApiError;
use crate::model::{
    Alternative, AnalysisOutcome, AnalysisRequest, GreenwashingAssessment, ImageAnalysis,
    ImageAnalysisResult, UploadConfig,
};
use crate::service::{AnalysisService, RecommendationEngine};

/// Form fields beyond this length are rejected
const MAX_TEXT_FIELD_BYTES: usize = 1024;

#[derive(Debug, Deserialize, ToSchema)]
pub struct DescriptionForm {
    /// Free-text product description
    pub description: Option<String>,
    /// Optional category hint, e.g. "clothing"
    pub category: Option<String>,
}

impl DescriptionForm {
    /// Trimmed description, or 400 when missing or blank
    pub(crate) fn require_description(&self) -> Result<&str, ApiError> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| ApiError::BadRequest("Product description is required".to_string()))
    }

    pub(crate) fn category(&self) -> Option<&str> {
        self.category.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

/// Multipart body of `/upload_image`
#[derive(ToSchema)]
#[allow(dead_code)] // OpenAPI schema only
pub struct ImageUploadForm {
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
    /// Identify every product in the image
    detect_multiple: Option<bool>,
    category: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisResponse {
    pub analysis: AnalysisOutcome,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GreenwashingResponse {
    pub analysis: GreenwashingAssessment,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageUploadResponse {
    pub analysis: ImageAnalysisResult,
    /// Alternatives for the first identified product
    pub alternatives: Vec<Alternative>,
}

/// Analyze a product description for sustainability
#[utoipa::path(
    post,
    path = "/analyze",
    request_body(content = DescriptionForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Analysis completed", body = AnalysisResponse),
        (status = 400, description = "Missing description", body = super::error::ErrorResponse),
        (status = 503, description = "No model configured", body = super::error::ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/analyze")]
pub async fn analyze(
    service: web::Data<AnalysisService>,
    form: web::Form<DescriptionForm>,
) -> Result<HttpResponse, ApiError> {
    let description = form.require_description()?;
    let request = AnalysisRequest::description(description, form.category().map(String::from));

    let analysis = service.analyze(request).await?;
    Ok(HttpResponse::Ok().json(AnalysisResponse { analysis }))
}

/// Assess a product description for greenwashing
#[utoipa::path(
    post,
    path = "/greenwashing",
    request_body(content = DescriptionForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Assessment completed", body = GreenwashingResponse),
        (status = 400, description = "Missing description", body = super::error::ErrorResponse),
        (status = 503, description = "No model configured", body = super::error::ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/greenwashing")]
pub async fn greenwashing(
    service: web::Data<AnalysisService>,
    form: web::Form<DescriptionForm>,
) -> Result<HttpResponse, ApiError> {
    let description = form.require_description()?;
    let analysis = service.identify_greenwashing(description).await?;
    Ok(HttpResponse::Ok().json(GreenwashingResponse { analysis }))
}

/// Analyze a product photo and suggest alternatives
#[utoipa::path(
    post,
    path = "/upload_image",
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Analysis completed", body = ImageUploadResponse),
        (status = 400, description = "No image provided", body = super::error::ErrorResponse),
        (status = 413, description = "Image too large", body = super::error::ErrorResponse),
        (status = 422, description = "Image could not be decoded", body = super::error::ErrorResponse),
        (status = 503, description = "No vision model configured", body = super::error::ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/upload_image")]
pub async fn upload_image(
    service: web::Data<AnalysisService>,
    engine: web::Data<RecommendationEngine>,
    limits: web::Data<UploadConfig>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let upload = ImageUpload::read(payload, limits.max_bytes).await?;
    tracing::info!(
        filename = %upload.filename,
        bytes = upload.bytes.len(),
        detect_multiple = upload.detect_multiple,
        "Image uploaded"
    );

    let analysis = service
        .analyze(AnalysisRequest::image(upload.bytes, upload.detect_multiple))
        .await?;
    let AnalysisOutcome::Image(analysis) = analysis else {
        return Err(ApiError::Internal("unexpected analysis outcome".to_string()));
    };

    let primary = analysis.primary();
    let alternatives = match primary.and_then(ImageAnalysis::product_name) {
        Some(name) if !name.trim().is_empty() => {
            let details = primary
                .and_then(|p| p.image_analysis.as_ref())
                .and_then(|o| o.description.as_deref())
                .unwrap_or_default();
            tracing::debug!(product = %name, "Looking for alternatives");
            engine
                .find_alternatives(&format!("{}. {}", name, details), upload.category.as_deref())
                .await
        }
        _ => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(ImageUploadResponse {
        analysis,
        alternatives,
    }))
}

/// Fields collected from the `/upload_image` form
#[derive(Debug)]
struct ImageUpload {
    bytes: Vec<u8>,
    filename: String,
    detect_multiple: bool,
    category: Option<String>,
}

impl ImageUpload {
    async fn read(mut payload: Multipart, max_bytes: usize) -> Result<Self, ApiError> {
        let mut image = None;
        let mut detect_multiple = false;
        let mut category = None;

        while let Some(mut field) = payload.try_next().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "image" => {
                    let filename = field
                        .content_disposition()
                        .and_then(|cd| cd.get_filename())
                        .map(sanitize_filename)
                        .unwrap_or_default();
                    let bytes = read_field(&mut field, max_bytes)
                        .await?
                        .ok_or(ApiError::PayloadTooLarge(max_bytes))?;
                    image = Some((filename, bytes));
                }
                "detect_multiple" => {
                    detect_multiple = parse_flag(&read_text(&mut field).await?);
                }
                "category" => {
                    let value = read_text(&mut field).await?;
                    category = Some(value.trim().to_string()).filter(|c| !c.is_empty());
                }
                _ => while field.try_next().await?.is_some() {},
            }
        }

        let (filename, bytes) =
            image.ok_or_else(|| ApiError::BadRequest("No image file provided".to_string()))?;
        if filename.is_empty() || bytes.is_empty() {
            return Err(ApiError::BadRequest("No image selected".to_string()));
        }

        Ok(Self {
            bytes,
            filename,
            detect_multiple,
            category,
        })
    }
}

/// Read a field, or `None` once it grows past `limit`
async fn read_field(field: &mut Field, limit: usize) -> Result<Option<Vec<u8>>, ApiError> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        if buffer.len() + chunk.len() > limit {
            return Ok(None);
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(Some(buffer))
}

async fn read_text(field: &mut Field) -> Result<String, ApiError> {
    let bytes = read_field(field, MAX_TEXT_FIELD_BYTES)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Form field too long".to_string()))?;
    String::from_utf8(bytes).map_err(|_| ApiError::BadRequest("Form field is not UTF-8".to_string()))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "on" | "yes"
    )
}

/// Reduce an uploaded filename to a safe ASCII basename
fn sanitize_filename(name: &str) -> String {
    let basename = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = basename
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    cleaned.trim_start_matches(['.', '_']).to_string()
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze)
        .service(greenwashing)
        .service(upload_image);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test as actix_test};
    use async_trait::async_trait;

    use super::*;
    use crate::service::ProductCatalog;
    use crate::service::image::PreparedImage;
    use crate::service::llm::{ModelClient, ModelError};

    const BOUNDARY: &str = "----eco-test-boundary";

    struct FixedReply(&'static str);

    #[async_trait]
    impl ModelClient for FixedReply {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
            Ok(self.0.to_string())
        }

        async fn generate_with_image(
            &self,
            _prompt: &str,
            _image: &PreparedImage,
        ) -> Result<String, ModelError> {
            Ok(self.0.to_string())
        }
    }

    fn service(reply: Option<&'static str>) -> web::Data<AnalysisService> {
        let model = reply.map(|r| Arc::new(FixedReply(r)) as Arc<dyn ModelClient>);
        web::Data::new(AnalysisService::new(model.clone(), model))
    }

    fn engine() -> web::Data<RecommendationEngine> {
        web::Data::new(RecommendationEngine::new(
            Arc::new(ProductCatalog::with_demo_products()),
            None,
        ))
    }

    fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, filename, content) in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            let disposition = match filename {
                Some(f) => format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    name, f
                ),
                None => format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name),
            };
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn png() -> Vec<u8> {
        let img = ::image::DynamicImage::ImageRgb8(::image::RgbImage::from_pixel(
            8,
            8,
            ::image::Rgb([30, 160, 60]),
        ));
        let mut buffer = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buffer, ::image::ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\photos\\my hoodie.png"), "my_hoodie.png");
        assert_eq!(sanitize_filename(".hidden.jpg"), "hidden.jpg");
        assert_eq!(sanitize_filename("prodüct.jpg"), "prodct.jpg");
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" ON "));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[actix_web::test]
    async fn test_analyze_requires_description() {
        let app = actix_test::init_service(
            App::new()
                .app_data(service(Some("{}")))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/analyze")
            .set_form([("description", "  ")])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_analyze_without_model_is_unavailable() {
        let app = actix_test::init_service(App::new().app_data(service(None)).configure(configure)).await;

        let req = actix_test::TestRequest::post()
            .uri("/greenwashing")
            .set_form([("description", "Eco-friendly bottle")])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_analyze_returns_model_scores() {
        let reply = r#"```json
{"overall_sustainability_score": "8/10", "sustainability_tags": {"Organic": true}}
```"#;
        let app = actix_test::init_service(
            App::new()
                .app_data(service(Some(reply)))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/analyze")
            .set_form([("description", "Organic cotton tee"), ("category", "clothing")])
            .to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["analysis"]["overall_sustainability_score"], 8.0);
        assert_eq!(body["analysis"]["sustainability_tags"]["Organic"], true);
    }

    #[actix_web::test]
    async fn test_upload_image_with_alternatives() {
        let reply = r#"{"image_analysis": {"product_name": "Fleece Hoodie", "description": "Grey pullover"}}"#;
        let app = actix_test::init_service(
            App::new()
                .app_data(service(Some(reply)))
                .app_data(engine())
                .app_data(web::Data::new(UploadConfig::default()))
                .configure(configure),
        )
        .await;

        let image = png();
        let body = multipart_body(&[("image", Some("hoodie.png"), &image)]);
        let req = actix_test::TestRequest::post()
            .uri("/upload_image")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
            .to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["analysis"]["image_analysis"]["product_name"], "Fleece Hoodie");
        let alternatives = body["alternatives"].as_array().unwrap();
        assert!(!alternatives.is_empty());
        assert!(alternatives[0]["product"]["name"].as_str().unwrap().contains("Hoodie"));
    }

    #[actix_web::test]
    async fn test_upload_image_over_limit() {
        let app = actix_test::init_service(
            App::new()
                .app_data(service(Some("{}")))
                .app_data(engine())
                .app_data(web::Data::new(UploadConfig { max_bytes: 16 }))
                .configure(configure),
        )
        .await;

        let image = png();
        let body = multipart_body(&[("image", Some("big.png"), &image)]);
        let req = actix_test::TestRequest::post()
            .uri("/upload_image")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[actix_web::test]
    async fn test_upload_without_image_is_bad_request() {
        let app = actix_test::init_service(
            App::new()
                .app_data(service(Some("{}")))
                .app_data(engine())
                .app_data(web::Data::new(UploadConfig::default()))
                .configure(configure),
        )
        .await;

        let body = multipart_body(&[("category", None, b"clothing")]);
        let req = actix_test::TestRequest::post()
            .uri("/upload_image")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_undecodable_upload_is_unprocessable() {
        let app = actix_test::init_service(
            App::new()
                .app_data(service(Some("{}")))
                .app_data(engine())
                .app_data(web::Data::new(UploadConfig::default()))
                .configure(configure),
        )
        .await;

        let body = multipart_body(&[("image", Some("notes.txt"), b"plain text, not pixels")]);
        let req = actix_test::TestRequest::post()
            .uri("/upload_image")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
