//! Sustainability analysis orchestration
//!
//! Every entry point follows the same path: check the model is configured,
//! prompt it, extract the structured reply, and fall back to keyword
//! analysis when the call fails or the reply cannot be used. Only a missing
//! model and an undecodable image are reported to the caller.

use std::sync::Arc;

use serde_json::Value;

use crate::model::{
    AnalysisInput, AnalysisOutcome, AnalysisRequest, DescriptionAnalysis, GreenwashingAssessment,
    ImageAnalysis, ImageAnalysisResult, MultiProductAnalysis, SustainabilityScore,
};
use crate::service::analysis::prompts::{
    build_description_prompt, build_greenwashing_prompt, build_image_description_prompt,
    build_image_prompt, build_multi_product_prompt,
};
use crate::service::extraction;
use crate::service::fallback;
use crate::service::image::{self, ImageDecodeError, PreparedImage};
use crate::service::llm::ModelClient;

pub mod error;
pub mod prompts;

pub use error::AnalysisError;
use error::ReplyError;

/// Runs model analyses with keyword fallbacks
pub struct AnalysisService {
    text_model: Option<Arc<dyn ModelClient>>,
    vision_model: Option<Arc<dyn ModelClient>>,
}

impl AnalysisService {
    /// Create the service. A `None` model makes its entry points report
    /// [`AnalysisError::ModelUnavailable`].
    pub fn new(
        text_model: Option<Arc<dyn ModelClient>>,
        vision_model: Option<Arc<dyn ModelClient>>,
    ) -> Self {
        tracing::info!(
            text_model = text_model.as_ref().map(|m| m.name()).unwrap_or("none"),
            vision_model = vision_model.as_ref().map(|m| m.name()).unwrap_or("none"),
            "Analysis service initialized"
        );
        Self {
            text_model,
            vision_model,
        }
    }

    /// Whether both models are configured
    pub fn is_ready(&self) -> bool {
        self.text_model.is_some() && self.vision_model.is_some()
    }

    /// Dispatch a request to the matching entry point
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutcome, AnalysisError> {
        match request.input {
            AnalysisInput::Description(description) => self
                .analyze_description(&description, request.category.as_deref())
                .await
                .map(AnalysisOutcome::Description),
            AnalysisInput::Image(bytes) => self
                .analyze_image(&bytes, request.detect_multiple)
                .await
                .map(AnalysisOutcome::Image),
        }
    }

    /// Score a product description for sustainability
    pub async fn analyze_description(
        &self,
        description: &str,
        category: Option<&str>,
    ) -> Result<DescriptionAnalysis, AnalysisError> {
        let model = self
            .text_model
            .as_deref()
            .ok_or(AnalysisError::ModelUnavailable("AI"))?;

        tracing::debug!(
            description = %preview(description),
            category = ?category,
            "Analyzing product description"
        );

        let prompt = build_description_prompt(description, category);
        match ask::<DescriptionAnalysis>(model, &prompt).await {
            Ok(analysis) => {
                tracing::debug!(
                    overall = ?analysis.overall_sustainability_score.map(SustainabilityScore::value),
                    active_tags = analysis.sustainability_tags.active().count(),
                    "Description analysis completed"
                );
                Ok(analysis)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Description analysis unusable, using keyword fallback");
                Ok(fallback::description_fallback(description, &mut rand::rng()))
            }
        }
    }

    /// Assess a product description for greenwashing
    pub async fn identify_greenwashing(
        &self,
        description: &str,
    ) -> Result<GreenwashingAssessment, AnalysisError> {
        let model = self
            .text_model
            .as_deref()
            .ok_or(AnalysisError::ModelUnavailable("AI"))?;

        tracing::debug!(description = %preview(description), "Analyzing for greenwashing");

        let prompt = build_greenwashing_prompt(description);
        match ask::<GreenwashingAssessment>(model, &prompt).await {
            Ok(assessment) => Ok(assessment),
            Err(e) => {
                tracing::warn!(error = %e, "Greenwashing analysis unusable, using rule-based fallback");
                Ok(fallback::greenwashing_fallback(description))
            }
        }
    }

    /// Analyze a product photo, optionally identifying every product in it
    ///
    /// If the vision call itself fails, one text-only call is made with a
    /// synthetic description of the image before falling back to the stub.
    pub async fn analyze_image(
        &self,
        bytes: &[u8],
        detect_multiple: bool,
    ) -> Result<ImageAnalysisResult, AnalysisError> {
        let vision = self
            .vision_model
            .as_deref()
            .ok_or(AnalysisError::ModelUnavailable("Vision"))?;

        let image = prepare(bytes).await?;
        tracing::debug!(
            format = %image.format_name,
            width = image.width,
            height = image.height,
            detect_multiple,
            "Analyzing product image"
        );

        let prompt = if detect_multiple {
            build_multi_product_prompt()
        } else {
            build_image_prompt()
        };

        match vision.generate_with_image(&prompt, &image).await {
            Ok(raw) => match parse_image_reply(&raw, detect_multiple) {
                Ok(result) => Ok(result),
                Err(e) => {
                    tracing::warn!(error = %e, "Image analysis unusable, using placeholder");
                    Ok(image_fallback(detect_multiple))
                }
            },
            Err(e) => {
                tracing::error!(
                    model = %vision.name(),
                    error = %e,
                    "Vision model failed, trying text-only analysis"
                );
                Ok(self.analyze_image_as_text(&image, detect_multiple).await)
            }
        }
    }

    async fn analyze_image_as_text(
        &self,
        image: &PreparedImage,
        detect_multiple: bool,
    ) -> ImageAnalysisResult {
        let Some(model) = self.text_model.as_deref() else {
            return image_fallback(detect_multiple);
        };

        let prompt = build_image_description_prompt(&image.synthetic_description());
        let reply = match model.generate(&prompt).await {
            Ok(raw) => parse_image_reply(&raw, detect_multiple),
            Err(e) => Err(ReplyError::from(e)),
        };

        reply.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Text-only image analysis failed, using placeholder");
            image_fallback(detect_multiple)
        })
    }
}

/// Prompt the model and parse its reply into `T`
async fn ask<T: serde::de::DeserializeOwned>(
    model: &dyn ModelClient,
    prompt: &str,
) -> Result<T, ReplyError> {
    let raw = model.generate(prompt).await?;
    Ok(extraction::extract_as(&raw)?)
}

/// A reply with a `products` list is a multi-product result. A single-product
/// reply to a multi-product request is wrapped as a one-product result.
fn parse_image_reply(raw: &str, detect_multiple: bool) -> Result<ImageAnalysisResult, ReplyError> {
    let payload = Value::Object(extraction::extract(raw)?);

    if payload.get("products").is_some() {
        let multi: MultiProductAnalysis =
            serde_json::from_value(payload).map_err(extraction::ExtractionError::Schema)?;
        if multi.product_count() == 0 {
            return Err(ReplyError::NoProducts);
        }
        return Ok(ImageAnalysisResult::Multiple(multi));
    }

    let single: ImageAnalysis =
        serde_json::from_value(payload).map_err(extraction::ExtractionError::Schema)?;
    Ok(if detect_multiple {
        ImageAnalysisResult::Multiple(MultiProductAnalysis::new(vec![single]))
    } else {
        ImageAnalysisResult::Single(single)
    })
}

fn image_fallback(detect_multiple: bool) -> ImageAnalysisResult {
    if detect_multiple {
        ImageAnalysisResult::Multiple(fallback::multi_product_fallback())
    } else {
        ImageAnalysisResult::Single(fallback::image_fallback())
    }
}

/// Decoding and resizing are CPU-bound, keep them off the async workers
async fn prepare(bytes: &[u8]) -> Result<PreparedImage, ImageDecodeError> {
    let owned = bytes.to_vec();
    tokio::task::spawn_blocking(move || image::prepare_image(&owned))
        .await
        .map_err(|e| ImageDecodeError::Task(e.to_string()))?
}

fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RiskLevel;
    use crate::service::llm::ModelError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replies with a fixed text, or fails every call when `reply` is `None`
    struct StubModel {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl StubModel {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn unreachable() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn respond(&self) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().ok_or(ModelError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    #[async_trait]
    impl ModelClient for StubModel {
        fn name(&self) -> &str {
            "stub"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
            self.respond()
        }

        async fn generate_with_image(
            &self,
            _prompt: &str,
            _image: &PreparedImage,
        ) -> Result<String, ModelError> {
            self.respond()
        }
    }

    fn service(text: Option<Arc<StubModel>>, vision: Option<Arc<StubModel>>) -> AnalysisService {
        AnalysisService::new(
            text.map(|m| m as Arc<dyn ModelClient>),
            vision.map(|m| m as Arc<dyn ModelClient>),
        )
    }

    fn png_bytes() -> Vec<u8> {
        let img = ::image::DynamicImage::ImageRgb8(::image::RgbImage::new(8, 6));
        let mut buffer = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buffer, ::image::ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    const SINGLE_REPLY: &str = r#"```json
{"image_analysis": {"product_name": "Glass bottle", "visible_materials": ["glass"]},
 "sustainability_analysis": {"overall_sustainability_score": "8/10", "greenwashing_risk": "Low"}}
```"#;

    #[tokio::test]
    async fn test_unreachable_model_falls_back_with_all_scores() {
        let text = StubModel::unreachable();
        let service = service(Some(text.clone()), None);

        let analysis = service
            .analyze_description("Organic cotton tote bag", None)
            .await
            .unwrap();

        assert_eq!(text.calls(), 1);
        let scores = [
            analysis.materials_sustainability,
            analysis.manufacturing_process,
            analysis.carbon_footprint,
            analysis.recyclability,
            analysis.overall_sustainability_score,
        ];
        for score in scores {
            let value = score.map(SustainabilityScore::value).unwrap();
            assert!((1.0..=9.0).contains(&value));
        }
    }

    #[tokio::test]
    async fn test_model_reply_is_parsed() {
        let text = StubModel::replying(
            "Here you go: {\"overall_sustainability_score\": 85, \"improvement_opportunities\": [\"Less packaging\"]}",
        );
        let service = service(Some(text), None);

        let analysis = service.analyze_description("Tote bag", None).await.unwrap();
        assert_eq!(
            analysis.overall_sustainability_score,
            Some(SustainabilityScore::new(8.5))
        );
        assert!(analysis.materials_sustainability.is_none());
        assert_eq!(analysis.improvement_opportunities, vec!["Less packaging"]);
    }

    #[tokio::test]
    async fn test_unparsable_greenwashing_reply_uses_rules() {
        let text = StubModel::replying("I'm sorry, I can't help with that.");
        let service = service(Some(text), None);

        let assessment = service
            .identify_greenwashing("Eco-friendly, green, natural cleaner")
            .await
            .unwrap();
        assert_eq!(assessment.greenwashing_risk, Some(RiskLevel::High));
        assert!(!assessment.issues.is_empty());
    }

    #[tokio::test]
    async fn test_missing_models_are_reported() {
        let service = service(None, None);
        assert!(!service.is_ready());

        assert!(matches!(
            service.analyze_description("anything", None).await,
            Err(AnalysisError::ModelUnavailable(_))
        ));
        assert!(matches!(
            service.identify_greenwashing("anything").await,
            Err(AnalysisError::ModelUnavailable(_))
        ));
        assert!(matches!(
            service.analyze_image(&png_bytes(), false).await,
            Err(AnalysisError::ModelUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_corrupt_image_is_an_error_not_a_fallback() {
        let vision = StubModel::replying(SINGLE_REPLY);
        let service = service(None, Some(vision.clone()));

        let result = service.analyze_image(b"not an image", false).await;
        assert!(matches!(result, Err(AnalysisError::ImageDecode(_))));
        assert_eq!(vision.calls(), 0);
    }

    #[tokio::test]
    async fn test_single_image_reply() {
        let vision = StubModel::replying(SINGLE_REPLY);
        let service = service(None, Some(vision));

        let result = service.analyze_image(&png_bytes(), false).await.unwrap();
        let ImageAnalysisResult::Single(analysis) = result else {
            panic!("expected single product result");
        };
        assert_eq!(analysis.product_name(), Some("Glass bottle"));
        let sustainability = analysis.sustainability_analysis.unwrap();
        assert_eq!(
            sustainability.overall_sustainability_score,
            Some(SustainabilityScore::new(8.0))
        );
    }

    #[tokio::test]
    async fn test_vision_failure_uses_text_model_once() {
        let text = StubModel::replying(SINGLE_REPLY);
        let vision = StubModel::unreachable();
        let service = service(Some(text.clone()), Some(vision.clone()));

        let result = service.analyze_image(&png_bytes(), false).await.unwrap();
        assert_eq!(vision.calls(), 1);
        assert_eq!(text.calls(), 1);
        assert_eq!(
            result.primary().and_then(ImageAnalysis::product_name),
            Some("Glass bottle")
        );
    }

    #[tokio::test]
    async fn test_vision_and_text_failure_uses_placeholder() {
        let text = StubModel::unreachable();
        let vision = StubModel::unreachable();
        let service = service(Some(text.clone()), Some(vision));

        let result = service.analyze_image(&png_bytes(), true).await.unwrap();
        assert_eq!(text.calls(), 1);
        let ImageAnalysisResult::Multiple(multi) = result else {
            panic!("expected multi product result");
        };
        assert_eq!(multi.product_count(), 1);
        assert_eq!(multi.products()[0].product_name(), Some("Product"));
    }

    #[tokio::test]
    async fn test_multi_product_count_is_recomputed() {
        let vision = StubModel::replying(
            r#"{"multiple_products": true, "product_count": 5, "products": [
                {"image_analysis": {"product_name": "Cup"}},
                {"image_analysis": {"product_name": "Straw"}}
            ]}"#,
        );
        let service = service(None, Some(vision));

        let result = service.analyze_image(&png_bytes(), true).await.unwrap();
        let ImageAnalysisResult::Multiple(multi) = result else {
            panic!("expected multi product result");
        };
        assert_eq!(multi.product_count(), 2);
    }

    #[tokio::test]
    async fn test_single_reply_to_multi_request_is_wrapped() {
        let vision = StubModel::replying(SINGLE_REPLY);
        let service = service(None, Some(vision));

        let result = service.analyze_image(&png_bytes(), true).await.unwrap();
        let ImageAnalysisResult::Multiple(multi) = result else {
            panic!("expected multi product result");
        };
        assert_eq!(multi.product_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_product_list_uses_placeholder() {
        let vision = StubModel::replying(r#"{"products": []}"#);
        let service = service(None, Some(vision));

        let result = service.analyze_image(&png_bytes(), true).await.unwrap();
        assert_eq!(
            result.primary().and_then(ImageAnalysis::product_name),
            Some("Product")
        );
    }

    #[tokio::test]
    async fn test_dispatch_description_request() {
        let service = service(Some(StubModel::unreachable()), None);
        let outcome = service
            .analyze(AnalysisRequest::description("Bamboo toothbrush", Some("home".to_string())))
            .await
            .unwrap();
        assert!(matches!(outcome, AnalysisOutcome::Description(_)));
    }
}
