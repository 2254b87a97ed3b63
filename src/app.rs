//! Application state and service initialization
//!
//! Builds the model clients, analysis service, and recommendation engine
//! once at startup. Handlers receive them as shared `web::Data`.

use std::sync::Arc;

use crate::model::{Config, UploadConfig};
use crate::service::llm::ModelError;
use crate::service::{
    AnalysisService, GeminiClient, MarketplaceSearch, ModelClient, ProductCatalog,
    RecommendationEngine,
};

/// Application state containing all services and shared resources
pub struct AppState {
    pub analysis_service: Arc<AnalysisService>,
    pub recommendation_engine: Arc<RecommendationEngine>,
    pub upload: UploadConfig,
}

impl AppState {
    /// Initialize all services
    ///
    /// A missing API key is not fatal: recommendation endpoints keep
    /// working and analysis endpoints answer 503.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let (text_model, vision_model) = match config.api_key.as_deref() {
            Some(api_key) => {
                let text = Self::build_model(api_key, &config.text_model, &config)?;
                let vision = if config.vision_model == config.text_model {
                    Arc::clone(&text)
                } else {
                    Self::build_model(api_key, &config.vision_model, &config)?
                };
                (Some(text), Some(vision))
            }
            None => (None, None),
        };

        let analysis_service = Arc::new(AnalysisService::new(text_model, vision_model));

        let catalog = Arc::new(ProductCatalog::with_demo_products());
        let marketplace = if config.marketplace.enabled {
            match MarketplaceSearch::new(&config.marketplace) {
                Ok(search) => {
                    tracing::info!(
                        stores = config.marketplace.stores.len(),
                        max_stores = config.marketplace.max_stores,
                        "Marketplace lookup enabled"
                    );
                    Some(search)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Marketplace client unavailable, using curated alternatives");
                    None
                }
            }
        } else {
            None
        };
        let recommendation_engine = Arc::new(RecommendationEngine::new(catalog, marketplace));

        Ok(Self {
            analysis_service,
            recommendation_engine,
            upload: config.upload,
        })
    }

    fn build_model(
        api_key: &str,
        model: &str,
        config: &Config,
    ) -> Result<Arc<dyn ModelClient>, AppError> {
        let client = GeminiClient::new(api_key, model, &config.model)?;
        Ok(Arc::new(client))
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Model client could not be created
    #[error("Model client initialization failed: {0}")]
    ModelInit(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_without_api_key() {
        let state = AppState::new(Config::default()).unwrap();
        assert!(!state.analysis_service.is_ready());
        assert_eq!(state.upload.max_bytes, crate::model::config::DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_state_with_api_key() {
        let config = Config {
            api_key: Some("test-key".to_string()),
            ..Config::default()
        };
        let state = AppState::new(config).unwrap();
        assert!(state.analysis_service.is_ready());
    }
}
