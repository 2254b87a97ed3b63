pub mod analysis;
pub mod extraction;
pub mod fallback;
pub mod image;
pub mod llm;
pub mod recommendation;
pub mod risk;
pub mod score;

pub use analysis::{AnalysisError, AnalysisService};
pub use llm::{GeminiClient, ModelClient};
pub use recommendation::{MarketplaceSearch, ProductCatalog, RecommendationEngine};
