use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A product held in the in-memory demo catalog
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogProduct {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
}

/// A product suggested as a more sustainable alternative
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AlternativeProduct {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// An alternative together with why it is the better choice
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Alternative {
    pub product: AlternativeProduct,
    /// Estimated improvement over the original product on a 1-5 scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvement: Option<u8>,
    pub improvement_reasons: Vec<String>,
    /// Keyword-derived eco score on a 0-10 scale
    pub eco_score: f64,
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
}

/// A more sustainable substitute for a raw material
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MaterialAlternative {
    pub name: String,
    pub benefits: String,
    pub considerations: String,
}
