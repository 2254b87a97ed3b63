//! Sustainable alternative recommendations
//!
//! Alternatives come from, in order: a live marketplace lookup (when
//! enabled) or the curated table, then eco-leaning catalog products, and
//! finally templated store search links when nothing else matched.

mod catalog;
mod curated;
mod keywords;
mod marketplace;
mod materials;
mod stores;

use std::sync::Arc;

use url::form_urlencoded;

use crate::model::{Alternative, AlternativeProduct, CatalogProduct};

pub use catalog::ProductCatalog;
pub use curated::curated_alternatives;
pub use keywords::{extract_product_type, specific_product};
pub use marketplace::MarketplaceSearch;
pub use materials::material_alternatives;
pub use stores::{categories, category_alternatives};

const BASE_ECO_SCORE: f64 = 7.0;
const MAX_BADGES: usize = 3;

/// Keyword bonuses added to [`BASE_ECO_SCORE`]
const ECO_SCORE_BONUSES: &[(&str, f64)] = &[
    ("recycled", 1.0),
    ("organic", 1.0),
    ("sustainable", 0.5),
    ("biodegradable", 0.5),
];

const BADGES: &[(&str, &str)] = &[
    ("recycled", "Recycled Materials"),
    ("organic", "Organic"),
    ("biodegradable", "Biodegradable"),
    ("fair trade", "Fair Trade"),
    ("eco", "Eco-Friendly"),
];

pub struct RecommendationEngine {
    catalog: Arc<ProductCatalog>,
    marketplace: Option<MarketplaceSearch>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<ProductCatalog>, marketplace: Option<MarketplaceSearch>) -> Self {
        tracing::info!(
            catalog_products = catalog.len(),
            marketplace = marketplace.is_some(),
            "Recommendation engine initialized"
        );
        Self {
            catalog,
            marketplace,
        }
    }

    /// More sustainable alternatives for the described product
    pub async fn find_alternatives(
        &self,
        description: &str,
        category: Option<&str>,
    ) -> Vec<Alternative> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        let product_type = extract_product_type(description)
            .or(category)
            .unwrap_or("general");
        let specific = specific_product(product_type, description);

        tracing::debug!(product_type, specific, "Finding alternatives");

        let mut alternatives = match &self.marketplace {
            Some(marketplace) => {
                let found = marketplace.search(specific).await;
                if found.is_empty() {
                    tracing::warn!(product = specific, "No marketplace results, using curated table");
                    curated_alternatives(product_type, specific)
                } else {
                    found
                }
            }
            None => curated_alternatives(product_type, specific),
        };

        alternatives.extend(
            self.catalog
                .in_category(product_type)
                .map(catalog_alternative)
                .filter(|alt| alt.eco_score > BASE_ECO_SCORE),
        );

        if alternatives.is_empty() {
            return category_alternatives(category.unwrap_or(product_type));
        }
        alternatives
    }
}

fn catalog_alternative(product: &CatalogProduct) -> Alternative {
    scored(
        AlternativeProduct {
            name: product.name.clone(),
            description: product.description.clone(),
            price: Some(product.price),
            category: Some(product.category.clone()),
            url: format!(
                "https://www.amazon.com/s?k={}",
                query_component(&product.name.to_lowercase())
            ),
            image_url: None,
        },
        None,
        Vec::new(),
    )
}

/// Encode text as a single `application/x-www-form-urlencoded` query value
pub(crate) fn query_component(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

/// Attach the eco score and badges derived from the product text
pub(crate) fn scored(
    product: AlternativeProduct,
    improvement: Option<u8>,
    improvement_reasons: Vec<String>,
) -> Alternative {
    let text = format!(
        "{} {} {}",
        product.name,
        product.description,
        improvement_reasons.join(" ")
    )
    .to_lowercase();

    Alternative {
        eco_score: eco_score(&text),
        badges: badges(&text),
        product,
        improvement,
        improvement_reasons,
    }
}

fn eco_score(text: &str) -> f64 {
    let score = ECO_SCORE_BONUSES
        .iter()
        .filter(|(keyword, _)| text.contains(keyword))
        .fold(BASE_ECO_SCORE, |score, (_, bonus)| score + bonus);
    score.min(10.0)
}

fn badges(text: &str) -> Vec<String> {
    BADGES
        .iter()
        .filter(|(keyword, _)| text.contains(keyword))
        .take(MAX_BADGES)
        .map(|(_, badge)| badge.to_string())
        .collect()
}
