//! Live product lookup on sustainable web stores

use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::model::{Alternative, AlternativeProduct, MarketplaceConfig};

use super::scored;

/// Products taken from each store's result page
const PRODUCTS_PER_STORE: usize = 2;

const PRODUCT_IMAGE_SELECTOR: &str = "img.product-image";

/// Searches the configured stores one after another
#[derive(Debug, Clone)]
pub struct MarketplaceSearch {
    client: Client,
    stores: Vec<Url>,
    max_stores: usize,
}

impl MarketplaceSearch {
    pub fn new(config: &MarketplaceConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent("eco-analysis-service/1.0")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let stores = config
            .stores
            .iter()
            .filter_map(|store| match Url::parse(store) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!(store = %store, error = %e, "Ignoring invalid store URL");
                    None
                }
            })
            .collect();

        Ok(Self {
            client,
            stores,
            max_stores: config.max_stores,
        })
    }

    /// Search for `product`; unreachable stores are skipped
    pub async fn search(&self, product: &str) -> Vec<Alternative> {
        let mut alternatives = Vec::new();

        for store in self.stores.iter().take(self.max_stores) {
            let url = match search_url(store, product) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!(store = %store, error = %e, "Cannot build search URL");
                    continue;
                }
            };

            match self.fetch(&url).await {
                Ok(html) => {
                    let found = parse_products(&html, store, product);
                    tracing::debug!(store = %store, count = found.len(), "Marketplace results");
                    alternatives.extend(found);
                }
                Err(e) => {
                    tracing::warn!(store = %store, error = %e, "Marketplace search failed");
                }
            }
        }

        alternatives
    }

    async fn fetch(&self, url: &Url) -> Result<String, reqwest::Error> {
        self.client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

fn search_url(store: &Url, product: &str) -> Result<Url, url::ParseError> {
    let mut url = store.join("search")?;
    url.query_pairs_mut().append_pair("q", product);
    Ok(url)
}

/// Product entries from a store's search result page
pub fn parse_products(html: &str, store: &Url, product: &str) -> Vec<Alternative> {
    let Ok(selector) = Selector::parse(PRODUCT_IMAGE_SELECTOR) else {
        return Vec::new();
    };
    let document = Html::parse_document(html);

    document
        .select(&selector)
        .take(PRODUCTS_PER_STORE)
        .map(|img| {
            let name = img
                .value()
                .attr("alt")
                .map(str::trim)
                .filter(|alt| !alt.is_empty())
                .unwrap_or("Eco Product")
                .to_string();
            let image_url = img
                .value()
                .attr("src")
                .and_then(|src| store.join(src).ok())
                .map(String::from);

            scored(
                AlternativeProduct {
                    name,
                    description: format!("Sustainable alternative to conventional {}", product),
                    price: None,
                    category: None,
                    url: store.to_string(),
                    image_url,
                },
                None,
                vec![
                    "Sustainable materials".to_string(),
                    "Eco-friendly packaging".to_string(),
                ],
            )
        })
        .collect()
}
