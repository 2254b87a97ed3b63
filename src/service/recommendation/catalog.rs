//! In-memory product catalog
//!
//! Filled once at startup and shared read-only afterwards.

use crate::model::CatalogProduct;

#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<CatalogProduct>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the demo products
    pub fn with_demo_products() -> Self {
        let mut catalog = Self::new();
        for product in demo_products() {
            catalog.add(product);
        }
        tracing::info!(count = catalog.len(), "Preloaded sample products");
        catalog
    }

    /// Append a product and return its index
    pub fn add(&mut self, product: CatalogProduct) -> usize {
        self.products.push(product);
        self.products.len() - 1
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Products whose category matches, ignoring case
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a CatalogProduct> {
        self.products
            .iter()
            .filter(move |product| product.category.eq_ignore_ascii_case(category))
    }
}

fn demo_products() -> Vec<CatalogProduct> {
    [
        (
            "Regular Cotton T-shirt",
            "clothing",
            "Cotton t-shirt made in Bangladesh. Machine washable. 100% cotton.",
            15.99,
        ),
        (
            "Organic Cotton T-shirt",
            "clothing",
            "Organic cotton t-shirt made with renewable energy in a fair-trade certified facility. Made with 100% GOTS certified organic cotton. Low-impact dyes. Carbon-neutral shipping.",
            29.99,
        ),
        (
            "Recycled Polyester Jacket",
            "clothing",
            "Jacket made from 80% recycled plastic bottles. Water-resistant coating without PFCs. Designed for circularity with easily separable components for recycling at end of life.",
            89.99,
        ),
        (
            "Bamboo Toothbrush",
            "personal care",
            "Biodegradable bamboo toothbrush with plant-based bristles. Comes in recyclable paper packaging. Carbon-neutral shipping.",
            4.99,
        ),
        (
            "Plastic Bottled Water",
            "beverages",
            "Spring water in single-use plastic bottle. Purified and bottled at source.",
            1.99,
        ),
        (
            "Reusable Water Bottle",
            "beverages",
            "Stainless steel water bottle, BPA free, double-walled insulation. Keeps drinks cold for 24 hours or hot for 12 hours. Durable and recyclable.",
            24.99,
        ),
    ]
    .into_iter()
    .map(|(name, category, description, price)| CatalogProduct {
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        price,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog() {
        let catalog = ProductCatalog::with_demo_products();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.in_category("Clothing").count(), 3);
        assert_eq!(catalog.in_category("toys").count(), 0);
    }

    #[test]
    fn test_add_returns_index() {
        let mut catalog = ProductCatalog::new();
        assert_eq!(catalog.len(), 0);
        let index = catalog.add(CatalogProduct {
            name: "Hemp Tote".to_string(),
            category: "home".to_string(),
            description: "Hemp tote bag".to_string(),
            price: 12.0,
        });
        assert_eq!(index, 0);
        assert_eq!(catalog.in_category("HOME").count(), 1);
    }
}
