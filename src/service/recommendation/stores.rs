//! Store search links for a product category

use crate::model::{Alternative, AlternativeProduct, Category};

use super::{query_component, scored};

/// Categories with their own store search templates; anything else is "general"
const KNOWN_CATEGORIES: &[&str] = &["clothing", "electronics", "toys", "home", "beauty", "food"];

const CATEGORY_ALTERNATIVE_COUNT: usize = 3;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Store {
    Amazon,
    Walmart,
    Target,
    BestBuy,
    Ebay,
    Etsy,
}

impl Store {
    /// Search order, mainstream retailers first
    const PRIORITY: [Store; 6] = [
        Store::Amazon,
        Store::Walmart,
        Store::Target,
        Store::BestBuy,
        Store::Ebay,
        Store::Etsy,
    ];

    fn display_name(self) -> &'static str {
        match self {
            Store::Amazon => "Amazon",
            Store::Walmart => "Walmart",
            Store::Target => "Target",
            Store::BestBuy => "Best Buy",
            Store::Ebay => "eBay",
            Store::Etsy => "Etsy",
        }
    }

    fn search_prefix(self) -> &'static str {
        match self {
            Store::Amazon => "https://www.amazon.com/s?k=",
            Store::Walmart => "https://www.walmart.com/search?q=",
            Store::Target => "https://www.target.com/s?searchTerm=",
            Store::BestBuy => "https://www.bestbuy.com/site/searchpage.jsp?st=",
            Store::Ebay => "https://www.ebay.com/sch/i.html?_nkw=",
            Store::Etsy => "https://www.etsy.com/search?q=",
        }
    }

    /// Search query for a category key, if the store covers it
    fn query(self, key: &str, category: &str) -> Option<String> {
        let query = match (self, key) {
            (Store::BestBuy, "electronics") => format!("energy+efficient+{}", category),
            (Store::BestBuy, "general") => format!("eco+friendly+{}", category),
            (Store::BestBuy, _) => return None,
            (Store::Ebay, "food") => return None,
            (Store::Etsy, "clothing" | "beauty") => format!("sustainable+{}+{}", category, key),
            (Store::Etsy, "home") => format!("eco+friendly+{}+home", category),
            (Store::Etsy, "general") => format!("sustainable+{}", category),
            (Store::Etsy, _) => return None,
            (_, "clothing" | "beauty") => format!("sustainable+{}+{}", category, key),
            (_, "food") => format!("organic+{}+food", category),
            (_, "general") => format!("eco+friendly+{}", category),
            (_, _) => format!("eco+friendly+{}+{}", category, key),
        };
        Some(format!("{}{}", self.search_prefix(), query))
    }

    fn description(self, category: &str) -> String {
        match self {
            Store::Etsy => format!(
                "Handmade eco-friendly {} options from small sustainable businesses on {}.",
                category,
                self.display_name()
            ),
            _ => format!(
                "Find eco-friendly and sustainable {} options available at {}. Many products feature recycled materials and sustainable manufacturing.",
                category,
                self.display_name()
            ),
        }
    }

    fn reasons(self) -> [&'static str; 3] {
        match self {
            Store::Amazon | Store::Walmart | Store::Target => [
                "Offers eco-friendly product filtering options",
                "Many products have sustainability certifications",
                "Multiple brands with eco-conscious manufacturing",
            ],
            Store::Etsy => [
                "Supports small eco-conscious businesses",
                "Handmade with care",
                "Unique sustainable designs",
            ],
            Store::BestBuy | Store::Ebay => [
                "Includes products with recycled materials",
                "Offers eco-friendly alternatives",
                "Energy-efficient options available",
            ],
        }
    }
}

fn earthhero_collection(key: &str) -> Option<&'static str> {
    match key {
        "clothing" => Some("https://earthhero.com/collections/apparel/"),
        "electronics" => Some("https://earthhero.com/collections/technology/"),
        "toys" => Some("https://earthhero.com/collections/kids/"),
        "general" => Some("https://earthhero.com/collections/all-products"),
        _ => None,
    }
}

/// Exactly three store search links for a category
pub fn category_alternatives(category: &str) -> Vec<Alternative> {
    let lower = category.trim().to_lowercase();
    let key = if KNOWN_CATEGORIES.contains(&lower.as_str()) {
        lower.as_str()
    } else {
        "general"
    };
    let query_term = query_component(&lower);
    let title = title_case(category.trim());

    let mut alternatives: Vec<Alternative> = Store::PRIORITY
        .iter()
        .filter_map(|store| store.query(key, &query_term).map(|url| (*store, url)))
        .take(CATEGORY_ALTERNATIVE_COUNT)
        .enumerate()
        .map(|(index, (store, url))| {
            scored(
                AlternativeProduct {
                    name: format!("Eco-Friendly {} on {}", title, store.display_name()),
                    description: store.description(category),
                    price: Some(24.99 + index as f64 * 5.0),
                    category: Some(category.to_string()),
                    url,
                    image_url: None,
                },
                Some(4),
                to_strings(&store.reasons()),
            )
        })
        .collect();

    if alternatives.len() < CATEGORY_ALTERNATIVE_COUNT
        && let Some(url) = earthhero_collection(key)
    {
        alternatives.push(scored(
            AlternativeProduct {
                name: format!("Eco-Friendly {} Collection on EarthHero", title),
                description: format!(
                    "Curated sustainable {} products made with recycled materials and eco-friendly manufacturing from EarthHero.",
                    category
                ),
                price: Some(29.99),
                category: Some(category.to_string()),
                url: url.to_string(),
                image_url: None,
            },
            Some(5),
            to_strings(&[
                "Made with recycled materials",
                "Eco-friendly manufacturing process",
                "Carbon-neutral shipping",
            ]),
        ));
    }

    while alternatives.len() < CATEGORY_ALTERNATIVE_COUNT {
        alternatives.push(scored(
            AlternativeProduct {
                name: format!("Sustainable {} Options", title),
                description: format!(
                    "Explore eco-friendly alternatives for {} with improved sustainability features from major retailers.",
                    category
                ),
                price: Some(19.99),
                category: Some(category.to_string()),
                url: format!("https://www.amazon.com/s?k=sustainable+{}", query_term),
                image_url: None,
            },
            Some(3),
            to_strings(&[
                "Lower environmental impact options",
                "Energy-efficient alternatives",
                "Products with recycled content",
            ]),
        ));
    }

    alternatives
}

/// Product categories offered for browsing
pub fn categories() -> Vec<Category> {
    [
        ("clothing", "Clothing & Apparel", "tshirt"),
        ("electronics", "Electronics", "laptop"),
        ("food", "Food & Beverages", "utensils"),
        ("home", "Home & Garden", "home"),
        ("beauty", "Beauty & Personal Care", "spa"),
        ("toys", "Toys & Games", "gamepad"),
        ("sports", "Sports & Outdoors", "basketball-ball"),
        ("automotive", "Automotive", "car"),
        ("office", "Office Supplies", "pencil-alt"),
        ("pet", "Pet Supplies", "paw"),
    ]
    .into_iter()
    .map(|(id, name, icon)| Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
    })
    .collect()
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
