//! Hand-picked eco-friendly products for common product kinds

use crate::model::{Alternative, AlternativeProduct};

use super::scored;

struct CuratedProduct {
    name: &'static str,
    description: &'static str,
    price: f64,
    url: &'static str,
    eco_features: [&'static str; 3],
}

const HOODIES: &[CuratedProduct] = &[
    CuratedProduct {
        name: "Organic Cotton Fleece Hoodie",
        description: "Made with 100% GOTS certified organic cotton, dyed with non-toxic dyes, and produced in a fair trade certified factory.",
        price: 69.99,
        url: "https://earthhero.com/products/fashion/tentree-cooper-classic-hoodie-women/",
        eco_features: [
            "Organic cotton reduces pesticide use",
            "Fair trade certified manufacturing",
            "Company plants 10 trees for every product sold",
        ],
    },
    CuratedProduct {
        name: "Recycled Polyester Blend Hoodie",
        description: "Made from post-consumer recycled plastic bottles converted into soft polyester fleece with low-impact dyes.",
        price: 58.00,
        url: "https://www.patagonia.com/product/mens-p-6-label-uprisal-hoody/39539.html",
        eco_features: [
            "Made from recycled plastic bottles",
            "Reduces virgin petroleum use",
            "Bluesign certified for environmental production standards",
        ],
    },
    CuratedProduct {
        name: "Hemp-Cotton Blend Pullover Hoodie",
        description: "Sustainable hemp-organic cotton blend hoodie, requiring significantly less water to produce than conventional cotton.",
        price: 74.50,
        url: "https://wama.com/collections/hemp-clothing",
        eco_features: [
            "Hemp requires minimal water and no pesticides",
            "Biodegradable natural fibers",
            "Carbon-neutral shipping",
        ],
    },
];

const T_SHIRTS: &[CuratedProduct] = &[
    CuratedProduct {
        name: "Organic Cotton Essential Tee",
        description: "Classic fit t-shirt made from 100% GOTS certified organic cotton, grown without synthetic pesticides or fertilizers.",
        price: 29.99,
        url: "https://www.pact.com/collections/men-tops",
        eco_features: [
            "Organic farming practices",
            "Fair trade certified factory",
            "Carbon-offset shipping",
        ],
    },
    CuratedProduct {
        name: "Bamboo Lyocell T-Shirt",
        description: "Ultra-soft t-shirt made from sustainable bamboo lyocell that uses a closed-loop process to transform bamboo into silky fabric.",
        price: 34.50,
        url: "https://www.wearpact.com/women/apparel/tops%20&%20shirts",
        eco_features: [
            "Bamboo grows quickly without pesticides",
            "Closed-loop manufacturing process conserves water",
            "Biodegradable fabric",
        ],
    },
    CuratedProduct {
        name: "Recycled Cotton Blend Tee",
        description: "Made from 60% recycled cotton from textile waste and 40% recycled polyester from plastic bottles.",
        price: 25.00,
        url: "https://www.threadbare.com/collections/organic-tshirts",
        eco_features: [
            "Diverts textile waste from landfills",
            "Low water manufacturing process",
            "Reduces new resource consumption",
        ],
    },
];

const BICYCLES: &[CuratedProduct] = &[
    CuratedProduct {
        name: "Eco-Friendly Bamboo Frame Bicycle",
        description: "Sustainable bamboo frame bicycle that's durable, lightweight, and has natural shock-absorbing properties.",
        price: 1899.00,
        url: "https://bamboobicycleclub.org/bamboo-bikes/",
        eco_features: [
            "Renewable bamboo material",
            "Lower carbon footprint than aluminum or steel frames",
            "Biodegradable frame at end of life",
        ],
    },
    CuratedProduct {
        name: "Recycled Aluminum Children's Bicycle",
        description: "Kid's bike made from recycled aluminum with non-toxic paint and recyclable components. Made to grow with your child.",
        price: 349.99,
        url: "https://www.rei.com/product/153304/co-op-cycles-rev-20-kids-bike",
        eco_features: [
            "Recycled aluminum frame reduces mining impact",
            "Designed to be passed down as children grow",
            "Recyclable at end of life",
        ],
    },
    CuratedProduct {
        name: "Eco Balance Bike for Toddlers",
        description: "Balance bike for young children made from FSC-certified sustainable wood with non-toxic finishes.",
        price: 129.00,
        url: "https://www.kinderkraft.com/products/uniq-natural",
        eco_features: [
            "FSC-certified sustainable wood",
            "Non-toxic, child-safe finishes",
            "Biodegradable materials",
        ],
    },
];

const ELECTRONICS: &[CuratedProduct] = &[
    CuratedProduct {
        name: "Solar-Powered Portable Charger",
        description: "Solar panel power bank for charging phones and small devices, made with recycled plastic casing.",
        price: 49.99,
        url: "https://us.anker.com/collections/solar",
        eco_features: [
            "Renewable solar energy",
            "Recycled plastics in construction",
            "Reduces reliance on grid electricity",
        ],
    },
    CuratedProduct {
        name: "Biodegradable Phone Case",
        description: "Fully compostable smartphone case made from plant-based materials that will break down naturally.",
        price: 35.00,
        url: "https://pela.earth/collections/pela-case",
        eco_features: [
            "100% compostable and biodegradable",
            "Made from plant-based biopolymers",
            "Zero-waste packaging",
        ],
    },
    CuratedProduct {
        name: "Fairphone 4 Ethical Smartphone",
        description: "Modular smartphone designed for easy repair and upgrade, using fair trade minerals and ethical labor practices.",
        price: 599.00,
        url: "https://shop.fairphone.com/en/",
        eco_features: [
            "Modular design for easy repair and longer life",
            "Fair trade supply chain",
            "Conflict-free minerals and metals",
        ],
    },
];

fn lookup(key: &str) -> Option<&'static [CuratedProduct]> {
    match key {
        "hoodie" => Some(HOODIES),
        "t-shirt" => Some(T_SHIRTS),
        "bicycle" => Some(BICYCLES),
        "electronics" => Some(ELECTRONICS),
        _ => None,
    }
}

/// Curated alternatives for the specific product, else for the product type
pub fn curated_alternatives(product_type: &str, specific_product: &str) -> Vec<Alternative> {
    lookup(specific_product)
        .or_else(|| lookup(product_type))
        .unwrap_or_default()
        .iter()
        .map(|curated| {
            scored(
                AlternativeProduct {
                    name: curated.name.to_string(),
                    description: curated.description.to_string(),
                    price: Some(curated.price),
                    category: None,
                    url: curated.url.to_string(),
                    image_url: None,
                },
                None,
                curated.eco_features.iter().map(|f| f.to_string()).collect(),
            )
        })
        .collect()
}
