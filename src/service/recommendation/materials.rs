//! Sustainable substitutes for raw materials

use std::collections::BTreeMap;

use crate::model::MaterialAlternative;

fn alternative(name: impl Into<String>, benefits: &str, considerations: &str) -> MaterialAlternative {
    MaterialAlternative {
        name: name.into(),
        benefits: benefits.to_string(),
        considerations: considerations.to_string(),
    }
}

/// Alternatives for each entry of a comma-separated material list
pub fn material_alternatives(materials: &str) -> BTreeMap<String, Vec<MaterialAlternative>> {
    materials
        .split(',')
        .map(str::trim)
        .filter(|material| !material.is_empty())
        .map(|material| (material.to_string(), alternatives_for(material)))
        .collect()
}

fn alternatives_for(material: &str) -> Vec<MaterialAlternative> {
    let lower = material.to_lowercase();

    if lower.contains("plastic") {
        vec![
            alternative(
                "Biodegradable plastic",
                "Breaks down naturally, reducing landfill waste",
                "May have shorter shelf life",
            ),
            alternative(
                "Recycled plastic",
                "Reduces virgin plastic consumption and waste",
                "May have quality limitations",
            ),
            alternative(
                "Bioplastics",
                "Made from renewable resources instead of fossil fuels",
                "Requires proper composting facilities",
            ),
        ]
    } else if lower.contains("cotton") {
        vec![
            alternative(
                "Organic cotton",
                "Grown without synthetic pesticides or fertilizers",
                "May be more expensive",
            ),
            alternative(
                "Recycled cotton",
                "Reduces water and energy use compared to virgin cotton",
                "May have shorter fibers",
            ),
            alternative(
                "Hemp",
                "Requires less water and no pesticides",
                "Different texture than cotton",
            ),
        ]
    } else if lower.contains("polyester") {
        vec![
            alternative(
                "Recycled polyester",
                "Made from recycled plastic bottles",
                "Still releases microplastics",
            ),
            alternative(
                "Lyocell/Tencel",
                "Biodegradable and made from sustainable wood pulp",
                "Different properties than polyester",
            ),
        ]
    } else {
        vec![
            alternative(
                format!("Recycled {}", material),
                "Reduces waste and resource consumption",
                "May require specialized suppliers",
            ),
            alternative(
                format!("Sustainable {} alternative", material),
                "Lower environmental impact",
                "May have different properties",
            ),
        ]
    }
}
