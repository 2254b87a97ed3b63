//! Instruction templates for the analysis model

/// Guidance shared by every prompt that asks for a greenwashing risk level
const GREENWASHING_GUIDELINES: &str = r#"IMPORTANT GREENWASHING ASSESSMENT GUIDELINES:
- "High" greenwashing risk: Products with multiple vague eco-claims (eco-friendly, green, natural) without specific details or verification
- "Medium" greenwashing risk: Products with some unsubstantiated claims or misleading terminology, but also some valid information
- "Low" greenwashing risk: Products with few or no eco-claims, or products with well-substantiated environmental claims
- Products using "eco-friendly," "green," or "natural" without specific details should NOT be rated "Low" risk
- Plastic products labeled as "eco-friendly" should be "Medium" or "High" risk
- Products making environmental claims without certifications should be at least "Medium" risk"#;

const JSON_ONLY: &str = "Format your response as a well-structured JSON object WITHOUT ANY ADDITIONAL TEXT. Do not include markdown formatting, code blocks, or any text outside the JSON structure.";

/// Build the sustainability analysis prompt for a product description
pub fn build_description_prompt(description: &str, category: Option<&str>) -> String {
    let category_line = category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| format!("\nPRODUCT CATEGORY (as given by the user): {}\n", c))
        .unwrap_or_default();

    format!(
        r#"Analyze this product description for sustainability and environmental impact:

PRODUCT DESCRIPTION:
{description}
{category_line}
Perform a comprehensive sustainability analysis and return a STRUCTURED JSON RESPONSE with the following fields:

1. materials_sustainability (float, 1-10): Score for the sustainability of materials
2. manufacturing_process (float, 1-10): Score for the manufacturing process sustainability
3. carbon_footprint (float, 1-10): Score for the product's carbon footprint (lower is better)
4. recyclability (float, 1-10): Score for how recyclable the product is
5. overall_sustainability_score (float, 1-10): Overall sustainability score
6. improvement_opportunities (array of strings): List specific ways this product could be more sustainable
7. sustainability_tags (object): Boolean fields for the tags "Eco-Friendly", "Organic", "Recyclable", "Biodegradable", "Fair Trade", "Energy Efficient", "Plastic-Free", "Single-Use", "Plastic Packaging", "High Carbon Footprint"
8. sustainability_justification (string): Brief paragraph explaining the sustainability assessment

{JSON_ONLY}"#
    )
}

/// Build the greenwashing analysis prompt for a product description
pub fn build_greenwashing_prompt(description: &str) -> String {
    format!(
        r#"Analyze this product description for potential greenwashing:

PRODUCT DESCRIPTION:
{description}

Greenwashing is the practice of making misleading or unsubstantiated claims about the environmental benefits of a product.

{GREENWASHING_GUIDELINES}

Be critical and skeptical in your assessment. The default for products making environmental claims should be "Medium" risk unless they provide specific, verifiable evidence.

Return a detailed analysis in JSON format with these fields:

1. greenwashing_risk (string): "Low", "Medium", or "High" risk of greenwashing, following the guidelines above
2. issues (array of strings): Specific potential greenwashing issues identified, if any
3. vague_claims (array of strings): Any vague or unsubstantiated environmental claims
4. misleading_terms (array of strings): Any potentially misleading terms
5. missing_information (array of strings): Critical sustainability information that's missing
6. explanation (string): Detailed explanation of the greenwashing assessment
7. recommendations (array of strings): How the product description could be improved for transparency

{JSON_ONLY}"#
    )
}

/// Build the vision prompt for a single product
pub fn build_image_prompt() -> String {
    format!(
        r#"Analyze this product image and provide:

1. What the product appears to be
2. A detailed description of what you observe
3. Any visible materials, packaging, or labeling
4. Any sustainability or eco-friendly claims visible

Then analyze the product's likely sustainability impact based on what's visible.

{GREENWASHING_GUIDELINES}

Be skeptical and critical in your assessment. Apply a higher standard of evidence for sustainability claims.

Return the results as a STRUCTURED JSON with the following fields:

1. image_analysis: {{
   product_name: what the product appears to be,
   description: detailed description of the product,
   visible_materials: list of materials you can identify,
   visible_claims: any eco-friendly or sustainability claims visible
}}

2. sustainability_analysis: {{
   materials_sustainability (float, 1-10): Estimated score for sustainability of visible materials,
   packaging_sustainability (float, 1-10): Score for visible packaging sustainability,
   greenwashing_risk (string): "Low", "Medium", or "High", following the guidelines above,
   improvement_suggestions: array of realistic sustainability improvements,
   overall_sustainability_score (float, 1-10): Overall sustainability estimate,
   sustainability_justification: Brief justification for the assessment
}}

{JSON_ONLY}"#
    )
}

/// Build the vision prompt that asks for every distinct product in the image
pub fn build_multi_product_prompt() -> String {
    format!(
        r#"Analyze this image for multiple products and perform a sustainability analysis.

First, identify all distinct products visible in the image. For each identified product, provide:

1. What the product appears to be (name)
2. A detailed description of what you observe
3. Any visible materials, packaging, or labeling
4. Any sustainability or eco-friendly claims visible

Then analyze each product's likely sustainability impact based on what's visible.

{GREENWASHING_GUIDELINES}

Be skeptical and critical in your assessment. Apply a higher standard of evidence for sustainability claims.

Return the results as a STRUCTURED JSON with the following format:

{{
    "multiple_products": true,
    "product_count": number of distinct products identified,
    "products": [
        {{
            "image_analysis": {{
                "product_name": what this product appears to be,
                "description": detailed description of this product,
                "visible_materials": list of materials you can identify for this product,
                "visible_claims": any eco-friendly or sustainability claims visible for this product
            }},
            "sustainability_analysis": {{
                "materials_sustainability": estimated score (1-10) for sustainability of visible materials,
                "packaging_sustainability": score (1-10) for visible packaging sustainability,
                "greenwashing_risk": "Low", "Medium", or "High", following the guidelines above,
                "improvement_suggestions": array of realistic sustainability improvements,
                "overall_sustainability_score": overall sustainability estimate (1-10),
                "sustainability_justification": brief justification for the assessment
            }}
        }}
    ]
}}

If only one product is clearly visible, still use the same format with a single entry in "products".
{JSON_ONLY}"#
    )
}

/// Build the text-only prompt used when the vision call fails
pub fn build_image_description_prompt(image_description: &str) -> String {
    format!(
        r#"Analyze this product (image description provided) for sustainability:

IMAGE DESCRIPTION:
{image_description}

The actual image is not available. Provide a general sustainability assessment for what might be in this product category.

Return the results as a STRUCTURED JSON with the following fields:

1. image_analysis: {{ product_name, description, visible_materials, visible_claims }}
2. sustainability_analysis: {{ materials_sustainability (1-10), packaging_sustainability (1-10), greenwashing_risk ("Low", "Medium" or "High"), improvement_suggestions, overall_sustainability_score (1-10), sustainability_justification }}

{JSON_ONLY}"#
    )
}
