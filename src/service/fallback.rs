//! Keyword-driven stand-ins for model analyses
//!
//! Used when the model call fails or its reply cannot be parsed. Results
//! have the same shape as a model analysis so callers cannot tell the two
//! apart.

use rand::Rng;

use crate::model::{
    DescriptionAnalysis, GreenwashingAssessment, ImageAnalysis, ImageObservation,
    ImageSustainability, MultiProductAnalysis, RiskLevel, SustainabilityScore, SustainabilityTag,
    SustainabilityTags,
};
use crate::service::risk::{self, VAGUE_TERMS};

const POSITIVE_KEYWORDS: &[&str] = &[
    "organic",
    "recycled",
    "sustainable",
    "eco-friendly",
    "biodegradable",
    "fair trade",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "plastic",
    "single-use",
    "non-recyclable",
    "chemical",
    "synthetic",
];

const JITTER: f64 = 1.0;
const MIN_FALLBACK_SCORE: f64 = 1.0;
const MAX_FALLBACK_SCORE: f64 = 9.0;

const DESCRIPTION_JUSTIFICATION: &str = "This is a preliminary assessment based on the provided description. A more detailed analysis would require information about specific materials, manufacturing processes, and supply chain practices.";

const IMAGE_PLACEHOLDER_DESCRIPTION: &str = "The image appears to show a product. For detailed analysis, please try again or provide a clearer image.";

/// Risk reported by the image stub. No classification happens without a usable reply.
const IMAGE_FALLBACK_RISK: RiskLevel = RiskLevel::Medium;

pub const NO_VAGUE_CLAIMS: &str = "No specific vague claims detected";
pub const NO_MISLEADING_TERMS: &str = "None detected";

/// Keyword hit counts behind the description fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordBalance {
    pub positive: usize,
    pub negative: usize,
}

impl KeywordBalance {
    pub fn from_description(lower: &str) -> Self {
        Self {
            positive: POSITIVE_KEYWORDS
                .iter()
                .filter(|k| lower.contains(*k))
                .count(),
            negative: NEGATIVE_KEYWORDS
                .iter()
                .filter(|k| lower.contains(*k))
                .count(),
        }
    }

    /// Score before jitter, in [1, 9]
    pub fn base_score(self) -> f64 {
        let base = 5 + self.positive.min(4) as i64 - self.negative.min(4) as i64;
        (base as f64).clamp(MIN_FALLBACK_SCORE, MAX_FALLBACK_SCORE)
    }
}

/// Description analysis from keyword matches with jittered scores
///
/// Sub-scores vary between calls; only the base band is reproducible.
pub fn description_fallback<R: Rng>(description: &str, rng: &mut R) -> DescriptionAnalysis {
    let lower = description.to_lowercase();
    let balance = KeywordBalance::from_description(&lower);
    let base = balance.base_score();

    let mut jittered = || {
        (base + rng.random_range(-JITTER..=JITTER)).clamp(MIN_FALLBACK_SCORE, MAX_FALLBACK_SCORE)
    };
    let materials = jittered();
    let manufacturing = jittered();
    let carbon = jittered();
    let recyclability = jittered();
    let overall = round_half((materials + manufacturing + carbon + recyclability) / 4.0);

    let tags = fallback_tags(&lower, &balance);
    let improvements = improvement_opportunities(&tags, overall);

    DescriptionAnalysis {
        materials_sustainability: Some(SustainabilityScore::new(round_half(materials))),
        manufacturing_process: Some(SustainabilityScore::new(round_half(manufacturing))),
        carbon_footprint: Some(SustainabilityScore::new(round_half(carbon))),
        recyclability: Some(SustainabilityScore::new(round_half(recyclability))),
        overall_sustainability_score: Some(SustainabilityScore::new(overall)),
        improvement_opportunities: improvements,
        sustainability_tags: tags,
        sustainability_justification: Some(DESCRIPTION_JUSTIFICATION.to_string()),
    }
}

fn fallback_tags(lower: &str, balance: &KeywordBalance) -> SustainabilityTags {
    let has = |term: &str| lower.contains(term);

    let mut tags = SustainabilityTags::default();
    for tag in SustainabilityTag::ALL {
        let value = match tag {
            SustainabilityTag::EcoFriendly => balance.positive > 1,
            SustainabilityTag::Organic => has("organic"),
            SustainabilityTag::Recyclable => has("recycl"),
            SustainabilityTag::Biodegradable => has("biodegrad"),
            SustainabilityTag::FairTrade => has("fair trade"),
            SustainabilityTag::EnergyEfficient => has("energy") && has("efficien"),
            SustainabilityTag::PlasticFree => has("plastic-free"),
            SustainabilityTag::SingleUse => has("single") && has("use"),
            SustainabilityTag::PlasticPackaging => has("plastic") && has("packag"),
            SustainabilityTag::HighCarbonFootprint => has("carbon") && balance.negative > 1,
        };
        tags.set(tag, value);
    }
    tags
}

fn improvement_opportunities(tags: &SustainabilityTags, overall: f64) -> Vec<String> {
    let rules: [(bool, &str); 5] = [
        (
            !tags.get(SustainabilityTag::Recyclable),
            "Use recyclable materials",
        ),
        (
            tags.get(SustainabilityTag::PlasticPackaging),
            "Replace plastic packaging with biodegradable alternatives",
        ),
        (
            tags.get(SustainabilityTag::SingleUse),
            "Redesign for reusability instead of single-use",
        ),
        (
            !tags.get(SustainabilityTag::EcoFriendly),
            "Source materials from sustainable suppliers",
        ),
        (overall < 7.0, "Implement carbon offset program"),
    ];

    let improvements: Vec<String> = rules
        .into_iter()
        .filter(|(fires, _)| *fires)
        .map(|(_, suggestion)| suggestion.to_string())
        .collect();

    if improvements.is_empty() {
        vec![
            "Further improve material sourcing transparency".to_string(),
            "Consider a take-back program for end-of-life recycling".to_string(),
            "Reduce packaging volume".to_string(),
        ]
    } else {
        improvements
    }
}

/// Last-resort placeholder for an image the model could not describe
pub fn image_fallback() -> ImageAnalysis {
    let neutral = Some(SustainabilityScore::NEUTRAL);

    ImageAnalysis {
        image_analysis: Some(ImageObservation {
            product_name: Some("Product".to_string()),
            description: Some(IMAGE_PLACEHOLDER_DESCRIPTION.to_string()),
            visible_materials: vec!["Unable to determine from image".to_string()],
            visible_claims: vec!["No claims detected".to_string()],
        }),
        sustainability_analysis: Some(ImageSustainability {
            materials_sustainability: neutral,
            packaging_sustainability: neutral,
            overall_sustainability_score: neutral,
            greenwashing_risk: Some(IMAGE_FALLBACK_RISK),
            improvement_suggestions: risk::level_suggestions(IMAGE_FALLBACK_RISK),
            sustainability_justification: Some(
                risk::level_guidance(IMAGE_FALLBACK_RISK).to_string(),
            ),
        }),
    }
}

/// The image placeholder as a one-product multi-product result
pub fn multi_product_fallback() -> MultiProductAnalysis {
    MultiProductAnalysis::new(vec![image_fallback()])
}

/// Greenwashing assessment from the shared risk rules
pub fn greenwashing_fallback(description: &str) -> GreenwashingAssessment {
    let assessment = risk::assess_risk(description);
    let level = assessment.level;
    let s = &assessment.signals;

    let matched = s.vague_claims();
    let misleading_terms = if matched.is_empty() {
        vec![NO_MISLEADING_TERMS.to_string()]
    } else {
        matched.iter().take(2).cloned().collect()
    };
    let vague_claims = if matched.is_empty() {
        vec![NO_VAGUE_CLAIMS.to_string()]
    } else {
        matched
    };

    let mut issues = Vec::new();
    if s.vague > 0 && s.specific == 0 {
        issues.push("Uses vague environmental claims without specific substantiation");
    }
    if s.mentions("natural") {
        issues.push(
            "Uses 'natural' labeling which can be misleading (many harmful substances are also natural)",
        );
    }
    if s.mentions("green") && s.specific == 0 {
        issues.push("Uses 'green' terminology without specific environmental benefits");
    }
    if s.mentions("chemical-free") {
        issues.push(
            "Claims to be 'chemical-free' which is scientifically impossible as all products are made of chemicals",
        );
    }
    if s.is_plastic_item && VAGUE_TERMS.iter().any(|term| s.mentions(term)) {
        issues.push(
            "Describes plastic product with eco-terminology despite plastic's environmental impact",
        );
    }
    if s.problematic > 0 && s.mentions("eco-friendly") {
        issues.push("Claims to be eco-friendly while containing environmentally problematic materials");
    }
    if issues.is_empty() && level != RiskLevel::Low {
        issues.push("Insufficient specific environmental information to back marketing claims");
    }

    let mut missing_information = Vec::new();
    if s.certification == 0 && s.has_eco_claims {
        missing_information.push("Third-party sustainability certifications");
    }
    if s.is_plastic_item {
        missing_information.push("Specific percentage of recycled content in plastic");
    }
    if s.mentions("biodegradable") {
        missing_information.push("Specific biodegradability standards and timeframes");
    }
    if s.mentions("sustainable") {
        missing_information.push("Specific sustainability metrics and comparisons");
    }
    if missing_information.is_empty() {
        missing_information = vec![
            "Specific percentage of recycled content",
            "Third-party certifications",
            "Quantifiable environmental impact data",
        ];
    }

    let mut recommendations = Vec::new();
    if s.vague > 0 {
        recommendations.push("Replace vague eco-terms with specific, measurable claims");
    }
    if s.specific == 0 {
        recommendations.push("Add quantifiable data about environmental benefits");
    }
    if s.certification == 0 {
        recommendations
            .push("Include certification information from recognized environmental standards");
    }
    if s.is_plastic_item {
        recommendations.push(
            "Provide specific information about plastic type, recycled content percentage, and end-of-life options",
        );
    }

    let explanation = match level {
        RiskLevel::High => format!(
            "The product description uses {} vague environmental claims with little to no substantiating evidence. This pattern is characteristic of high-risk greenwashing, where marketing emphasizes environmental benefits without sufficient specific evidence.",
            s.vague
        ),
        RiskLevel::Medium => format!(
            "The product makes some environmental claims but lacks complete substantiation. While some specific information is provided, there are {} vague terms that could potentially mislead consumers without additional context.",
            s.vague
        ),
        RiskLevel::Low => "The product description contains minimal environmental claims, or those claims are well-substantiated with specific metrics and certifications.".to_string(),
    };

    GreenwashingAssessment {
        greenwashing_risk: Some(level),
        issues: to_strings(issues),
        vague_claims,
        misleading_terms,
        missing_information: to_strings(missing_information),
        explanation: Some(explanation),
        recommendations: to_strings(recommendations),
    }
}

fn round_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

fn to_strings(items: Vec<&str>) -> Vec<String> {
    items.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scores(analysis: &DescriptionAnalysis) -> [f64; 4] {
        [
            analysis.materials_sustainability,
            analysis.manufacturing_process,
            analysis.carbon_footprint,
            analysis.recyclability,
        ]
        .map(|score| score.map(SustainabilityScore::value).unwrap_or(f64::NAN))
    }

    #[test]
    fn test_base_score_bounds() {
        let high = KeywordBalance::from_description("organic, recycled, sustainable, fair trade");
        assert_eq!(high.positive, 4);
        assert_eq!(high.negative, 0);
        assert_eq!(high.base_score(), 9.0);

        let low = KeywordBalance::from_description("plastic, single-use, chemical, synthetic");
        assert_eq!(low.positive, 0);
        assert_eq!(low.negative, 4);
        assert_eq!(low.base_score(), 1.0);

        assert_eq!(KeywordBalance::from_description("a chair").base_score(), 5.0);
    }

    #[test]
    fn test_jittered_scores_stay_in_band() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let analysis =
                description_fallback("Organic, recycled, sustainable, fair trade", &mut rng);
            for score in scores(&analysis) {
                assert!((8.0..=9.0).contains(&score), "seed {}: {}", seed, score);
                assert_eq!(score * 2.0, (score * 2.0).round());
            }
            let overall = analysis.overall_sustainability_score.unwrap().value();
            assert!((8.0..=9.0).contains(&overall));

            let mut rng = StdRng::seed_from_u64(seed);
            let analysis =
                description_fallback("plastic, single-use, chemical, synthetic", &mut rng);
            for score in scores(&analysis) {
                assert!((1.0..=2.0).contains(&score), "seed {}: {}", seed, score);
            }
        }
    }

    #[test]
    fn test_seeded_fallback_is_reproducible() {
        let a = description_fallback("bamboo toothbrush", &mut StdRng::seed_from_u64(7));
        let b = description_fallback("bamboo toothbrush", &mut StdRng::seed_from_u64(7));
        assert_eq!(scores(&a), scores(&b));
    }

    #[test]
    fn test_fallback_populates_every_score() {
        let analysis = description_fallback("", &mut StdRng::seed_from_u64(1));
        assert!(scores(&analysis).iter().all(|s| s.is_finite()));
        assert!(analysis.overall_sustainability_score.is_some());
        let tags = serde_json::to_value(&analysis.sustainability_tags).unwrap();
        assert_eq!(
            tags.as_object().map(|m| m.len()),
            Some(SustainabilityTag::ALL.len())
        );
        assert!(analysis.sustainability_justification.is_some());
    }

    #[test]
    fn test_fallback_tags_and_improvements() {
        let analysis = description_fallback(
            "Single use plastic packaging with carbon heavy synthetic chemical coating",
            &mut StdRng::seed_from_u64(3),
        );
        let tags = &analysis.sustainability_tags;
        assert!(tags.get(SustainabilityTag::PlasticPackaging));
        assert!(tags.get(SustainabilityTag::SingleUse));
        assert!(tags.get(SustainabilityTag::HighCarbonFootprint));
        assert!(!tags.get(SustainabilityTag::Recyclable));

        assert_eq!(
            analysis.improvement_opportunities,
            vec![
                "Use recyclable materials",
                "Replace plastic packaging with biodegradable alternatives",
                "Redesign for reusability instead of single-use",
                "Source materials from sustainable suppliers",
                "Implement carbon offset program",
            ]
        );
    }

    #[test]
    fn test_generic_improvements_when_no_rule_fires() {
        let mut tags = SustainabilityTags::default();
        tags.set(SustainabilityTag::Recyclable, true);
        tags.set(SustainabilityTag::EcoFriendly, true);
        let improvements = improvement_opportunities(&tags, 8.5);
        assert_eq!(improvements.len(), 3);
        assert_eq!(improvements[2], "Reduce packaging volume");
    }

    #[test]
    fn test_image_fallback_is_placeholder() {
        let stub = image_fallback();
        assert_eq!(stub.product_name(), Some("Product"));
        let sustainability = stub.sustainability_analysis.unwrap();
        assert_eq!(sustainability.greenwashing_risk, Some(RiskLevel::Medium));
        assert_eq!(
            sustainability.overall_sustainability_score,
            Some(SustainabilityScore::NEUTRAL)
        );
        assert_eq!(sustainability.improvement_suggestions.len(), 5);
    }

    #[test]
    fn test_multi_product_fallback_count_matches() {
        let multi = multi_product_fallback();
        assert_eq!(multi.product_count(), multi.products().len());
        assert_eq!(multi.product_count(), 1);
    }

    #[test]
    fn test_greenwashing_fallback_vague_description() {
        let result = greenwashing_fallback("Eco-friendly plastic bottle, green and natural");
        assert_eq!(result.greenwashing_risk, Some(RiskLevel::High));
        assert_eq!(
            result.vague_claims,
            vec!["eco-friendly", "green", "natural", "eco"]
        );
        assert_eq!(result.misleading_terms, vec!["eco-friendly", "green"]);
        assert!(
            result
                .issues
                .iter()
                .any(|issue| issue.starts_with("Describes plastic product"))
        );
        assert_eq!(
            result.missing_information[..2],
            [
                "Third-party sustainability certifications",
                "Specific percentage of recycled content in plastic"
            ]
        );
        assert!(result.explanation.unwrap().contains("uses 4 vague"));
    }

    #[test]
    fn test_greenwashing_fallback_plain_description() {
        let result = greenwashing_fallback("A cast iron pan");
        assert_eq!(result.greenwashing_risk, Some(RiskLevel::Low));
        assert_eq!(result.vague_claims, vec![NO_VAGUE_CLAIMS]);
        assert_eq!(result.misleading_terms, vec![NO_MISLEADING_TERMS]);
        assert!(result.issues.is_empty());
        assert_eq!(result.missing_information.len(), 3);
        assert_eq!(
            result.recommendations,
            vec![
                "Add quantifiable data about environmental benefits",
                "Include certification information from recognized environmental standards",
            ]
        );
    }
}
