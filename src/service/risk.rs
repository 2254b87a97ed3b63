//! Greenwashing risk assessment
//!
//! Keyword signals are counted once per description and a fixed rule list
//! maps them to a [`RiskLevel`]. Rules are evaluated top to bottom and the
//! first match wins; later rules are broader and must not override an
//! earlier High.
//!
//! This is the single source of risk levels for the greenwashing fallback
//! and for the per-level guidance attached to the image fallback.

use crate::model::RiskLevel;

/// Eco-terms that say nothing verifiable on their own
pub const VAGUE_TERMS: &[&str] = &[
    "eco-friendly",
    "green",
    "natural",
    "sustainable",
    "earth-friendly",
    "environmentally friendly",
    "eco",
    "clean",
    "pure",
    "chemical-free",
];

/// Claims specific enough to be checked
pub const SPECIFIC_TERMS: &[&str] = &[
    "recycled content",
    "biodegradable",
    "organic certified",
    "carbon neutral",
    "fair trade certified",
    "energy star certified",
    "fsc certified",
    "rainforest alliance",
    "ecolabel",
    "cradle-to-cradle",
];

pub const PROBLEMATIC_MATERIALS: &[&str] = &[
    "plastic",
    "polyester",
    "synthetic",
    "petroleum",
    "chemical",
    "disposable",
    "single-use",
    "non-renewable",
];

pub const CERTIFICATION_WORDS: &[&str] = &[
    "certified",
    "certification",
    "verified",
    "label",
    "standard",
    "iso",
];

const ECO_CLAIM_WORDS: &[&str] = &["eco", "environment", "planet", "green", "sustain"];
const APPAREL_WORDS: &[&str] = &["fashion", "clothing", "apparel", "wear"];
const CLEANING_WORDS: &[&str] = &["clean", "cleaner", "detergent", "soap"];
const PACKAGED_FOOD_WORDS: &[&str] = &["packaged", "food", "snack"];

/// Keyword counts and product-category flags derived from a description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskSignals {
    /// Lowercased description the signals were computed from
    pub text: String,
    pub vague: usize,
    pub specific: usize,
    pub problematic: usize,
    pub certification: usize,
    pub is_apparel: bool,
    pub is_cleaning_product: bool,
    pub is_packaged_food: bool,
    /// Mentions plastic without saying it is plastic-free
    pub is_plastic_item: bool,
    pub has_eco_claims: bool,
}

impl RiskSignals {
    pub fn from_description(description: &str) -> Self {
        let text = description.to_lowercase();

        let is_plastic_item = text.contains("plastic")
            && !(text.contains("plastic-free") || text.contains("no plastic"));

        Self {
            vague: count_matches(&text, VAGUE_TERMS),
            specific: count_matches(&text, SPECIFIC_TERMS),
            problematic: count_matches(&text, PROBLEMATIC_MATERIALS),
            certification: count_matches(&text, CERTIFICATION_WORDS),
            is_apparel: contains_any(&text, APPAREL_WORDS),
            is_cleaning_product: contains_any(&text, CLEANING_WORDS),
            is_packaged_food: contains_any(&text, PACKAGED_FOOD_WORDS),
            is_plastic_item,
            has_eco_claims: contains_any(&text, ECO_CLAIM_WORDS),
            text,
        }
    }

    pub fn mentions(&self, term: &str) -> bool {
        self.text.contains(term)
    }

    /// Vague terms found in the description, in vocabulary order
    pub fn vague_claims(&self) -> Vec<String> {
        VAGUE_TERMS
            .iter()
            .filter(|term| self.text.contains(*term))
            .map(|term| term.to_string())
            .collect()
    }
}

/// Outcome of [`assess_risk`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Which rule decided the level
    pub rationale: &'static str,
    pub signals: RiskSignals,
}

pub fn assess_risk(description: &str) -> RiskAssessment {
    let signals = RiskSignals::from_description(description);
    let (level, rationale) = classify(&signals);

    tracing::debug!(
        level = %level,
        vague = signals.vague,
        specific = signals.specific,
        problematic = signals.problematic,
        certification = signals.certification,
        "Assessed greenwashing risk"
    );

    RiskAssessment {
        level,
        rationale,
        signals,
    }
}

fn classify(s: &RiskSignals) -> (RiskLevel, &'static str) {
    if s.vague >= 2 && s.specific == 0 {
        return (
            RiskLevel::High,
            "multiple vague eco-claims without specific substantiation",
        );
    }
    if s.vague > 0 && s.problematic >= 2 && s.certification == 0 {
        return (
            RiskLevel::High,
            "eco-claims on problematic materials without certification",
        );
    }
    if s.mentions("chemical-free") {
        return (RiskLevel::High, "claims to be chemical-free");
    }
    if s.is_plastic_item && s.mentions("eco-friendly") && s.certification == 0 {
        return (
            RiskLevel::High,
            "plastic item described as eco-friendly without certification",
        );
    }
    if s.is_apparel && s.mentions("sustainable") && s.specific == 0 {
        return (
            RiskLevel::High,
            "apparel described as sustainable without specifics",
        );
    }

    if s.vague > 0 {
        return (RiskLevel::Medium, "vague eco-terminology present");
    }
    if s.problematic > 0 && VAGUE_TERMS.iter().any(|term| s.mentions(term)) {
        return (
            RiskLevel::Medium,
            "problematic materials alongside eco-terminology",
        );
    }
    if s.is_cleaning_product && s.mentions("natural") && s.certification == 0 {
        return (
            RiskLevel::Medium,
            "cleaning product labelled natural without certification",
        );
    }
    if s.is_packaged_food && s.mentions("green") {
        return (RiskLevel::Medium, "packaged food using green terminology");
    }

    if s.has_eco_claims && s.specific == 0 && s.certification == 0 {
        return (
            RiskLevel::Medium,
            "unsubstantiated environmental claims",
        );
    }

    (
        RiskLevel::Low,
        "few eco-claims, or claims backed by specific evidence",
    )
}

/// Assessment text shown when no model analysis is available
pub fn level_guidance(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => {
            "Product appears to make environmental claims without clear verification or certification. Many products use vague eco-friendly terminology without substantiating their claims with specific metrics or third-party verification."
        }
        RiskLevel::Medium => {
            "Product may contain some environmentally focused aspects, but without specific certifications or precise metrics to validate claims. More transparent labeling would improve sustainability assessment."
        }
        RiskLevel::Low => {
            "Product doesn't appear to make explicit environmental claims, or those claims are supported with specific evidence. Without clear visibility of the product materials and packaging, a preliminary assessment gives an average sustainability score."
        }
    }
}

/// Improvement suggestions for a risk level, most general first
pub fn level_suggestions(level: RiskLevel) -> Vec<String> {
    let mut suggestions = vec!["Consider more transparent sustainability labeling"];
    if level != RiskLevel::Low {
        suggestions.push("Obtain third-party certifications for environmental claims");
        suggestions.push("Provide specific metrics rather than vague eco-terminology");
    }
    suggestions.push("Use easily recyclable packaging materials");
    suggestions.push("Provide more information about material sourcing");

    suggestions.into_iter().map(String::from).collect()
}

fn count_matches(text: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|term| text.contains(*term)).count()
}

fn contains_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text.contains(term))
}
