use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use super::lenient;

/// Input accepted by the analysis orchestrator
#[derive(Debug, Clone)]
pub enum AnalysisInput {
    Description(String),
    Image(Vec<u8>),
}

/// A single analysis request. Built per request and never stored.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub input: AnalysisInput,
    /// Optional category hint supplied by the caller
    pub category: Option<String>,
    /// Ask the vision model to identify every product in the image
    pub detect_multiple: bool,
}

impl AnalysisRequest {
    pub fn description(description: impl Into<String>, category: Option<String>) -> Self {
        Self {
            input: AnalysisInput::Description(description.into()),
            category,
            detect_multiple: false,
        }
    }

    pub fn image(bytes: Vec<u8>, detect_multiple: bool) -> Self {
        Self {
            input: AnalysisInput::Image(bytes),
            category: None,
            detect_multiple,
        }
    }
}

/// Score in the closed range [0, 10]
///
/// The only way to obtain one is through [`SustainabilityScore::new`] (which clamps)
/// or by deserializing, which runs the score normalizer over whatever the model sent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SustainabilityScore(f64);

impl SustainabilityScore {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 10.0;
    pub const NEUTRAL: Self = Self(5.0);

    /// Clamp into range. Non-finite input yields the neutral score.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(Self::MIN, Self::MAX))
        } else {
            Self::NEUTRAL
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for SustainabilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

/// Fixed vocabulary of sustainability tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SustainabilityTag {
    EcoFriendly,
    Organic,
    Recyclable,
    Biodegradable,
    FairTrade,
    EnergyEfficient,
    PlasticFree,
    SingleUse,
    PlasticPackaging,
    HighCarbonFootprint,
}

impl SustainabilityTag {
    pub const ALL: [SustainabilityTag; 10] = [
        SustainabilityTag::EcoFriendly,
        SustainabilityTag::Organic,
        SustainabilityTag::Recyclable,
        SustainabilityTag::Biodegradable,
        SustainabilityTag::FairTrade,
        SustainabilityTag::EnergyEfficient,
        SustainabilityTag::PlasticFree,
        SustainabilityTag::SingleUse,
        SustainabilityTag::PlasticPackaging,
        SustainabilityTag::HighCarbonFootprint,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SustainabilityTag::EcoFriendly => "Eco-Friendly",
            SustainabilityTag::Organic => "Organic",
            SustainabilityTag::Recyclable => "Recyclable",
            SustainabilityTag::Biodegradable => "Biodegradable",
            SustainabilityTag::FairTrade => "Fair Trade",
            SustainabilityTag::EnergyEfficient => "Energy Efficient",
            SustainabilityTag::PlasticFree => "Plastic-Free",
            SustainabilityTag::SingleUse => "Single-Use",
            SustainabilityTag::PlasticPackaging => "Plastic Packaging",
            SustainabilityTag::HighCarbonFootprint => "High Carbon Footprint",
        }
    }
}

/// Tag name to flag. A missing tag reads as false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SustainabilityTags(BTreeMap<String, bool>);

impl SustainabilityTags {
    pub fn set(&mut self, tag: SustainabilityTag, value: bool) {
        self.0.insert(tag.label().to_string(), value);
    }

    pub fn get(&self, tag: SustainabilityTag) -> bool {
        self.0.get(tag.label()).copied().unwrap_or(false)
    }

    /// Labels of every tag set to true, in map order
    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, value)| **value)
            .map(|(name, _)| name.as_str())
    }
}

impl<'de> Deserialize<'de> for SustainabilityTags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self(lenient::flag_map(value)))
    }
}

/// Greenwashing risk, ordered Low < Medium < High
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    /// Accepts "high", "High risk", "MEDIUM", "moderate", ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower.starts_with("high") {
            Ok(RiskLevel::High)
        } else if lower.starts_with("medium") || lower.starts_with("moderate") {
            Ok(RiskLevel::Medium)
        } else if lower.starts_with("low") {
            Ok(RiskLevel::Low)
        } else {
            Err(format!("unknown risk level: {}", s))
        }
    }
}

/// Sustainability analysis of a free-text product description
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DescriptionAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials_sustainability: Option<SustainabilityScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturing_process: Option<SustainabilityScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbon_footprint: Option<SustainabilityScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recyclability: Option<SustainabilityScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_sustainability_score: Option<SustainabilityScore>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub improvement_opportunities: Vec<String>,
    #[serde(default)]
    pub sustainability_tags: SustainabilityTags,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub sustainability_justification: Option<String>,
}

/// Greenwashing assessment of a product description
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GreenwashingAssessment {
    #[serde(
        default,
        deserialize_with = "lenient::risk_level",
        skip_serializing_if = "Option::is_none"
    )]
    pub greenwashing_risk: Option<RiskLevel>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub issues: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub vague_claims: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub misleading_terms: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub missing_information: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub explanation: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub recommendations: Vec<String>,
}

/// What the vision model reports seeing
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ImageObservation {
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub visible_materials: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub visible_claims: Vec<String>,
}

/// Sustainability estimate derived from an image
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ImageSustainability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials_sustainability: Option<SustainabilityScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging_sustainability: Option<SustainabilityScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_sustainability_score: Option<SustainabilityScore>,
    #[serde(
        default,
        deserialize_with = "lenient::risk_level",
        skip_serializing_if = "Option::is_none"
    )]
    pub greenwashing_risk: Option<RiskLevel>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub improvement_suggestions: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub sustainability_justification: Option<String>,
}

/// Analysis of one product seen in an image
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ImageAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_analysis: Option<ImageObservation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability_analysis: Option<ImageSustainability>,
}

impl ImageAnalysis {
    pub fn product_name(&self) -> Option<&str> {
        self.image_analysis
            .as_ref()
            .and_then(|observation| observation.product_name.as_deref())
    }
}

/// Several products detected in one image
///
/// `product_count` always equals `products.len()`; both constructors and
/// deserialization go through [`MultiProductAnalysis::new`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(from = "RawMultiProductAnalysis")]
pub struct MultiProductAnalysis {
    multiple_products: bool,
    product_count: usize,
    products: Vec<ImageAnalysis>,
}

impl MultiProductAnalysis {
    pub fn new(products: Vec<ImageAnalysis>) -> Self {
        Self {
            multiple_products: true,
            product_count: products.len(),
            products,
        }
    }

    pub fn product_count(&self) -> usize {
        self.product_count
    }

    pub fn products(&self) -> &[ImageAnalysis] {
        &self.products
    }
}

#[derive(Deserialize)]
struct RawMultiProductAnalysis {
    #[serde(default)]
    products: Vec<ImageAnalysis>,
}

impl From<RawMultiProductAnalysis> for MultiProductAnalysis {
    fn from(raw: RawMultiProductAnalysis) -> Self {
        // The model's own product_count is not trusted
        Self::new(raw.products)
    }
}

/// Result of an image analysis request
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ImageAnalysisResult {
    Multiple(MultiProductAnalysis),
    Single(ImageAnalysis),
}

impl ImageAnalysisResult {
    /// The first product the analysis identified, if any
    pub fn primary(&self) -> Option<&ImageAnalysis> {
        match self {
            ImageAnalysisResult::Single(analysis) => Some(analysis),
            ImageAnalysisResult::Multiple(multi) => multi.products().first(),
        }
    }
}

/// Result of [`AnalysisRequest`] dispatch
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Description(DescriptionAnalysis),
    Image(ImageAnalysisResult),
}
