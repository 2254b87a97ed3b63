//! Error types for the analysis service

use thiserror::Error;

use crate::service::extraction::ExtractionError;
use crate::service::image::ImageDecodeError;
use crate::service::llm::ModelError;

/// Errors surfaced to callers of the analysis service
///
/// Model transport failures and unparsable replies are not here: both are
/// recovered with a fallback analysis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    #[error("{0} model not available")]
    ModelUnavailable(&'static str),

    #[error("Error processing image: {0}")]
    ImageDecode(#[from] ImageDecodeError),
}

/// Why a model reply could not be used
#[derive(Debug, Error)]
pub(crate) enum ReplyError {
    #[error(transparent)]
    Transport(#[from] ModelError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("model reply listed no products")]
    NoProducts,
}
