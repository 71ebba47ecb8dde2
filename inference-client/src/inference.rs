//! The inference seam used by the views.

use async_trait::async_trait;
use oracle_core::InferenceResult;
use tracing::error;

use crate::error::{InferenceError, Modality};

/// Gender inference from a name or an image.
///
/// Both operations share one output contract: a fully populated
/// [`InferenceResult`] or an [`InferenceError`], never a partial result.
#[async_trait]
pub trait GenderInference: Send + Sync {
    /// Classify a non-blank name.
    async fn infer_from_text(&self, name: &str) -> Result<InferenceResult, InferenceError>;

    /// Classify the person in a `data:<mime>;base64,<payload>` image.
    async fn infer_from_image(&self, image_data: &str) -> Result<InferenceResult, InferenceError>;
}

/// Parse and validate model output text.
pub fn parse_inference_result(
    text: &str,
    modality: Modality,
) -> Result<InferenceResult, InferenceError> {
    serde_json::from_str::<InferenceResult>(text.trim()).map_err(|e| {
        error!(modality = %modality, error = %e, "Failed to parse inference response");
        InferenceError::malformed(modality, e.to_string())
    })
}
