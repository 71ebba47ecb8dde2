//! Image panel: `Empty -> Loaded -> Analyzing -> Success | Failed`.
//!
//! Unlike the name form, a failure shows the error's own message, falling
//! back to [`IMAGE_FAILURE_FALLBACK`] when it has none.

use inference_client::InferenceError;
use oracle_core::InferenceResult;
use tracing::{error, warn};

/// Message shown when a failure carries no text of its own
pub const IMAGE_FAILURE_FALLBACK: &str = "Failed to process image. Try a clearer photo.";

/// An image selected by the user, already encoded as a data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub file_name: String,
    pub byte_len: usize,
    pub data_url: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ImageViewState {
    #[default]
    Empty,
    Loaded,
    Analyzing,
    Success(InferenceResult),
    Failed(String),
}

/// Holds the selected image alongside the state. `image` is `None` only
/// while the state is `Empty`.
#[derive(Debug, Default)]
pub struct ImageView {
    image: Option<LoadedImage>,
    state: ImageViewState,
}

impl ImageView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn state(&self) -> &ImageViewState {
        &self.state
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.state, ImageViewState::Analyzing)
    }

    /// Select a new image, clearing any previous result or error.
    ///
    /// The picker is disabled during analysis, so this returns `false` and
    /// changes nothing while a request is in flight.
    pub fn load(&mut self, image: LoadedImage) -> bool {
        if self.is_analyzing() {
            return false;
        }
        self.image = Some(image);
        self.state = ImageViewState::Loaded;
        true
    }

    pub fn can_analyze(&self) -> bool {
        self.image.is_some() && !self.is_analyzing()
    }

    /// Start analysis and return the data URL to send, or `None` when the
    /// control is disabled.
    pub fn analyze(&mut self) -> Option<String> {
        if !self.can_analyze() {
            return None;
        }
        let data_url = self.image.as_ref()?.data_url.clone();
        self.state = ImageViewState::Analyzing;
        Some(data_url)
    }

    /// Deliver the outcome of the in-flight request.
    pub fn complete(&mut self, outcome: Result<InferenceResult, InferenceError>) {
        if !self.is_analyzing() {
            warn!("Image analysis result arrived with no request in flight; ignoring");
            return;
        }
        self.state = match outcome {
            Ok(result) => ImageViewState::Success(result),
            Err(e) => {
                error!(kind = ?e.kind(), error = %e, "Image analysis failed");
                let message = e.to_string();
                if message.trim().is_empty() {
                    ImageViewState::Failed(IMAGE_FAILURE_FALLBACK.to_string())
                } else {
                    ImageViewState::Failed(message)
                }
            }
        };
    }
}
