//! Client configuration, read from the environment at startup.

use std::fmt;
use tracing::warn;

use crate::error::Modality;

/// Default Gemini API host
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for name-based inference
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";

/// Multimodal model used for image-based inference
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Environment variables, in lookup order for the credential.
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "API_KEY";
pub const ENV_BASE_URL: &str = "GEMINI_BASE_URL";
pub const ENV_TEXT_MODEL: &str = "ORACLE_TEXT_MODEL";
pub const ENV_IMAGE_MODEL: &str = "ORACLE_IMAGE_MODEL";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API credential. May be empty; the service then rejects the call.
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
}

impl ClientConfig {
    /// Configuration with default endpoint and models.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    /// Creates the configuration from environment variables.
    ///
    /// Reads `GEMINI_API_KEY` (falling back to `API_KEY`), `GEMINI_BASE_URL`,
    /// `ORACLE_TEXT_MODEL` and `ORACLE_IMAGE_MODEL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(ENV_API_KEY)
            .or_else(|| non_empty(ENV_API_KEY_FALLBACK))
            .unwrap_or_default();
        if api_key.is_empty() {
            warn!("No API key found in {ENV_API_KEY} or {ENV_API_KEY_FALLBACK}; requests will be rejected by the service");
        }

        let mut config = Self::new(api_key);
        if let Some(base_url) = non_empty(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(model) = non_empty(ENV_TEXT_MODEL) {
            config.text_model = model;
        }
        if let Some(model) = non_empty(ENV_IMAGE_MODEL) {
            config.image_model = model;
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn model_for(&self, modality: Modality) -> &str {
        match modality {
            Modality::Text => &self.text_model,
            Modality::Image => &self.image_model,
        }
    }

    /// `generateContent` URL for a model.
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &if self.has_api_key() { "<set>" } else { "<unset>" })
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .finish()
    }
}
