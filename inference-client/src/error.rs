//! Error taxonomy shared by both inference paths.

use std::fmt;
use thiserror::Error;

/// Input modality of a request. Selects the model, the prompt and the
/// wording of malformed-response errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Text,
    Image,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }

    /// How the backing model is referred to in user-facing errors.
    fn subject(self) -> &'static str {
        match self {
            Self::Text => "AI",
            Self::Image => "visual AI",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during an inference call
#[derive(Error, Debug)]
pub enum InferenceError {
    /// The input was rejected before any network call was made.
    #[error("{0}")]
    InvalidInputFormat(String),

    /// The HTTP call failed or the service answered with an error status.
    /// Carries the service's own message where one was provided.
    #[error("{0}")]
    NetworkOrServiceFailure(String),

    /// The call succeeded but its content is not a usable result.
    #[error("Invalid response from {}", .modality.subject())]
    MalformedResponse { modality: Modality, reason: String },
}

/// Field-free discriminant of [`InferenceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInputFormat,
    NetworkOrServiceFailure,
    MalformedResponse,
}

impl InferenceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInputFormat(_) => ErrorKind::InvalidInputFormat,
            Self::NetworkOrServiceFailure(_) => ErrorKind::NetworkOrServiceFailure,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
        }
    }

    pub(crate) fn malformed(modality: Modality, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            modality,
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        Self::NetworkOrServiceFailure(err.to_string())
    }
}
