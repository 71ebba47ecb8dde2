//! Inference Client - hosted-model gender inference
//!
//! This crate turns a name or a data-URL image into a call against the
//! Gemini `generateContent` API and turns the reply back into an
//! [`InferenceResult`], or fails with an [`InferenceError`].
//!
//! # Failure taxonomy
//!
//! - `InvalidInputFormat`: rejected before any network call
//! - `NetworkOrServiceFailure`: transport error or error status from the service
//! - `MalformedResponse`: the call succeeded but the content is unusable
//!
//! # Example
//!
//! ```ignore
//! use inference_client::{GeminiClient, GenderInference};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = GeminiClient::from_env();
//!     let result = client.infer_from_text("Alex Rivera").await?;
//!
//!     println!("{} ({}%)", result.category, result.confidence_percent());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data_url;
pub mod error;
pub mod gemini;
pub mod inference;
pub mod metrics;
pub mod prompt;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use data_url::{encode_data_url, parse_data_url, DataUrl};
pub use error::{ErrorKind, InferenceError, Modality};
pub use gemini::GeminiClient;
pub use inference::{parse_inference_result, GenderInference};
pub use oracle_core::{GenderCategory, InferenceResult};
