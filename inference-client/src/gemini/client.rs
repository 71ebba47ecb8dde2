//! Gemini-backed implementation of [`GenderInference`].
//!
//! Each call is a single `generateContent` POST with a structured-output
//! schema. There is no retry and no timeout; failures go straight back to
//! the caller.

use async_trait::async_trait;
use oracle_core::InferenceResult;
use reqwest::StatusCode;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::payload::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse, Part};
use crate::config::ClientConfig;
use crate::data_url::parse_data_url;
use crate::error::{InferenceError, Modality};
use crate::inference::{parse_inference_result, GenderInference};
use crate::metrics;
use crate::prompt::{response_schema, text_prompt, IMAGE_PROMPT};

/// Header carrying the API credential
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Message for a blank name
pub const EMPTY_NAME: &str = "Name must not be empty.";

/// Client for the hosted Gemini models
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl GeminiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Build a client from `GEMINI_*` / `ORACLE_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    /// Use a preconfigured `reqwest::Client` (proxies, custom TLS).
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one request and turn the reply into a validated result.
    async fn generate(
        &self,
        modality: Modality,
        request: &GenerateContentRequest,
    ) -> Result<InferenceResult, InferenceError> {
        let request_id = Uuid::new_v4();
        let model = self.config.model_for(modality);
        let started = Instant::now();

        info!(request_id = %request_id, model = %model, modality = %modality, "Sending inference request");

        let outcome = match self.send(model, modality, request).await {
            Ok(text) => parse_inference_result(&text, modality),
            Err(e) => Err(e),
        };

        let elapsed = started.elapsed();
        metrics::record_request(modality, metrics::outcome_label(&outcome), elapsed);

        match &outcome {
            Ok(result) => info!(
                request_id = %request_id,
                category = %result.category,
                confidence = result.confidence,
                elapsed_ms = elapsed.as_millis(),
                "Inference completed"
            ),
            Err(e) => warn!(
                request_id = %request_id,
                kind = ?e.kind(),
                error = %e,
                elapsed_ms = elapsed.as_millis(),
                "Inference failed"
            ),
        }

        outcome
    }

    /// POST the request and return the model's response text.
    async fn send(
        &self,
        model: &str,
        modality: Modality,
        request: &GenerateContentRequest,
    ) -> Result<String, InferenceError> {
        let mut builder = self.http.post(self.config.endpoint(model)).json(request);
        if self.config.has_api_key() {
            builder = builder.header(API_KEY_HEADER, &self.config.api_key);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(status = status.as_u16(), body_len = body.len(), "Response received");

        if !status.is_success() {
            return Err(service_failure(status, &body));
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            InferenceError::malformed(modality, format!("undecodable response envelope: {e}"))
        })?;

        envelope.text().ok_or_else(|| {
            let reason = envelope.block_reason().unwrap_or("no text in response");
            InferenceError::malformed(modality, format!("empty response: {reason}"))
        })
    }
}

/// Map an error status to a failure carrying the service's message.
fn service_failure(status: StatusCode, body: &str) -> InferenceError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| status.to_string());
    InferenceError::NetworkOrServiceFailure(message)
}

#[async_trait]
impl GenderInference for GeminiClient {
    async fn infer_from_text(&self, name: &str) -> Result<InferenceResult, InferenceError> {
        if name.trim().is_empty() {
            metrics::record_rejected(Modality::Text);
            return Err(InferenceError::InvalidInputFormat(EMPTY_NAME.to_string()));
        }

        let request = GenerateContentRequest::json(
            vec![Part::text(text_prompt(name))],
            response_schema(),
        );
        self.generate(Modality::Text, &request).await
    }

    async fn infer_from_image(&self, image_data: &str) -> Result<InferenceResult, InferenceError> {
        let image = parse_data_url(image_data).inspect_err(|e| {
            warn!(error = %e, "Rejected image data before sending");
            metrics::record_rejected(Modality::Image);
        })?;
        debug!(mime_type = %image.mime_type, payload_len = image.payload.len(), "Image data accepted");

        let request = GenerateContentRequest::json(
            vec![
                Part::inline_data(image.mime_type, image.payload),
                Part::text(IMAGE_PROMPT),
            ],
            response_schema(),
        );
        self.generate(Modality::Image, &request).await
    }
}
