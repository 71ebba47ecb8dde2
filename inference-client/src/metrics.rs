//! Inference metrics, recorded through the `metrics` facade.
//!
//! Nothing is exported unless the application installs a recorder.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

use crate::error::{ErrorKind, InferenceError, Modality};

/// Metric names
pub const REQUESTS_TOTAL: &str = "oracle_inference_requests_total";
pub const REQUEST_LATENCY: &str = "oracle_inference_latency_seconds";

/// Register metric descriptions with the installed recorder.
pub fn describe_metrics() {
    describe_counter!(REQUESTS_TOTAL, "Inference calls by modality and outcome");
    describe_histogram!(REQUEST_LATENCY, "Inference round-trip latency in seconds");
}

/// Label value for the outcome of a call.
pub fn outcome_label<T>(outcome: &Result<T, InferenceError>) -> &'static str {
    match outcome {
        Ok(_) => "success",
        Err(e) => match e.kind() {
            ErrorKind::InvalidInputFormat => "invalid_input",
            ErrorKind::NetworkOrServiceFailure => "service_failure",
            ErrorKind::MalformedResponse => "malformed_response",
        },
    }
}

/// Record one completed call.
pub fn record_request(modality: Modality, outcome: &'static str, elapsed: Duration) {
    counter!(REQUESTS_TOTAL, "modality" => modality.as_str(), "outcome" => outcome).increment(1);
    histogram!(REQUEST_LATENCY, "modality" => modality.as_str()).record(elapsed.as_secs_f64());
}

/// Record a call rejected before reaching the network.
pub fn record_rejected(modality: Modality) {
    counter!(REQUESTS_TOTAL, "modality" => modality.as_str(), "outcome" => "invalid_input").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        let ok: Result<(), InferenceError> = Ok(());
        assert_eq!(outcome_label(&ok), "success");

        let invalid: Result<(), _> = Err(InferenceError::InvalidInputFormat(String::new()));
        assert_eq!(outcome_label(&invalid), "invalid_input");

        let failed: Result<(), _> = Err(InferenceError::NetworkOrServiceFailure(String::new()));
        assert_eq!(outcome_label(&failed), "service_failure");

        let malformed: Result<(), _> = Err(InferenceError::MalformedResponse {
            modality: Modality::Image,
            reason: String::new(),
        });
        assert_eq!(outcome_label(&malformed), "malformed_response");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_request(Modality::Text, "success", Duration::from_millis(12));
        record_rejected(Modality::Image);
    }
}
