//! Name form: `Idle -> Submitting -> Success | Failed`.
//!
//! The underlying error is logged but never shown; the user always sees
//! [`TEXT_FAILURE_MESSAGE`].

use inference_client::InferenceError;
use oracle_core::InferenceResult;
use tracing::{error, warn};

/// Fixed message shown for any failed name analysis
pub const TEXT_FAILURE_MESSAGE: &str = "Failed to analyze name. Please try again.";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum TextViewState {
    #[default]
    Idle,
    Submitting,
    Success(InferenceResult),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct TextView {
    input: String,
    state: TextViewState,
}

impl TextView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> &TextViewState {
        &self.state
    }

    /// Edit the form text. The input stays editable while a request is in flight.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// The submit control is disabled while a request is in flight.
    pub fn can_submit(&self) -> bool {
        !matches!(self.state, TextViewState::Submitting)
    }

    /// Start a submission and return the name to send.
    ///
    /// Returns `None`, without touching the state, when the input is blank
    /// or a request is already in flight.
    pub fn submit(&mut self) -> Option<String> {
        if !self.can_submit() || self.input.trim().is_empty() {
            return None;
        }
        self.state = TextViewState::Submitting;
        Some(self.input.clone())
    }

    /// Deliver the outcome of the in-flight request.
    pub fn complete(&mut self, outcome: Result<InferenceResult, InferenceError>) {
        if self.can_submit() {
            warn!("Name analysis result arrived with no request in flight; ignoring");
            return;
        }
        self.state = match outcome {
            Ok(result) => TextViewState::Success(result),
            Err(e) => {
                error!(kind = ?e.kind(), error = %e, "Name analysis failed");
                TextViewState::Failed(TEXT_FAILURE_MESSAGE.to_string())
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oracle_core::GenderCategory;

    fn sample_result() -> InferenceResult {
        InferenceResult::new(GenderCategory::Unknown, 0.4, "Ambiguous given name.").unwrap()
    }

    #[test]
    fn test_starts_idle() {
        let view = TextView::new();
        assert_eq!(view.state(), &TextViewState::Idle);
        assert!(view.can_submit());
    }

    #[test]
    fn test_blank_input_is_noop() {
        let mut view = TextView::new();
        for blank in ["", "   ", "\t\n"] {
            view.set_input(blank);
            assert_eq!(view.submit(), None);
            assert_eq!(view.state(), &TextViewState::Idle);
        }

        // Also from a terminal state
        view.set_input("Alex");
        view.submit();
        view.complete(Ok(sample_result()));
        view.set_input("  ");
        assert_eq!(view.submit(), None);
        assert_eq!(view.state(), &TextViewState::Success(sample_result()));
    }

    #[test]
    fn test_submit_then_success() {
        let mut view = TextView::new();
        view.set_input("Alex Rivera");
        assert_eq!(view.submit().as_deref(), Some("Alex Rivera"));
        assert_eq!(view.state(), &TextViewState::Submitting);
        assert!(!view.can_submit());

        view.complete(Ok(sample_result()));
        assert_eq!(view.state(), &TextViewState::Success(sample_result()));
        assert!(view.can_submit());
    }

    #[test]
    fn test_no_concurrent_submissions() {
        let mut view = TextView::new();
        view.set_input("Alex");
        assert!(view.submit().is_some());

        view.set_input("Sam");
        assert_eq!(view.submit(), None);
        assert_eq!(view.state(), &TextViewState::Submitting);
        assert_eq!(view.input(), "Sam");
    }

    #[test]
    fn test_failure_shows_fixed_message() {
        let mut view = TextView::new();
        view.set_input("Alex");
        view.submit();
        view.complete(Err(InferenceError::NetworkOrServiceFailure(
            "quota exceeded".to_string(),
        )));
        assert_eq!(
            view.state(),
            &TextViewState::Failed(TEXT_FAILURE_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_resubmit_clears_previous_error() {
        let mut view = TextView::new();
        view.set_input("Alex");
        view.submit();
        view.complete(Err(InferenceError::NetworkOrServiceFailure("down".to_string())));

        assert!(view.submit().is_some());
        assert_eq!(view.state(), &TextViewState::Submitting);
    }

    #[test]
    fn test_stray_completion_is_ignored() {
        let mut view = TextView::new();
        view.complete(Ok(sample_result()));
        assert_eq!(view.state(), &TextViewState::Idle);
    }
}
