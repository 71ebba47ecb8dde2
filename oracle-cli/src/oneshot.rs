//! Single-action modes: `gender-oracle name ...` and `gender-oracle image ...`.
//!
//! These drive the same view state machines as the interactive loop, for
//! exactly one request.

use anyhow::{bail, Result};
use inference_client::GenderInference;
use std::path::Path;
use std::process::ExitCode;

use crate::app::{print_lines, render_image_state, render_text_state};
use crate::image_file::load_image;
use crate::render::{pending_line, Surface};
use crate::views::{ImageView, ImageViewState, TextView, TextViewState};

pub async fn run_name(client: &dyn GenderInference, name: &str) -> Result<ExitCode> {
    let view = analyze_name(client, name).await?;
    print_lines(&render_text_state(view.state()));
    Ok(exit_code(matches!(view.state(), TextViewState::Success(_))))
}

pub async fn run_image(client: &dyn GenderInference, path: &Path) -> Result<ExitCode> {
    let view = analyze_image(client, path).await?;
    print_lines(&render_image_state(view.state()));
    Ok(exit_code(matches!(view.state(), ImageViewState::Success(_))))
}

async fn analyze_name(client: &dyn GenderInference, name: &str) -> Result<TextView> {
    let mut view = TextView::new();
    view.set_input(name);
    let Some(name) = view.submit() else {
        bail!("Please enter a name.");
    };

    eprintln!("{}", pending_line(Surface::Text));
    view.complete(client.infer_from_text(&name).await);
    Ok(view)
}

async fn analyze_image(client: &dyn GenderInference, path: &Path) -> Result<ImageView> {
    let mut view = ImageView::new();
    view.load(load_image(path).await?);
    let Some(data_url) = view.analyze() else {
        bail!("No image loaded");
    };

    eprintln!("{}", pending_line(Surface::Image));
    view.complete(client.infer_from_image(&data_url).await);
    Ok(view)
}

fn exit_code(succeeded: bool) -> ExitCode {
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::text::TEXT_FAILURE_MESSAGE;
    use async_trait::async_trait;
    use inference_client::InferenceError;
    use oracle_core::{GenderCategory, InferenceResult};
    use std::io::Write;

    /// Client whose every call ends the same way.
    struct FixedOutcome(Option<&'static str>);

    impl FixedOutcome {
        fn outcome(&self) -> Result<InferenceResult, InferenceError> {
            match self.0 {
                Some(message) => Err(InferenceError::NetworkOrServiceFailure(message.to_string())),
                None => Ok(InferenceResult::new(GenderCategory::Female, 0.8, "Common name.").unwrap()),
            }
        }
    }

    #[async_trait]
    impl GenderInference for FixedOutcome {
        async fn infer_from_text(&self, _name: &str) -> Result<InferenceResult, InferenceError> {
            self.outcome()
        }

        async fn infer_from_image(
            &self,
            _image_data: &str,
        ) -> Result<InferenceResult, InferenceError> {
            self.outcome()
        }
    }

    const QUOTA: FixedOutcome = FixedOutcome(Some("quota exceeded"));

    // ExitCode has no PartialEq; its Debug form identifies the value.
    fn same_code(a: ExitCode, b: ExitCode) -> bool {
        format!("{a:?}") == format!("{b:?}")
    }

    fn png_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"\x89PNG\r\n\x1a\n").unwrap();
        file
    }

    #[tokio::test]
    async fn test_name_success_exits_zero() {
        let code = run_name(&FixedOutcome(None), "Alex").await.unwrap();
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[tokio::test]
    async fn test_name_failure_exits_non_zero() {
        let code = run_name(&QUOTA, "Alex").await.unwrap();
        assert!(same_code(code, ExitCode::FAILURE));

        let view = analyze_name(&QUOTA, "Alex").await.unwrap();
        assert_eq!(
            view.state(),
            &TextViewState::Failed(TEXT_FAILURE_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_blank_name_is_an_error() {
        assert!(run_name(&QUOTA, "   ").await.is_err());
    }

    #[tokio::test]
    async fn test_image_failure_shows_service_message() {
        let file = png_file();

        let code = run_image(&QUOTA, file.path()).await.unwrap();
        assert!(same_code(code, ExitCode::FAILURE));

        let view = analyze_image(&QUOTA, file.path()).await.unwrap();
        assert_eq!(
            view.state(),
            &ImageViewState::Failed("quota exceeded".to_string())
        );
    }

    #[tokio::test]
    async fn test_image_success_exits_zero() {
        let file = png_file();
        let code = run_image(&FixedOutcome(None), file.path()).await.unwrap();
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[tokio::test]
    async fn test_unreadable_image_is_an_error() {
        let result = run_image(&QUOTA, Path::new("/definitely/not/here.png")).await;
        assert!(result.is_err());
    }
}
