//! Gender Oracle
//!
//! Terminal client that asks a hosted Gemini model to guess perceived
//! gender from a name or a photo, and shows the category, a confidence bar
//! and the model's reasoning.
//!
//! Modes:
//! - `gender-oracle` (or `gender-oracle interactive`) - REPL with both panels
//! - `gender-oracle name <NAME>...` - one name, then exit
//! - `gender-oracle image <PATH>` - one photo, then exit
//!
//! The API key is read from `GEMINI_API_KEY` (or `API_KEY`).

mod app;
mod command;
mod image_file;
mod metrics;
mod oneshot;
mod render;
mod views;

use anyhow::Result;
use clap::{Parser, Subcommand};
use inference_client::{ClientConfig, GeminiClient, GenderInference};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

use crate::app::{run_interactive, App, ModelInfo};

const SERVICE_NAME: &str = "gender_oracle";

#[derive(Parser, Debug)]
#[command(name = "gender-oracle", version, about = "Guess perceived gender from a name or a photo")]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_BASE_URL")]
    base_url: Option<String>,

    /// Model used for names
    #[arg(long, env = "ORACLE_TEXT_MODEL")]
    text_model: Option<String>,

    /// Model used for photos
    #[arg(long, env = "ORACLE_IMAGE_MODEL")]
    image_model: Option<String>,

    /// Serve Prometheus metrics on this address
    #[arg(long, env = "ORACLE_METRICS_ADDR")]
    metrics_addr: Option<SocketAddr>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Interactive session with the name and photo panels (default)
    Interactive,
    /// Guess from a single name
    Name {
        /// The name to analyze; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Guess from a single photo
    Image {
        /// Path to an image file
        path: PathBuf,
    },
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(model) = &self.text_model {
            config = config.with_text_model(model);
        }
        if let Some(model) = &self.image_model {
            config = config.with_image_model(model);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.log_json {
        oracle_core::init_tracing_json(SERVICE_NAME);
    } else {
        oracle_core::init_tracing(SERVICE_NAME);
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Some(addr) = cli.metrics_addr {
        metrics::init_metrics(addr)?;
    }

    let client = GeminiClient::new(cli.client_config());
    info!(config = ?client.config(), "Gender Oracle starting");

    match cli.mode.unwrap_or(Mode::Interactive) {
        Mode::Interactive => {
            let models = ModelInfo {
                text_model: client.config().text_model.clone(),
                image_model: client.config().image_model.clone(),
            };
            let client: Arc<dyn GenderInference> = Arc::new(client);
            let (app, events) = App::new(client, models);
            run_interactive(app, events).await?;
            Ok(ExitCode::SUCCESS)
        }
        Mode::Name { name } => oneshot::run_name(&client, &name.join(" ")).await,
        Mode::Image { path } => oneshot::run_image(&client, &path).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_modes() {
        let cli = Cli::try_parse_from(["gender-oracle"]).unwrap();
        assert!(cli.mode.is_none());

        let cli = Cli::try_parse_from(["gender-oracle", "name", "Alex", "Rivera"]).unwrap();
        match cli.mode {
            Some(Mode::Name { name }) => assert_eq!(name.join(" "), "Alex Rivera"),
            other => panic!("unexpected mode: {other:?}"),
        }

        let cli = Cli::try_parse_from(["gender-oracle", "image", "me.png"]).unwrap();
        assert!(matches!(cli.mode, Some(Mode::Image { .. })));

        assert!(Cli::try_parse_from(["gender-oracle", "name"]).is_err());
    }

    #[test]
    fn test_cli_overrides_models() {
        let cli = Cli::try_parse_from([
            "gender-oracle",
            "--text-model",
            "custom-text",
            "--image-model",
            "custom-image",
            "--base-url",
            "http://127.0.0.1:9999",
        ])
        .unwrap();
        let config = cli.client_config();
        assert_eq!(config.text_model, "custom-text");
        assert_eq!(config.image_model, "custom-image");
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
    }
}
