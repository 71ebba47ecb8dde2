//! Gender Oracle Core Library
//!
//! Provides the pieces shared by the inference client and the front end:
//! - The inference result contract
//! - Tracing initialisation

pub mod result;

// Re-export commonly used items
pub use result::{GenderCategory, InferenceResult, InvalidResult};

fn default_filter(service_name: &str) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::EnvFilter;

    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{service_name}=info,inference_client=info")))
}

/// Initialize tracing with standard configuration.
///
/// Logs go to stderr so rendered results on stdout stay readable.
pub fn init_tracing(service_name: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter(service_name))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initialize tracing with JSON output
pub fn init_tracing_json(service_name: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter(service_name))
        .with_writer(std::io::stderr)
        .json()
        .init();
}
