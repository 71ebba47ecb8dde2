//! Optional Prometheus exporter for inference metrics
//!
//! When `--metrics-addr` is given, metrics are served for scraping at
//! `http://<addr>/metrics` for the lifetime of the session.

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

/// Install the Prometheus recorder with its HTTP listener.
///
/// Must be called from inside the Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("Failed to install Prometheus recorder")?;

    inference_client::metrics::describe_metrics();

    info!(addr = %addr, "Metrics listener started");
    Ok(())
}
