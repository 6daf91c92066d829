//! Optional Prometheus metrics middleware.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

/// Build request metrics exposed on `/metrics`.
///
/// # Errors
/// Returns [`std::io::Error`] if metric registration fails.
pub(crate) fn make_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("users_api")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("metrics registration failed: {e}")))
}
