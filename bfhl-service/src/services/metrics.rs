//! Prometheus metrics for bfhl-service.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

// Request metrics
pub static BFHL_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static BFHL_REQUEST_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

// AI-specific metrics
pub static GENAI_PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static GENAI_FALLBACKS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Must be called once at startup.
///
/// Recorders are no-ops until this has run, so tests can skip it.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    let registry = Registry::new();

    let requests_total = IntCounterVec::new(
        Opts::new("bfhl_requests_total", "Total number of bfhl requests"),
        &["operation", "outcome"],
    )?;

    let request_duration = HistogramVec::new(
        HistogramOpts::new(
            "bfhl_request_duration_seconds",
            "bfhl request duration in seconds",
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0]),
        &["operation"],
    )?;

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "genai_provider_latency_seconds",
            "Text provider call latency in seconds",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["provider", "model"],
    )?;

    let fallbacks_total = IntCounterVec::new(
        Opts::new(
            "genai_fallbacks_total",
            "Answers replaced by the fallback value",
        ),
        &["reason"],
    )?;

    registry.register(Box::new(requests_total.clone()))?;
    registry.register(Box::new(request_duration.clone()))?;
    registry.register(Box::new(provider_latency.clone()))?;
    registry.register(Box::new(fallbacks_total.clone()))?;

    let _ = REGISTRY.set(registry);
    let _ = BFHL_REQUESTS_TOTAL.set(requests_total);
    let _ = BFHL_REQUEST_DURATION_SECONDS.set(request_duration);
    let _ = GENAI_PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = GENAI_FALLBACKS_TOTAL.set(fallbacks_total);

    tracing::info!("Prometheus metrics initialized");
    Ok(())
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

// Helper functions for recording metrics

/// Record a completed bfhl request.
pub fn record_request(operation: &str, outcome: &str, duration_secs: f64) {
    if let Some(counter) = BFHL_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[operation, outcome]).inc();
    }
    if let Some(histogram) = BFHL_REQUEST_DURATION_SECONDS.get() {
        histogram
            .with_label_values(&[operation])
            .observe(duration_secs);
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(histogram) = GENAI_PROVIDER_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

/// Record an answer replaced by the fallback.
pub fn record_fallback(reason: &str) {
    if let Some(counter) = GENAI_FALLBACKS_TOTAL.get() {
        counter.with_label_values(&[reason]).inc();
    }
}
