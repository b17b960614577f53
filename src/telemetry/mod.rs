//! Telemetry module
//!
//! Structured logging and Prometheus metrics

mod instruments;
mod logging;

pub use instruments::{
    init_metrics, record_batch, record_latency, set_gauge, GaugeMetric, LatencyMetric,
};
pub use logging::init_logging;

use crate::config::TelemetryConfig;

/// Guard that cleans up telemetry on drop
pub struct TelemetryGuard {
    _priv: (),
}

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    init_logging(&config.log_level, config.log_format)?;

    if let Some(port) = config.metrics_port {
        init_metrics(port)?;
    }

    Ok(TelemetryGuard { _priv: () })
}
