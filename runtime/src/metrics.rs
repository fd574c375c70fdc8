//! Metrics for observability.
//!
//! The Store records through the `metrics` facade. Nothing is collected until
//! a recorder is installed; [`install_recorder`] installs the Prometheus one
//! and returns a handle that renders the text exposition format on demand.
//!
//! # Example
//!
//! ```rust,no_run
//! use todostore_runtime::metrics;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handle = metrics::install_recorder()?;
//! println!("{}", handle.render());
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use thiserror::Error;

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Actions applied by a store
pub const STORE_ACTIONS_TOTAL: &str = "store_actions_total";

/// Untyped inputs a store refused to decode
pub const STORE_ACTIONS_REJECTED_TOTAL: &str = "store_actions_rejected_total";

/// Time spent inside the reducer per action
pub const STORE_REDUCER_DURATION_SECONDS: &str = "store_reducer_duration_seconds";

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Install the Prometheus recorder as the global metrics recorder.
///
/// No HTTP listener is started; call [`PrometheusHandle::render`] to get the
/// current values.
///
/// # Errors
///
/// Returns [`MetricsError::Build`] if the exporter cannot be configured and
/// [`MetricsError::Install`] if a global recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, MetricsError> {
    let handle = PrometheusBuilder::new()
        // Reducers run in microseconds
        .set_buckets_for_metric(
            Matcher::Suffix("duration_seconds".to_string()),
            &[0.000_001, 0.000_01, 0.000_1, 0.001, 0.01, 0.1],
        )
        .map_err(|e| MetricsError::Build(e.to_string()))?
        .install_recorder()
        .map_err(|e| MetricsError::Install(e.to_string()))?;

    register_metrics();
    tracing::info!("Metrics recorder installed");

    Ok(handle)
}

/// Register all metric descriptions.
fn register_metrics() {
    describe_counter!(STORE_ACTIONS_TOTAL, "Total number of actions applied by stores");
    describe_counter!(
        STORE_ACTIONS_REJECTED_TOTAL,
        "Total number of untyped inputs rejected before reaching the reducer"
    );
    describe_histogram!(
        STORE_REDUCER_DURATION_SECONDS,
        "Time taken to execute reducers"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_share_store_prefix() {
        for name in [
            STORE_ACTIONS_TOTAL,
            STORE_ACTIONS_REJECTED_TOTAL,
            STORE_REDUCER_DURATION_SECONDS,
        ] {
            assert!(name.starts_with("store_"), "{name}");
        }
    }

    #[test]
    fn duration_metric_matches_bucket_matcher() {
        assert!(STORE_REDUCER_DURATION_SECONDS.ends_with("duration_seconds"));
    }
}
