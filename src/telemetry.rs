//! Opt-in tracing setup for hosts embedding the chart pipeline.
//!
//! Lifecycle transitions, backend selection and backend calls are emitted as
//! `tracing` events. Nothing is printed unless a subscriber is installed,
//! either by the host or through the helpers below.

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`,
/// falling back to [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"fund_chart_rs=debug"` to watch chart instances being created and
/// disposed.
#[must_use]
pub fn init_tracing_with_fallback(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
