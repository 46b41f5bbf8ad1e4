//! Application state for the reservation HTTP service.

use carshare_core::ReservationLifecycle;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// State shared across reservation handlers.
///
/// Cloned per request; the lifecycle sits behind an `Arc`.
pub struct AppState<S, N> {
    /// Reservation lifecycle over the injected store and notifier
    pub lifecycle: Arc<ReservationLifecycle<S, N>>,
    /// Renders `GET /metrics`; `None` when no recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl<S, N> AppState<S, N> {
    /// Create application state.
    #[must_use]
    pub fn new(lifecycle: ReservationLifecycle<S, N>) -> Self {
        Self {
            lifecycle: Arc::new(lifecycle),
            metrics: None,
        }
    }

    /// Serve the given Prometheus handle at `GET /metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl<S, N> Clone for AppState<S, N> {
    fn clone(&self) -> Self {
        Self {
            lifecycle: Arc::clone(&self.lifecycle),
            metrics: self.metrics.clone(),
        }
    }
}
