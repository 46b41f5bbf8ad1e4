//! Prometheus metrics for the car-sharing services.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `reservations_created_total`
//! - `reservations_rejected_total{reason}`
//! - `reservations_modified_total`
//! - `reservations_cancelled_total`
//! - `reservation_store_errors_total{operation}`
//! - `payment_notifications_sent_total`
//! - `payment_notifications_failed_total{reason}`
//! - `payment_notifications_dropped_total`
//! - `users_registered_total`
//! - `user_logins_total{outcome}`
//!
//! ## Histograms
//! - `payment_notification_duration_seconds`

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and register metric descriptions.
///
/// The returned handle renders the scrape text served at `GET /metrics`.
///
/// # Errors
///
/// Returns [`BuildError`] if a global recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(handle)
}

/// Register descriptions for every metric the services emit.
pub fn register_metrics() {
    describe_counter!(
        "reservations_created_total",
        "Reservations successfully booked"
    );
    describe_counter!(
        "reservations_rejected_total",
        "Reservation requests rejected, by reason"
    );
    describe_counter!(
        "reservations_modified_total",
        "Reservations whose booking window was changed"
    );
    describe_counter!(
        "reservations_cancelled_total",
        "Reservations cancelled and their vehicle released"
    );
    describe_counter!(
        "reservation_store_errors_total",
        "Database failures in the reservation store, by operation"
    );
    describe_counter!(
        "payment_notifications_sent_total",
        "Payment notices accepted by the payment service"
    );
    describe_counter!(
        "payment_notifications_failed_total",
        "Payment notices that failed delivery, by reason"
    );
    describe_counter!(
        "payment_notifications_dropped_total",
        "Payment notices dropped because the queue was full or closed"
    );
    describe_histogram!(
        "payment_notification_duration_seconds",
        "Time taken to deliver a payment notice"
    );
    describe_counter!("users_registered_total", "Accounts created");
    describe_counter!("user_logins_total", "Login attempts, by outcome");

    tracing::info!("Metrics registered");
}
