//! # Carshare Testing
//!
//! Testing utilities for the car-sharing platform.
//!
//! This crate provides:
//! - [`InMemoryReservationStore`]: an atomic in-memory vehicle table and ledger
//! - [`RecordingNotifier`]: captures payment notices instead of sending them
//! - Fixture helpers for deterministic timestamps and booking windows
//!
//! ## Example
//!
//! ```ignore
//! use carshare_testing::{InMemoryReservationStore, RecordingNotifier, fixtures::at};
//!
//! #[tokio::test]
//! async fn books_vehicle() {
//!     let store = InMemoryReservationStore::with_vehicles([(7, "Model 3")]);
//!     let notifier = RecordingNotifier::new();
//!     let lifecycle = ReservationLifecycle::new(store.clone(), notifier.clone());
//!
//!     lifecycle.create_reservation(CreateReservation {
//!         user_id: UserId::new(3),
//!         vehicle_id: VehicleId::new(7),
//!         start_time: at(10),
//!         end_time: at(12),
//!     }).await.unwrap();
//!
//!     assert_eq!(notifier.notices().len(), 1);
//! }
//! ```

pub mod reservation_store;

pub use reservation_store::InMemoryReservationStore;

/// Mock collaborators.
pub mod mocks {
    use carshare_core::notify::{PaymentNotice, PaymentNotifier};
    use std::sync::{Arc, Mutex};

    /// Notifier that records every notice it is handed.
    ///
    /// Clones share the same recording, so keep one clone in the test and
    /// move the other into the code under test.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingNotifier {
        notices: Arc<Mutex<Vec<PaymentNotice>>>,
    }

    impl RecordingNotifier {
        /// Create an empty recorder.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// All notices handed off so far, in order.
        #[must_use]
        pub fn notices(&self) -> Vec<PaymentNotice> {
            self.notices
                .lock()
                .map(|n| n.clone())
                .unwrap_or_default()
        }
    }

    impl PaymentNotifier for RecordingNotifier {
        fn notify(&self, notice: PaymentNotice) {
            if let Ok(mut notices) = self.notices.lock() {
                notices.push(notice);
            }
        }
    }
}

/// Deterministic timestamps and windows.
pub mod fixtures {
    use carshare_core::reservation::ReservationWindow;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    /// Midnight, 2025-01-01 UTC.
    #[must_use]
    pub fn epoch() -> DateTime<Utc> {
        Utc.timestamp_opt(1_735_689_600, 0)
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// `hour` hours after [`epoch`].
    #[must_use]
    pub fn at(hour: i64) -> DateTime<Utc> {
        epoch() + Duration::hours(hour)
    }

    /// A window from `start_hour` to `end_hour` after [`epoch`].
    ///
    /// # Panics
    ///
    /// Panics if `end_hour <= start_hour`.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn window(start_hour: i64, end_hour: i64) -> ReservationWindow {
        ReservationWindow::new(at(start_hour), at(end_hour))
            .expect("fixture window must end after it starts")
    }
}

/// Install a test-friendly tracing subscriber. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use fixtures::{at, window};
pub use mocks::RecordingNotifier;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use carshare_core::notify::{PaymentNotice, PaymentNotifier};
    use carshare_core::{ReservationId, UserId, VehicleId};

    #[test]
    fn epoch_is_new_year_2025() {
        assert_eq!(fixtures::epoch().to_rfc3339(), "2025-01-01T00:00:00+00:00");
        assert_eq!(at(10).to_rfc3339(), "2025-01-01T10:00:00+00:00");
    }

    #[test]
    fn recording_notifier_shares_across_clones() {
        let notifier = RecordingNotifier::new();
        let handed_off = notifier.clone();

        handed_off.notify(PaymentNotice {
            reservation_id: ReservationId::new(1),
            user_id: UserId::new(3),
            vehicle_id: VehicleId::new(7),
            start_time: at(10),
            end_time: at(12),
        });

        assert_eq!(notifier.notices().len(), 1);
        assert_eq!(notifier.notices()[0].vehicle_id, VehicleId::new(7));
    }
}
