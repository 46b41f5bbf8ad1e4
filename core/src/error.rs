//! Error taxonomy for reservation operations.
//!
//! Three layers of errors exist:
//!
//! - [`StoreError`]: raised by a [`ReservationStore`](crate::store::ReservationStore)
//!   implementation (database failures, failed conditional writes).
//! - [`ReservationError`]: raised by the
//!   [`ReservationLifecycle`](crate::lifecycle::ReservationLifecycle) and surfaced
//!   synchronously to the caller.
//! - [`NotificationError`]: raised while delivering a payment notice. These are
//!   never surfaced to the caller; they are logged and counted.

use crate::reservation::ReservationId;
use crate::vehicle::VehicleId;
use thiserror::Error;

/// Result type alias for lifecycle operations.
pub type Result<T> = std::result::Result<T, ReservationError>;

/// Errors that can occur inside a reservation store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The conditional availability update matched no row.
    ///
    /// The vehicle either does not exist or is already booked.
    #[error("Vehicle {0} is not available")]
    VehicleUnavailable(VehicleId),

    /// The addressed reservation does not exist.
    #[error("Reservation {0} not found")]
    ReservationNotFound(ReservationId),

    /// Database connection, query, or transaction failure.
    #[error("Database error: {0}")]
    Database(String),

    /// A persisted value could not be mapped to a domain type.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Errors returned by the reservation lifecycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservationError {
    /// Malformed input or missing identifier.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The vehicle cannot be booked (missing or already reserved).
    #[error("Vehicle {vehicle_id} is not available")]
    VehicleUnavailable {
        /// The vehicle that was requested.
        vehicle_id: VehicleId,
    },

    /// The reservation does not exist.
    #[error("Reservation {reservation_id} not found")]
    NotFound {
        /// The reservation that was addressed.
        reservation_id: ReservationId,
    },

    /// The store failed to read or write.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl ReservationError {
    /// Short machine-readable label, used for metrics and error codes.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::VehicleUnavailable { .. } => "vehicle_unavailable",
            Self::NotFound { .. } => "not_found",
            Self::Persistence(_) => "persistence",
        }
    }
}

impl From<StoreError> for ReservationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::VehicleUnavailable(vehicle_id) => Self::VehicleUnavailable { vehicle_id },
            StoreError::ReservationNotFound(reservation_id) => Self::NotFound { reservation_id },
            StoreError::Database(msg) | StoreError::Corrupt(msg) => Self::Persistence(msg),
        }
    }
}

/// Errors raised while delivering a payment notice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// The request could not be sent or the connection failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The payment service answered with a non-success status.
    #[error("Payment service responded with status {status}")]
    Rejected {
        /// HTTP status code returned by the payment service.
        status: u16,
    },

    /// The delivery did not complete within the configured timeout.
    #[error("Payment notification timed out")]
    Timeout,

    /// The notification queue is full or closed.
    #[error("Notification queue unavailable: {0}")]
    QueueUnavailable(String),
}

impl NotificationError {
    /// Short machine-readable label, used for metrics.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Rejected { .. } => "rejected",
            Self::Timeout => "timeout",
            Self::QueueUnavailable(_) => "queue",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_unavailable_maps_to_vehicle_unavailable() {
        let err: ReservationError = StoreError::VehicleUnavailable(VehicleId::new(7)).into();
        assert_eq!(
            err,
            ReservationError::VehicleUnavailable {
                vehicle_id: VehicleId::new(7)
            }
        );
        assert_eq!(err.kind(), "vehicle_unavailable");
    }

    #[test]
    fn database_failure_maps_to_persistence() {
        let err: ReservationError = StoreError::Database("connection reset".to_string()).into();
        assert_eq!(err.kind(), "persistence");
        assert_eq!(err.to_string(), "Persistence error: connection reset");
    }

    #[test]
    fn rejected_notification_display() {
        let err = NotificationError::Rejected { status: 502 };
        assert_eq!(err.to_string(), "Payment service responded with status 502");
        assert_eq!(err.reason(), "rejected");
    }
}
