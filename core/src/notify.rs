//! Payment notification seams.
//!
//! Creating a reservation informs the payment collaborator. The reservation
//! path only *hands off* a [`PaymentNotice`] through [`PaymentNotifier`]; it
//! never waits for, retries, or observes the delivery. Delivery itself is the
//! job of a [`PaymentClient`], driven by whatever the notifier hands notices to.

use crate::error::NotificationError;
use crate::reservation::{Reservation, ReservationId, UserId};
use crate::vehicle::VehicleId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

/// Body sent to the payment service for each created reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentNotice {
    /// The created reservation.
    pub reservation_id: ReservationId,
    /// Who booked.
    pub user_id: UserId,
    /// What was booked.
    pub vehicle_id: VehicleId,
    /// Start of the booking.
    pub start_time: DateTime<Utc>,
    /// End of the booking.
    pub end_time: DateTime<Utc>,
}

impl From<&Reservation> for PaymentNotice {
    fn from(reservation: &Reservation) -> Self {
        Self {
            reservation_id: reservation.id,
            user_id: reservation.user_id,
            vehicle_id: reservation.vehicle_id,
            start_time: reservation.start_time,
            end_time: reservation.end_time,
        }
    }
}

/// Non-blocking handoff of payment notices.
///
/// Implementations must return immediately. Failures are the implementation's
/// to log; nothing is reported back to the caller.
pub trait PaymentNotifier: Send + Sync {
    /// Hand a notice off for best-effort, at-most-once delivery.
    fn notify(&self, notice: PaymentNotice);
}

impl<T: PaymentNotifier + ?Sized> PaymentNotifier for Arc<T> {
    fn notify(&self, notice: PaymentNotice) {
        (**self).notify(notice);
    }
}

/// Delivers a single notice to the payment service.
pub trait PaymentClient: Send + Sync {
    /// Deliver one notice.
    ///
    /// # Errors
    ///
    /// - [`NotificationError::Transport`] if the request could not be completed
    /// - [`NotificationError::Rejected`] on a non-success status
    fn deliver(
        &self,
        notice: &PaymentNotice,
    ) -> impl Future<Output = Result<(), NotificationError>> + Send;
}
