//! Reservation lifecycle: list, create, reschedule, and cancel.
//!
//! The lifecycle is the sole writer of vehicle availability transitions. It
//! delegates every two-table write to a single atomic store operation, so a
//! vehicle is `unavailable` exactly when one active reservation references it.
//!
//! # Flow
//!
//! ```text
//! create:  validate window ─► store.book (claim + insert, one tx) ─► notifier.notify
//! modify:  validate window ─► store.reschedule
//! cancel:  validate id ─────► store.release (free vehicle + delete, one tx)
//! ```

use crate::error::{ReservationError, Result};
use crate::notify::{PaymentNotice, PaymentNotifier};
use crate::reservation::{NewReservation, Reservation, ReservationId, ReservationWindow, UserId};
use crate::store::ReservationStore;
use crate::vehicle::{AvailableVehicle, VehicleId};
use chrono::{DateTime, Utc};

/// Command to book a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateReservation {
    /// Who is booking.
    pub user_id: UserId,
    /// What to book.
    pub vehicle_id: VehicleId,
    /// Requested start.
    pub start_time: DateTime<Utc>,
    /// Requested end.
    pub end_time: DateTime<Utc>,
}

/// Command to change the booking window of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifyReservation {
    /// Reservation to change.
    pub reservation_id: ReservationId,
    /// New start.
    pub start_time: DateTime<Utc>,
    /// New end.
    pub end_time: DateTime<Utc>,
}

/// Orchestrates reservation commands against a store and a payment notifier.
#[derive(Debug)]
pub struct ReservationLifecycle<S, N> {
    store: S,
    notifier: N,
}

impl<S, N> ReservationLifecycle<S, N>
where
    S: ReservationStore,
    N: PaymentNotifier,
{
    /// Create a lifecycle over an injected store and notifier.
    #[must_use]
    pub const fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    /// List every vehicle that can currently be booked.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::Persistence`] if the read fails.
    pub async fn list_available_vehicles(&self) -> Result<Vec<AvailableVehicle>> {
        let vehicles = self.store.list_available_vehicles().await?;
        tracing::debug!(count = vehicles.len(), "Listed available vehicles");
        Ok(vehicles)
    }

    /// Book a vehicle and hand a payment notice off.
    ///
    /// The payment notice is dispatched only after the booking committed and
    /// its outcome never affects the returned reservation.
    ///
    /// # Errors
    ///
    /// - [`ReservationError::InvalidRequest`] for non-positive ids or `end_time <= start_time`
    /// - [`ReservationError::VehicleUnavailable`] if the vehicle is missing or booked
    /// - [`ReservationError::Persistence`] if the store fails (nothing is written)
    pub async fn create_reservation(&self, command: CreateReservation) -> Result<Reservation> {
        let result = self.try_create(command).await;

        match &result {
            Ok(reservation) => {
                metrics::counter!("reservations_created_total").increment(1);
                tracing::info!(
                    reservation_id = %reservation.id,
                    user_id = %reservation.user_id,
                    vehicle_id = %reservation.vehicle_id,
                    "Reservation created"
                );
                self.notifier.notify(PaymentNotice::from(reservation));
            }
            Err(err) => {
                metrics::counter!("reservations_rejected_total", "reason" => err.kind())
                    .increment(1);
                tracing::warn!(
                    user_id = %command.user_id,
                    vehicle_id = %command.vehicle_id,
                    error = %err,
                    "Reservation rejected"
                );
            }
        }

        result
    }

    async fn try_create(&self, command: CreateReservation) -> Result<Reservation> {
        if command.user_id.get() <= 0 {
            return Err(ReservationError::InvalidRequest(format!(
                "Invalid user ID: {}",
                command.user_id
            )));
        }
        if command.vehicle_id.get() <= 0 {
            return Err(ReservationError::InvalidRequest(format!(
                "Invalid vehicle ID: {}",
                command.vehicle_id
            )));
        }
        let window = ReservationWindow::new(command.start_time, command.end_time)?;

        let reservation = self
            .store
            .book(NewReservation {
                user_id: command.user_id,
                vehicle_id: command.vehicle_id,
                window,
            })
            .await?;

        Ok(reservation)
    }

    /// Read a reservation.
    ///
    /// # Errors
    ///
    /// - [`ReservationError::InvalidRequest`] for a non-positive id
    /// - [`ReservationError::NotFound`] if it does not exist
    /// - [`ReservationError::Persistence`] if the read fails
    pub async fn get_reservation(&self, reservation_id: ReservationId) -> Result<Reservation> {
        validate_id(reservation_id)?;
        self.store
            .get_reservation(reservation_id)
            .await?
            .ok_or(ReservationError::NotFound { reservation_id })
    }

    /// Change the booking window. No availability re-check is performed.
    ///
    /// # Errors
    ///
    /// - [`ReservationError::InvalidRequest`] for a non-positive id or `end_time <= start_time`
    /// - [`ReservationError::NotFound`] if the reservation does not exist
    /// - [`ReservationError::Persistence`] if the update fails
    pub async fn modify_reservation(&self, command: ModifyReservation) -> Result<Reservation> {
        validate_id(command.reservation_id)?;
        let window = ReservationWindow::new(command.start_time, command.end_time)?;

        let reservation = self.store.reschedule(command.reservation_id, window).await?;

        metrics::counter!("reservations_modified_total").increment(1);
        tracing::info!(
            reservation_id = %reservation.id,
            start_time = %reservation.start_time,
            end_time = %reservation.end_time,
            "Reservation modified"
        );

        Ok(reservation)
    }

    /// Cancel a reservation and release its vehicle.
    ///
    /// # Errors
    ///
    /// - [`ReservationError::InvalidRequest`] for a non-positive id
    /// - [`ReservationError::NotFound`] if the reservation does not exist
    /// - [`ReservationError::Persistence`] if the store fails (nothing is changed)
    pub async fn cancel_reservation(&self, reservation_id: ReservationId) -> Result<Reservation> {
        validate_id(reservation_id)?;

        let reservation = self.store.release(reservation_id).await?;

        metrics::counter!("reservations_cancelled_total").increment(1);
        tracing::info!(
            reservation_id = %reservation.id,
            vehicle_id = %reservation.vehicle_id,
            "Reservation cancelled, vehicle released"
        );

        Ok(reservation)
    }
}

fn validate_id(reservation_id: ReservationId) -> Result<()> {
    if reservation_id.get() <= 0 {
        return Err(ReservationError::InvalidRequest(format!(
            "Invalid reservation ID: {reservation_id}"
        )));
    }
    Ok(())
}
