//! Store abstraction over the vehicle availability table and the reservation ledger.
//!
//! The store is the only shared mutable resource of the reservation service.
//! Implementations own their connection handle and acquire/release it per
//! operation.
//!
//! # Consistency contract
//!
//! Every write that touches both tables must be atomic:
//!
//! - [`ReservationStore::book`] flips the vehicle to `unavailable` with a
//!   conditional update (only if currently `available`) and inserts the
//!   reservation in the same transaction. Zero rows matched means
//!   [`StoreError::VehicleUnavailable`] and nothing is written.
//! - [`ReservationStore::release`] sets the referenced vehicle back to
//!   `available` and deletes the reservation in the same transaction.
//!
//! Two concurrent `book` calls for the same vehicle must therefore produce
//! exactly one success.
//!
//! # Implementations
//!
//! - `PostgresReservationStore` (in `carshare-postgres`): production
//! - `InMemoryReservationStore` (in `carshare-testing`): fast, deterministic tests

use crate::error::StoreError;
use crate::reservation::{NewReservation, Reservation, ReservationId, ReservationWindow};
use crate::vehicle::AvailableVehicle;
use std::future::Future;

/// Persistence seam for the reservation lifecycle.
pub trait ReservationStore: Send + Sync {
    /// All vehicles currently flagged `available`, in store order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the read fails.
    fn list_available_vehicles(
        &self,
    ) -> impl Future<Output = Result<Vec<AvailableVehicle>, StoreError>> + Send;

    /// Atomically claim the vehicle and insert the reservation.
    ///
    /// # Errors
    ///
    /// - [`StoreError::VehicleUnavailable`] if the vehicle is missing or already booked
    /// - [`StoreError::Database`] if any statement or the commit fails
    fn book(
        &self,
        reservation: NewReservation,
    ) -> impl Future<Output = Result<Reservation, StoreError>> + Send;

    /// Read a single reservation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the read fails.
    fn get_reservation(
        &self,
        reservation_id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, StoreError>> + Send;

    /// Replace the booking window of an existing reservation.
    ///
    /// User and vehicle references are left unchanged.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ReservationNotFound`] if no row was updated
    /// - [`StoreError::Database`] if the update fails
    fn reschedule(
        &self,
        reservation_id: ReservationId,
        window: ReservationWindow,
    ) -> impl Future<Output = Result<Reservation, StoreError>> + Send;

    /// Atomically release the vehicle and delete the reservation.
    ///
    /// Returns the deleted reservation.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ReservationNotFound`] if the reservation does not exist
    /// - [`StoreError::Database`] if any statement or the commit fails
    fn release(
        &self,
        reservation_id: ReservationId,
    ) -> impl Future<Output = Result<Reservation, StoreError>> + Send;
}
