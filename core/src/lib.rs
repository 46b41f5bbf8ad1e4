//! # Carshare Core
//!
//! Domain types and the reservation lifecycle for the car-sharing platform.
//!
//! The crate has no I/O of its own. Persistence and outbound notification are
//! injected through two seams:
//!
//! - [`store::ReservationStore`]: the vehicle availability table and the
//!   reservation ledger, with atomic two-table writes
//! - [`notify::PaymentNotifier`]: non-blocking handoff of payment notices
//!
//! ## Example
//!
//! ```ignore
//! use carshare_core::lifecycle::{CreateReservation, ReservationLifecycle};
//!
//! let lifecycle = ReservationLifecycle::new(store, notifier);
//!
//! let reservation = lifecycle
//!     .create_reservation(CreateReservation {
//!         user_id: UserId::new(3),
//!         vehicle_id: VehicleId::new(7),
//!         start_time,
//!         end_time,
//!     })
//!     .await?;
//!
//! lifecycle.cancel_reservation(reservation.id).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod lifecycle;
pub mod notify;
pub mod reservation;
pub mod store;
pub mod vehicle;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use error::{NotificationError, ReservationError, StoreError};
pub use lifecycle::{CreateReservation, ModifyReservation, ReservationLifecycle};
pub use notify::{PaymentClient, PaymentNotice, PaymentNotifier};
pub use reservation::{NewReservation, Reservation, ReservationId, ReservationWindow, UserId};
pub use store::ReservationStore;
pub use vehicle::{Availability, AvailableVehicle, Vehicle, VehicleId};
