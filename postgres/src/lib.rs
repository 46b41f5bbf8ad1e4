//! `PostgreSQL` reservation store for the car-sharing platform.
//!
//! This crate provides [`PostgresReservationStore`], the production
//! implementation of the `ReservationStore` trait from `carshare-core`, and
//! [`connect`] for building a tuned connection pool.
//!
//! - Booking claims the vehicle with a conditional update and inserts the
//!   reservation inside one transaction
//! - Cancellation releases the vehicle and deletes the reservation inside one
//!   transaction
//! - Connections are acquired from the pool per operation
//!
//! Schema creation is left to the deployment; the tables are expected to exist.
//!
//! # Example
//!
//! ```ignore
//! use carshare_postgres::{DatabaseSettings, PostgresReservationStore, connect};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = connect(&DatabaseSettings::default()).await?;
//!     let store = PostgresReservationStore::new(pool);
//!     let vehicles = store.list_available_vehicles().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod pool;
mod reservation_store;

pub use pool::{DatabaseSettings, connect};
pub use reservation_store::PostgresReservationStore;
