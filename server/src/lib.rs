//! # Carshare Server
//!
//! HTTP services of the car-sharing platform.
//!
//! - **Reservation service** (`reservation-service`): vehicle listing and the
//!   reservation lifecycle over `PostgreSQL`, with payment notices handed to a
//!   bounded background dispatcher
//! - **User service** (`user-service`): account registration and login
//!
//! The binaries are thin: load [`Config`], connect, build the router from
//! [`routes`], serve until [`shutdown::shutdown_signal`] fires.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod metrics;
pub mod routes;
pub mod shutdown;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use routes::{build_reservation_router, with_middleware};
pub use state::AppState;
