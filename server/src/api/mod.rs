//! HTTP endpoints of the reservation service.

pub mod reservations;
pub mod vehicles;
