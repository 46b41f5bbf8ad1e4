//! Reservations and the booking window.

use crate::error::ReservationError;
use crate::vehicle::VehicleId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a reservation, assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wrap a raw reservation id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw id as stored.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Parse an identifier taken from a request path.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidRequest`] if the input is empty,
    /// not an integer, or not positive.
    pub fn parse(raw: &str) -> Result<Self, ReservationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ReservationError::InvalidRequest(
                "Reservation ID is required".to_string(),
            ));
        }
        let id: i64 = raw.parse().map_err(|_| {
            ReservationError::InvalidRequest(format!("Invalid reservation ID: {raw}"))
        })?;
        if id <= 0 {
            return Err(ReservationError::InvalidRequest(format!(
                "Invalid reservation ID: {raw}"
            )));
        }
        Ok(Self(id))
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a user, owned by the user service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw user id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw id as stored.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated `[start, end)` booking window. `end` is strictly after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ReservationWindow {
    /// Validate and build a window.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidRequest`] if `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ReservationError> {
        if end <= start {
            return Err(ReservationError::InvalidRequest(format!(
                "end_time ({}) must be after start_time ({})",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Start of the booking.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End of the booking.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// A reservation that has not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewReservation {
    /// Who is booking.
    pub user_id: UserId,
    /// What is booked.
    pub vehicle_id: VehicleId,
    /// When.
    pub window: ReservationWindow,
}

/// A persisted reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Identity assigned on creation.
    pub id: ReservationId,
    /// Who booked.
    pub user_id: UserId,
    /// What was booked.
    pub vehicle_id: VehicleId,
    /// Start of the booking.
    pub start_time: DateTime<Utc>,
    /// End of the booking.
    pub end_time: DateTime<Utc>,
}

impl Reservation {
    /// Combine a store-assigned id with the booking request.
    #[must_use]
    pub const fn from_new(id: ReservationId, new: &NewReservation) -> Self {
        Self {
            id,
            user_id: new.user_id,
            vehicle_id: new.vehicle_id,
            start_time: new.window.start,
            end_time: new.window.end,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn window_requires_end_after_start() {
        assert!(ReservationWindow::new(at(10), at(12)).is_ok());
        assert!(matches!(
            ReservationWindow::new(at(12), at(10)),
            Err(ReservationError::InvalidRequest(_))
        ));
        assert!(matches!(
            ReservationWindow::new(at(10), at(10)),
            Err(ReservationError::InvalidRequest(_))
        ));
    }

    #[test]
    fn parse_reservation_id() {
        assert_eq!(ReservationId::parse("42").unwrap(), ReservationId::new(42));
        assert_eq!(ReservationId::parse(" 42 ").unwrap(), ReservationId::new(42));
    }

    #[test]
    fn parse_rejects_missing_or_bad_id() {
        for raw in ["", "   ", "abc", "0", "-3", "1.5"] {
            assert!(
                matches!(
                    ReservationId::parse(raw),
                    Err(ReservationError::InvalidRequest(_))
                ),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn reservation_json_shape() {
        let new = NewReservation {
            user_id: UserId::new(3),
            vehicle_id: VehicleId::new(7),
            window: ReservationWindow::new(at(10), at(12)).unwrap(),
        };
        let reservation = Reservation::from_new(ReservationId::new(1), &new);
        let json = serde_json::to_value(&reservation).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["user_id"], 3);
        assert_eq!(json["vehicle_id"], 7);
        assert_eq!(json["start_time"], "2025-01-01T10:00:00Z");
        assert_eq!(json["end_time"], "2025-01-01T12:00:00Z");
    }
}
