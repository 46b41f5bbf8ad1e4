//! Vehicles and their availability flag.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(i64);

impl VehicleId {
    /// Wrap a raw vehicle id.
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

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a vehicle can be booked.
///
/// Persisted as the strings `available` / `unavailable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// No active reservation references the vehicle.
    Available,
    /// Exactly one active reservation references the vehicle.
    Unavailable,
}

impl Availability {
    /// Convert to the database string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }

    /// Parse from the database string representation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the string is not a known state.
    pub fn parse(s: &str) -> Result<Self, StoreError> {
        match s {
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            other => Err(StoreError::Corrupt(format!(
                "Invalid availability state: {other}"
            ))),
        }
    }

    /// `true` for [`Availability::Available`].
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// A vehicle row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Vehicle identity.
    pub id: VehicleId,
    /// Model name.
    pub model: String,
    /// Current availability flag.
    pub availability: Availability,
}

/// The `{id, model}` projection returned by the availability listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableVehicle {
    /// Vehicle identity.
    pub id: VehicleId,
    /// Model name.
    pub model: String,
}

impl From<&Vehicle> for AvailableVehicle {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            model: vehicle.model.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn availability_roundtrip() {
        for state in [Availability::Available, Availability::Unavailable] {
            let parsed = Availability::parse(state.as_str()).expect("valid state should parse");
            assert_eq!(state, parsed);
        }
    }

    #[test]
    fn availability_rejects_unknown() {
        assert!(matches!(
            Availability::parse("maybe"),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn availability_serializes_lowercase() {
        let json = serde_json::to_string(&Availability::Unavailable).unwrap();
        assert_eq!(json, "\"unavailable\"");
    }

    #[test]
    fn available_vehicle_projection_drops_flag() {
        let vehicle = Vehicle {
            id: VehicleId::new(7),
            model: "Tesla Model 3".to_string(),
            availability: Availability::Available,
        };
        let json = serde_json::to_value(AvailableVehicle::from(&vehicle)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "model": "Tesla Model 3"}));
    }
}
