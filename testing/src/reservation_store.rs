//! In-memory [`ReservationStore`] for fast, deterministic tests.
//!
//! Each store operation takes a single lock for its whole duration, which gives
//! the same all-or-nothing behavior as the transactional Postgres store.

use carshare_core::reservation::{NewReservation, Reservation, ReservationId, ReservationWindow};
use carshare_core::store::ReservationStore;
use carshare_core::vehicle::{Availability, AvailableVehicle, Vehicle, VehicleId};
use carshare_core::StoreError;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Tables {
    vehicles: BTreeMap<VehicleId, Vehicle>,
    reservations: BTreeMap<ReservationId, Reservation>,
    last_reservation_id: i64,
    fail_writes: bool,
}

/// In-memory vehicle table and reservation ledger.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReservationStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryReservationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with available vehicles.
    #[must_use]
    pub fn with_vehicles<I, M>(vehicles: I) -> Self
    where
        I: IntoIterator<Item = (i64, M)>,
        M: Into<String>,
    {
        let store = Self::new();
        for (id, model) in vehicles {
            store.add_vehicle(VehicleId::new(id), model, Availability::Available);
        }
        store
    }

    /// Insert or replace a vehicle row.
    pub fn add_vehicle(&self, id: VehicleId, model: impl Into<String>, availability: Availability) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.vehicles.insert(
                id,
                Vehicle {
                    id,
                    model: model.into(),
                    availability,
                },
            );
        }
    }

    /// Make every subsequent write fail with [`StoreError::Database`].
    pub fn fail_writes(&self, fail: bool) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.fail_writes = fail;
        }
    }

    /// Snapshot of a vehicle row.
    #[must_use]
    pub fn vehicle(&self, id: VehicleId) -> Option<Vehicle> {
        self.tables.lock().ok()?.vehicles.get(&id).cloned()
    }

    /// Snapshot of every reservation row, ordered by id.
    #[must_use]
    pub fn reservations(&self) -> Vec<Reservation> {
        self.tables
            .lock()
            .map(|t| t.reservations.values().cloned().collect())
            .unwrap_or_default()
    }

    fn lock(tables: &Mutex<Tables>) -> Result<MutexGuard<'_, Tables>, StoreError> {
        tables
            .lock()
            .map_err(|_| StoreError::Database("store lock poisoned".to_string()))
    }

    fn check_writable(tables: &Tables) -> Result<(), StoreError> {
        if tables.fail_writes {
            return Err(StoreError::Database("injected write failure".to_string()));
        }
        Ok(())
    }
}

impl ReservationStore for InMemoryReservationStore {
    fn list_available_vehicles(
        &self,
    ) -> impl Future<Output = Result<Vec<AvailableVehicle>, StoreError>> + Send {
        let tables = Arc::clone(&self.tables);

        async move {
            let tables = Self::lock(&tables)?;
            Ok(tables
                .vehicles
                .values()
                .filter(|v| v.availability.is_available())
                .map(AvailableVehicle::from)
                .collect())
        }
    }

    fn book(
        &self,
        reservation: NewReservation,
    ) -> impl Future<Output = Result<Reservation, StoreError>> + Send {
        let tables = Arc::clone(&self.tables);

        async move {
            let mut tables = Self::lock(&tables)?;
            Self::check_writable(&tables)?;

            // Conditional claim: only an available vehicle can be flipped
            let vehicle = tables
                .vehicles
                .get_mut(&reservation.vehicle_id)
                .filter(|v| v.availability.is_available())
                .ok_or(StoreError::VehicleUnavailable(reservation.vehicle_id))?;
            vehicle.availability = Availability::Unavailable;

            tables.last_reservation_id += 1;
            let id = ReservationId::new(tables.last_reservation_id);
            let created = Reservation::from_new(id, &reservation);
            tables.reservations.insert(id, created.clone());

            Ok(created)
        }
    }

    fn get_reservation(
        &self,
        reservation_id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, StoreError>> + Send {
        let tables = Arc::clone(&self.tables);

        async move {
            Ok(Self::lock(&tables)?
                .reservations
                .get(&reservation_id)
                .cloned())
        }
    }

    fn reschedule(
        &self,
        reservation_id: ReservationId,
        window: ReservationWindow,
    ) -> impl Future<Output = Result<Reservation, StoreError>> + Send {
        let tables = Arc::clone(&self.tables);

        async move {
            let mut tables = Self::lock(&tables)?;
            Self::check_writable(&tables)?;

            let reservation = tables
                .reservations
                .get_mut(&reservation_id)
                .ok_or(StoreError::ReservationNotFound(reservation_id))?;
            reservation.start_time = window.start();
            reservation.end_time = window.end();

            Ok(reservation.clone())
        }
    }

    fn release(
        &self,
        reservation_id: ReservationId,
    ) -> impl Future<Output = Result<Reservation, StoreError>> + Send {
        let tables = Arc::clone(&self.tables);

        async move {
            let mut tables = Self::lock(&tables)?;
            Self::check_writable(&tables)?;

            let removed = tables
                .reservations
                .remove(&reservation_id)
                .ok_or(StoreError::ReservationNotFound(reservation_id))?;
            if let Some(vehicle) = tables.vehicles.get_mut(&removed.vehicle_id) {
                vehicle.availability = Availability::Available;
            }

            Ok(removed)
        }
    }
}
