//! `PostgreSQL`-backed [`ReservationStore`].

use carshare_core::reservation::{
    NewReservation, Reservation, ReservationId, ReservationWindow, UserId,
};
use carshare_core::store::ReservationStore;
use carshare_core::vehicle::{AvailableVehicle, VehicleId};
use carshare_core::StoreError;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::future::Future;

/// Reservation store over the `vehicles` and `reservations` tables.
///
/// Cloning is cheap; clones share the same pool.
///
/// # Example
///
/// ```no_run
/// use carshare_postgres::PostgresReservationStore;
/// use carshare_core::ReservationStore;
///
/// # async fn example(pool: sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let store = PostgresReservationStore::new(pool);
/// for vehicle in store.list_available_vehicles().await? {
///     println!("{}: {}", vehicle.id, vehicle.model);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PostgresReservationStore {
    pool: PgPool,
}

impl PostgresReservationStore {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn database_error(operation: &'static str) -> impl Fn(sqlx::Error) -> StoreError {
    move |e| {
        metrics::counter!("reservation_store_errors_total", "operation" => operation)
            .increment(1);
        tracing::error!(operation, error = %e, "Reservation store query failed");
        StoreError::Database(e.to_string())
    }
}

fn decode_error(e: sqlx::Error) -> StoreError {
    StoreError::Corrupt(e.to_string())
}

fn reservation_from_row(row: &PgRow) -> Result<Reservation, StoreError> {
    Ok(Reservation {
        id: ReservationId::new(row.try_get("id").map_err(decode_error)?),
        user_id: UserId::new(row.try_get("user_id").map_err(decode_error)?),
        vehicle_id: VehicleId::new(row.try_get("vehicle_id").map_err(decode_error)?),
        start_time: row.try_get("start_time").map_err(decode_error)?,
        end_time: row.try_get("end_time").map_err(decode_error)?,
    })
}

fn available_vehicle_from_row(row: &PgRow) -> Result<AvailableVehicle, StoreError> {
    Ok(AvailableVehicle {
        id: VehicleId::new(row.try_get("id").map_err(decode_error)?),
        model: row.try_get("model").map_err(decode_error)?,
    })
}

impl ReservationStore for PostgresReservationStore {
    fn list_available_vehicles(
        &self,
    ) -> impl Future<Output = Result<Vec<AvailableVehicle>, StoreError>> + Send {
        let pool = self.pool.clone();

        async move {
            let rows = sqlx::query(
                "SELECT id, model FROM vehicles WHERE is_available = 'available' ORDER BY id",
            )
            .fetch_all(&pool)
            .await
            .map_err(database_error("list_available_vehicles"))?;

            rows.iter().map(available_vehicle_from_row).collect()
        }
    }

    fn book(
        &self,
        reservation: NewReservation,
    ) -> impl Future<Output = Result<Reservation, StoreError>> + Send {
        let pool = self.pool.clone();

        async move {
            let on_error = database_error("book");
            let mut tx = pool.begin().await.map_err(&on_error)?;

            // Row lock serializes concurrent claims; the loser re-evaluates the
            // predicate after the winner commits and matches nothing.
            let claimed = sqlx::query(
                "UPDATE vehicles SET is_available = 'unavailable' \
                 WHERE id = $1 AND is_available = 'available'",
            )
            .bind(reservation.vehicle_id.get())
            .execute(&mut *tx)
            .await
            .map_err(&on_error)?;

            if claimed.rows_affected() == 0 {
                tx.rollback().await.map_err(&on_error)?;
                tracing::debug!(
                    vehicle_id = %reservation.vehicle_id,
                    "Vehicle claim matched no available row"
                );
                return Err(StoreError::VehicleUnavailable(reservation.vehicle_id));
            }

            let (id,): (i64,) = sqlx::query_as(
                "INSERT INTO reservations (user_id, vehicle_id, start_time, end_time) \
                 VALUES ($1, $2, $3, $4) RETURNING id",
            )
            .bind(reservation.user_id.get())
            .bind(reservation.vehicle_id.get())
            .bind(reservation.window.start())
            .bind(reservation.window.end())
            .fetch_one(&mut *tx)
            .await
            .map_err(&on_error)?;

            tx.commit().await.map_err(&on_error)?;

            Ok(Reservation::from_new(ReservationId::new(id), &reservation))
        }
    }

    fn get_reservation(
        &self,
        reservation_id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, StoreError>> + Send {
        let pool = self.pool.clone();

        async move {
            let row = sqlx::query(
                "SELECT id, user_id, vehicle_id, start_time, end_time \
                 FROM reservations WHERE id = $1",
            )
            .bind(reservation_id.get())
            .fetch_optional(&pool)
            .await
            .map_err(database_error("get_reservation"))?;

            row.as_ref().map(reservation_from_row).transpose()
        }
    }

    fn reschedule(
        &self,
        reservation_id: ReservationId,
        window: ReservationWindow,
    ) -> impl Future<Output = Result<Reservation, StoreError>> + Send {
        let pool = self.pool.clone();

        async move {
            let row = sqlx::query(
                "UPDATE reservations SET start_time = $2, end_time = $3 WHERE id = $1 \
                 RETURNING id, user_id, vehicle_id, start_time, end_time",
            )
            .bind(reservation_id.get())
            .bind(window.start())
            .bind(window.end())
            .fetch_optional(&pool)
            .await
            .map_err(database_error("reschedule"))?;

            match row {
                Some(row) => reservation_from_row(&row),
                None => Err(StoreError::ReservationNotFound(reservation_id)),
            }
        }
    }

    fn release(
        &self,
        reservation_id: ReservationId,
    ) -> impl Future<Output = Result<Reservation, StoreError>> + Send {
        let pool = self.pool.clone();

        async move {
            let on_error = database_error("release");
            let mut tx = pool.begin().await.map_err(&on_error)?;

            sqlx::query(
                "UPDATE vehicles v SET is_available = 'available' \
                 FROM reservations r WHERE r.vehicle_id = v.id AND r.id = $1",
            )
            .bind(reservation_id.get())
            .execute(&mut *tx)
            .await
            .map_err(&on_error)?;

            let deleted = sqlx::query(
                "DELETE FROM reservations WHERE id = $1 \
                 RETURNING id, user_id, vehicle_id, start_time, end_time",
            )
            .bind(reservation_id.get())
            .fetch_optional(&mut *tx)
            .await
            .map_err(&on_error)?;

            let Some(row) = deleted else {
                tx.rollback().await.map_err(&on_error)?;
                return Err(StoreError::ReservationNotFound(reservation_id));
            };
            let reservation = reservation_from_row(&row)?;

            tx.commit().await.map_err(&on_error)?;

            Ok(reservation)
        }
    }
}
