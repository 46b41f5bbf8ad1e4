//! Vehicle availability endpoint.

use crate::state::AppState;
use axum::{Json, extract::State};
use carshare_core::{AvailableVehicle, PaymentNotifier, ReservationStore};
use carshare_web::AppError;

/// List vehicles that can currently be booked.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8080/vehicles
/// # [{"id":7,"model":"Tesla Model 3"}]
/// ```
///
/// # Errors
///
/// Returns `500` if the store read fails.
pub async fn list_vehicles<S, N>(
    State(state): State<AppState<S, N>>,
) -> Result<Json<Vec<AvailableVehicle>>, AppError>
where
    S: ReservationStore + 'static,
    N: PaymentNotifier + 'static,
{
    let vehicles = state.lifecycle.list_available_vehicles().await?;
    Ok(Json(vehicles))
}
