//! Reservation endpoints.
//!
//! - POST /reservations - Book a vehicle
//! - GET /reservations/:id - Read a reservation
//! - PUT /reservations/:id - Change the booking window
//! - PUT /reservations - Same, with the id in the body
//! - DELETE /reservations/:id - Cancel and release the vehicle

use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use carshare_core::{
    CreateReservation, DateTime, ModifyReservation, PaymentNotifier, Reservation, ReservationError,
    ReservationId, ReservationStore, UserId, Utc, VehicleId,
};
use carshare_web::{AppError, CorrelationId, JsonBody};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to book a vehicle.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateReservationRequest {
    /// Who is booking
    pub user_id: UserId,
    /// Vehicle to book
    pub vehicle_id: VehicleId,
    /// Booking start (RFC 3339)
    pub start_time: DateTime<Utc>,
    /// Booking end (RFC 3339)
    pub end_time: DateTime<Utc>,
}

/// Request to change the booking window.
///
/// `id` is only read by `PUT /reservations`; the path id wins otherwise.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModifyReservationRequest {
    /// Reservation to change
    #[serde(default)]
    pub id: Option<i64>,
    /// New start
    pub start_time: DateTime<Utc>,
    /// New end
    pub end_time: DateTime<Utc>,
}

/// Response carrying the affected reservation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReservationResponse {
    /// Outcome message
    pub message: String,
    /// The reservation after the operation
    pub reservation: Reservation,
}

impl ReservationResponse {
    fn new(message: &str, reservation: Reservation) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
            reservation,
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Book a vehicle.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/reservations \
///   -H "Content-Type: application/json" \
///   -d '{
///     "user_id": 3,
///     "vehicle_id": 7,
///     "start_time": "2025-01-01T10:00:00Z",
///     "end_time": "2025-01-01T12:00:00Z"
///   }'
/// ```
///
/// # Errors
///
/// - `400` for a malformed body, invalid window, or unavailable vehicle
/// - `500` if the store fails
pub async fn create_reservation<S, N>(
    State(state): State<AppState<S, N>>,
    correlation_id: CorrelationId,
    JsonBody(request): JsonBody<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), AppError>
where
    S: ReservationStore + 'static,
    N: PaymentNotifier + 'static,
{
    tracing::debug!(
        correlation_id = %correlation_id.0,
        vehicle_id = %request.vehicle_id,
        "Creating reservation"
    );

    let reservation = state
        .lifecycle
        .create_reservation(CreateReservation {
            user_id: request.user_id,
            vehicle_id: request.vehicle_id,
            start_time: request.start_time,
            end_time: request.end_time,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        ReservationResponse::new("Reservation created successfully", reservation),
    ))
}

/// Read a reservation.
///
/// # Errors
///
/// - `400` for a malformed id
/// - `404` if the reservation does not exist
pub async fn get_reservation<S, N>(
    State(state): State<AppState<S, N>>,
    Path(id): Path<String>,
) -> Result<Json<Reservation>, AppError>
where
    S: ReservationStore + 'static,
    N: PaymentNotifier + 'static,
{
    let reservation_id = ReservationId::parse(&id)?;
    let reservation = state.lifecycle.get_reservation(reservation_id).await?;
    Ok(Json(reservation))
}

/// Change the booking window of the reservation named in the path.
///
/// # Errors
///
/// - `400` for a malformed id, body, or window
/// - `404` if the reservation does not exist
/// - `500` if the store fails
pub async fn modify_reservation<S, N>(
    State(state): State<AppState<S, N>>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<ModifyReservationRequest>,
) -> Result<Json<ReservationResponse>, AppError>
where
    S: ReservationStore + 'static,
    N: PaymentNotifier + 'static,
{
    let reservation_id = ReservationId::parse(&id)?;
    modify(&state, reservation_id, &request).await
}

/// Change the booking window of the reservation named in the body's `id`.
///
/// # Errors
///
/// Same as [`modify_reservation`]; a missing `id` is a `400`.
pub async fn modify_reservation_from_body<S, N>(
    State(state): State<AppState<S, N>>,
    JsonBody(request): JsonBody<ModifyReservationRequest>,
) -> Result<Json<ReservationResponse>, AppError>
where
    S: ReservationStore + 'static,
    N: PaymentNotifier + 'static,
{
    let reservation_id = request
        .id
        .map(ReservationId::new)
        .ok_or_else(id_required)?;
    modify(&state, reservation_id, &request).await
}

async fn modify<S, N>(
    state: &AppState<S, N>,
    reservation_id: ReservationId,
    request: &ModifyReservationRequest,
) -> Result<Json<ReservationResponse>, AppError>
where
    S: ReservationStore + 'static,
    N: PaymentNotifier + 'static,
{
    let reservation = state
        .lifecycle
        .modify_reservation(ModifyReservation {
            reservation_id,
            start_time: request.start_time,
            end_time: request.end_time,
        })
        .await?;

    Ok(ReservationResponse::new(
        "Reservation updated successfully",
        reservation,
    ))
}

/// Cancel a reservation and release its vehicle.
///
/// # Errors
///
/// - `400` for a malformed id
/// - `404` if the reservation does not exist
/// - `500` if the store fails
pub async fn cancel_reservation<S, N>(
    State(state): State<AppState<S, N>>,
    Path(id): Path<String>,
) -> Result<Json<ReservationResponse>, AppError>
where
    S: ReservationStore + 'static,
    N: PaymentNotifier + 'static,
{
    let reservation_id = ReservationId::parse(&id)?;
    let reservation = state.lifecycle.cancel_reservation(reservation_id).await?;

    Ok(ReservationResponse::new(
        "Reservation canceled successfully",
        reservation,
    ))
}

/// `DELETE /reservations` without an id.
///
/// # Errors
///
/// Always `400`.
#[allow(clippy::unused_async)] // axum handlers must be async
pub async fn cancel_without_id() -> AppError {
    id_required()
}

fn id_required() -> AppError {
    ReservationError::InvalidRequest("Reservation ID is required".to_string()).into()
}
