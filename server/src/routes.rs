//! Router configuration for the car-sharing services.

use crate::api::{reservations, vehicles};
use crate::state::AppState;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use carshare_core::{PaymentNotifier, ReservationStore};
use carshare_web::{AppError, correlation_id_layer, handlers::health_check};
use tower_http::trace::TraceLayer;

/// Build the reservation service router.
///
/// Routes:
/// - `GET /health`, `GET /metrics`
/// - `GET /vehicles`
/// - `POST /reservations`, `PUT /reservations`, `DELETE /reservations`
/// - `GET|PUT|DELETE /reservations/:id`
pub fn build_reservation_router<S, N>(state: AppState<S, N>) -> Router
where
    S: ReservationStore + 'static,
    N: PaymentNotifier + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics::<S, N>))
        .route("/vehicles", get(vehicles::list_vehicles::<S, N>))
        .route(
            "/reservations",
            post(reservations::create_reservation::<S, N>)
                .put(reservations::modify_reservation_from_body::<S, N>)
                .delete(reservations::cancel_without_id),
        )
        .route(
            "/reservations/:id",
            get(reservations::get_reservation::<S, N>)
                .put(reservations::modify_reservation::<S, N>)
                .delete(reservations::cancel_reservation::<S, N>),
        )
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wrap the user service routes with the shared middleware stack.
pub fn with_middleware(router: Router) -> Router {
    router
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
}

async fn render_metrics<S, N>(State(state): State<AppState<S, N>>) -> Result<String, AppError>
where
    S: ReservationStore + 'static,
    N: PaymentNotifier + 'static,
{
    state
        .metrics
        .as_ref()
        .map(metrics_exporter_prometheus::PrometheusHandle::render)
        .ok_or_else(|| {
            AppError::new(
                StatusCode::NOT_FOUND,
                "Metrics recorder is not installed",
                "NOT_FOUND",
            )
        })
}
