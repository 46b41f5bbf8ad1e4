//! Axum integration shared by the car-sharing services.
//!
//! Handlers stay thin: extract, call the domain, map the result.
//!
//! # Request Flow
//!
//! 1. **Correlation** id attached by [`correlation_id_layer`]
//! 2. **Extract** the body with [`JsonBody`] (rejections become `400`)
//! 3. **Call** the domain service
//! 4. **Map** domain errors into [`AppError`] and serialize the result
//!
//! # Example
//!
//! ```ignore
//! use carshare_web::{AppError, JsonBody, correlation_id_layer};
//!
//! async fn create(
//!     State(state): State<AppState>,
//!     JsonBody(request): JsonBody<CreateReservationRequest>,
//! ) -> Result<(StatusCode, Json<Created>), AppError> {
//!     let reservation = state.lifecycle.create_reservation(request.into()).await?;
//!     Ok((StatusCode::CREATED, Json(Created::from(reservation))))
//! }
//!
//! let app = Router::new()
//!     .route("/reservations", post(create))
//!     .layer(correlation_id_layer())
//!     .with_state(state);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

// Re-export key types for convenience
pub use error::{AppError, ErrorBody};
pub use extractors::{CorrelationId, JsonBody};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
