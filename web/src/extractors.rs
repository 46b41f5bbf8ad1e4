//! Custom Axum extractors.
//!
//! - [`JsonBody`]: JSON request body whose rejections become `400` [`AppError`]s
//! - [`CorrelationId`]: the request correlation id
//!
//! # Examples
//!
//! ```ignore
//! async fn create(
//!     correlation_id: CorrelationId,
//!     JsonBody(request): JsonBody<CreateReservationRequest>,
//! ) -> Result<Json<Reservation>, AppError> {
//!     tracing::info!(correlation_id = %correlation_id.0, "Creating reservation");
//!     // ...
//! }
//! ```

use crate::error::AppError;
use crate::middleware::CORRELATION_ID_HEADER;
use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// JSON request body.
///
/// Behaves like [`axum::Json`] but malformed JSON, a wrong content type, or
/// missing fields respond with a `BAD_REQUEST` error body instead of axum's
/// plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Correlation ID for request tracing.
///
/// Uses the id stored by the correlation middleware when installed; otherwise
/// reads the `X-Correlation-ID` header, or generates a new UUID v4.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Uuid>() {
            return Ok(Self(*id));
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}
