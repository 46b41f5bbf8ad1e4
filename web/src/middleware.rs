//! Correlation ID middleware.
//!
//! A caller-supplied `X-Correlation-ID` is kept when it parses as a UUID;
//! anything else is replaced with a fresh one. The id lands in request
//! extensions for [`CorrelationId`](crate::CorrelationId), tags the
//! `http_request` span, and is echoed on every response.
//!
//! # Example
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/vehicles", get(list_vehicles))
//!     .layer(correlation_id_layer());
//! ```

use axum::{extract::Request, http::HeaderValue, response::Response};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Create a layer that adds correlation ID tracking to all requests.
#[must_use]
pub const fn correlation_id_layer() -> CorrelationIdLayer {
    CorrelationIdLayer
}

/// Layer for correlation ID tracking.
#[derive(Clone, Copy, Debug)]
pub struct CorrelationIdLayer;

impl<S> Layer<S> for CorrelationIdLayer {
    type Service = CorrelationIdMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorrelationIdMiddleware { inner }
    }
}

/// Middleware service for correlation ID tracking.
#[derive(Clone, Debug)]
pub struct CorrelationIdMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for CorrelationIdMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let correlation_id = req
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        req.extensions_mut().insert(correlation_id);

        let span = tracing::info_span!(
            "http_request",
            correlation_id = %correlation_id,
            method = %req.method(),
            uri = %req.uri(),
        );

        let fut = self.inner.call(req);

        Box::pin(async move {
            let mut response = fut.instrument(span).await?;

            if let Ok(header_value) = HeaderValue::from_str(&correlation_id.to_string()) {
                response
                    .headers_mut()
                    .insert(CORRELATION_ID_HEADER, header_value);
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::extractors::CorrelationId;
    use axum::{Router, body::Body, routing::get};
    use tower::ServiceExt;

    fn vehicles_app() -> Router {
        Router::new()
            .route("/vehicles", get(|| async { "[]" }))
            .route(
                "/reservations/:id",
                get(|id: CorrelationId| async move { id.0.to_string() }),
            )
            .layer(correlation_id_layer())
    }

    async fn get_with(uri: &str, correlation: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = correlation {
            builder = builder.header(CORRELATION_ID_HEADER, value);
        }
        vehicles_app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    fn echoed(response: &Response) -> Uuid {
        let raw = response.headers().get(CORRELATION_ID_HEADER).unwrap();
        Uuid::parse_str(raw.to_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn fresh_id_when_header_absent() {
        let first = get_with("/vehicles", None).await;
        let second = get_with("/vehicles", None).await;

        assert_ne!(echoed(&first), echoed(&second));
    }

    #[tokio::test]
    async fn caller_id_is_kept() {
        let id = Uuid::new_v4();

        let response = get_with("/vehicles", Some(&id.to_string())).await;

        assert_eq!(echoed(&response), id);
    }

    #[tokio::test]
    async fn handler_extracts_echoed_id() {
        let response = get_with("/reservations/11", None).await;
        let id = echoed(&response);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        assert_eq!(bytes, id.to_string());
    }

    #[tokio::test]
    async fn malformed_header_is_replaced() {
        let response = get_with("/vehicles", Some("reservation-11")).await;

        assert_ne!(echoed(&response).to_string(), "reservation-11");
    }
}
