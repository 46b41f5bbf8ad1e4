//! Registration and login handlers.

use crate::error::AuthError;
use crate::providers::UserRepository;
use crate::service::{AccountService, Registration};
use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use carshare_core::UserId;
use carshare_web::{AppError, JsonBody, handlers::health_check};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request body for `POST /register`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterRequest {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Optional contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// `Basic` or `Premium`, any case.
    pub membership_level: String,
}

/// Response after successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Confirmation message.
    pub message: String,
    /// The new account id.
    pub user_id: UserId,
}

/// Request body for `POST /login`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Response after successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Confirmation message.
    pub message: String,
    /// The authenticated account id.
    pub user_id: UserId,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidRequest(message) => Self::bad_request(message),
            AuthError::InvalidMembership(_) => {
                Self::new(StatusCode::BAD_REQUEST, err.to_string(), "INVALID_MEMBERSHIP")
            }
            AuthError::InvalidCredentials => Self::unauthorized(err.to_string()),
            AuthError::EmailTaken => Self::conflict(err.to_string()),
            AuthError::Hashing(_) => {
                Self::internal("Failed to hash password").with_source(anyhow::Error::new(err))
            }
            AuthError::Database(_) => {
                Self::internal("Unable to access user data").with_source(anyhow::Error::new(err))
            }
        }
    }
}

/// Register a new account.
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/json
///
/// {
///   "email": "ana@example.com",
///   "password": "hunter22",
///   "phone": "+65 1234 5678",
///   "membership_level": "Premium"
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "message": "User successfully registered", "user_id": 1 }
/// ```
///
/// # Errors
///
/// - `400` for a malformed body, email, or membership level
/// - `409` if the email is registered
/// - `500` on hashing or database failure
pub async fn register<R>(
    State(service): State<Arc<AccountService<R>>>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError>
where
    R: UserRepository + 'static,
{
    let user_id = service
        .register(Registration {
            email: request.email,
            password: request.password,
            phone: request.phone,
            membership_level: request.membership_level,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User successfully registered".to_string(),
            user_id,
        }),
    ))
}

/// Log in with email and password.
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// { "email": "ana@example.com", "password": "hunter22" }
/// ```
///
/// # Errors
///
/// - `400` for a malformed body
/// - `401` for an unknown email or wrong password
pub async fn login<R>(
    State(service): State<Arc<AccountService<R>>>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError>
where
    R: UserRepository + 'static,
{
    let user_id = service.login(&request.email, &request.password).await?;

    Ok(Json(LoginResponse {
        message: "User successfully logged in".to_string(),
        user_id,
    }))
}

/// Routes of the user service: `/register`, `/login`, `/health`.
pub fn account_router<R>(service: Arc<AccountService<R>>) -> Router
where
    R: UserRepository + 'static,
{
    Router::new()
        .route("/register", post(register::<R>))
        .route("/login", post(login::<R>))
        .route("/health", axum::routing::get(health_check))
        .with_state(service)
}
