//! Registration and login.

use crate::error::{AuthError, Result};
use crate::membership::Membership;
use crate::password::PasswordHasher;
use crate::providers::{NewUser, UserRepository};
use carshare_core::UserId;

/// Registration input, as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Membership level, any case.
    pub membership_level: String,
}

/// Account operations over an injected user repository.
#[derive(Debug)]
pub struct AccountService<R> {
    users: R,
    hasher: PasswordHasher,
}

impl<R: UserRepository> AccountService<R> {
    /// Create a service.
    #[must_use]
    pub const fn new(users: R, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    /// The underlying repository.
    #[must_use]
    pub const fn users(&self) -> &R {
        &self.users
    }

    /// Register a new account.
    ///
    /// The membership level is validated before any hashing work is done.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidRequest`] for a malformed email or empty password
    /// - [`AuthError::InvalidMembership`] for anything but basic/premium
    /// - [`AuthError::EmailTaken`] if the email is registered
    /// - [`AuthError::Hashing`] / [`AuthError::Database`] on system failures
    pub async fn register(&self, registration: Registration) -> Result<UserId> {
        let membership: Membership = registration.membership_level.parse()?;
        let email = validate_email(&registration.email)?;
        if registration.password.is_empty() {
            return Err(AuthError::InvalidRequest("Password is required".to_string()));
        }

        let password_hash = self.hasher.hash(&registration.password).await?;
        let phone = registration
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let user_id = self
            .users
            .create_user(NewUser {
                email: email.to_string(),
                password_hash,
                phone,
                membership,
            })
            .await?;

        metrics::counter!("users_registered_total").increment(1);
        tracing::info!(%user_id, email, %membership, "User registered");

        Ok(user_id)
    }

    /// Check credentials.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidCredentials`] for an unknown email or wrong password
    /// - [`AuthError::Hashing`] / [`AuthError::Database`] on system failures
    pub async fn login(&self, email: &str, password: &str) -> Result<UserId> {
        let result = self.check_credentials(email.trim(), password).await;

        let outcome = match &result {
            Ok(user_id) => {
                tracing::info!(%user_id, "User logged in");
                "success"
            }
            Err(AuthError::InvalidCredentials) => {
                tracing::info!("Login rejected: invalid credentials");
                "invalid_credentials"
            }
            Err(error) => {
                tracing::warn!(%error, "Login failed");
                "error"
            }
        };
        metrics::counter!("user_logins_total", "outcome" => outcome).increment(1);

        result
    }

    async fn check_credentials(&self, email: &str, password: &str) -> Result<UserId> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if self.hasher.verify(password, &user.password_hash).await? {
            Ok(user.id)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Minimal shape check: one `@` with a non-empty local part and a dotted domain.
fn validate_email(email: &str) -> Result<&str> {
    let email = email.trim();
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain
                .split('.')
                .filter(|label| !label.is_empty())
                .count()
                >= 2
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    }) && !email.contains(char::is_whitespace);

    if valid {
        Ok(email)
    } else {
        Err(AuthError::InvalidRequest(format!("Invalid email address: {email}")))
    }
}
