//! Error types for account operations.

use thiserror::Error;

/// Result type alias for account operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Failure modes of registration and login.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Malformed input (empty password, malformed email).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Membership level is neither `basic` nor `premium`.
    #[error("Invalid membership level '{0}'. It must be 'Basic' or 'Premium'.")]
    InvalidMembership(String),

    /// Unknown email or wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The email is already registered.
    #[error("Email already registered")]
    EmailTaken,

    /// Password hashing or verification failed.
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_message_names_valid_levels() {
        let err = AuthError::InvalidMembership("gold".into());
        assert_eq!(
            err.to_string(),
            "Invalid membership level 'gold'. It must be 'Basic' or 'Premium'."
        );
    }
}
