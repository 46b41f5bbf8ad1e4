//! User repository trait.

use crate::error::Result;
use crate::membership::Membership;
use carshare_core::UserId;
use std::future::Future;

/// An account ready to be persisted. The password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Login email, unique across accounts.
    pub email: String,
    /// bcrypt hash of the password.
    pub password_hash: String,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Membership level.
    pub membership: Membership,
}

/// A persisted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Identity assigned on registration.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// bcrypt hash of the password.
    pub password_hash: String,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Membership level.
    pub membership: Membership,
}

/// User repository.
///
/// This trait abstracts over user database operations (`PostgreSQL`).
pub trait UserRepository: Send + Sync {
    /// Create user.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Email already exists → `AuthError::EmailTaken`
    /// - Database query fails → `AuthError::Database`
    fn create_user(&self, user: NewUser) -> impl Future<Output = Result<UserId>> + Send;

    /// Get user by email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Database` if the query fails.
    fn find_by_email(&self, email: &str) -> impl Future<Output = Result<Option<User>>> + Send;
}
