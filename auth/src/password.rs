//! bcrypt password hashing.
//!
//! bcrypt is CPU-bound, so both hashing and verification run on the
//! blocking thread pool.

use crate::error::{AuthError, Result};

/// bcrypt cost used when none is configured.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Hashes and verifies passwords with a fixed bcrypt cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher {
    /// Create a hasher. Costs outside bcrypt's `4..=31` range are clamped.
    #[must_use]
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }

    /// The bcrypt cost factor in use.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plain-text password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Hashing`] if bcrypt fails or the worker panics.
    pub async fn hash(&self, password: &str) -> Result<String> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Check a plain-text password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Hashing`] if the stored hash is malformed or the
    /// worker panics.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }
}
