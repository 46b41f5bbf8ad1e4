//! Provider traits for account storage.
//!
//! Implementations:
//! - `MockUserRepository` (feature `test-utils`): in-memory
//! - `PostgresUserRepository` (feature `postgres`): the `users` table

pub mod user;

pub use user::{NewUser, User, UserRepository};
