//! # Carshare Accounts
//!
//! User registration and login for the car-sharing platform.
//!
//! ## Features
//!
//! - **Membership**: `basic` or `premium`, accepted in any case, stored lowercase
//! - **Password hashing**: bcrypt on the blocking pool
//! - **Repository seam**: [`providers::UserRepository`] with in-memory
//!   (`test-utils`) and `PostgreSQL` (`postgres`) implementations
//! - **HTTP handlers**: `POST /register`, `POST /login` (`axum`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use carshare_auth::{AccountService, PasswordHasher, Registration};
//!
//! let service = AccountService::new(repository, PasswordHasher::new(12));
//!
//! let user_id = service.register(Registration {
//!     email: "ana@example.com".into(),
//!     password: "hunter22".into(),
//!     phone: None,
//!     membership_level: "Premium".into(),
//! }).await?;
//!
//! assert_eq!(service.login("ana@example.com", "hunter22").await?, user_id);
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod error;
pub mod membership;
pub mod password;
pub mod providers;
pub mod service;
pub mod stores;

#[cfg(feature = "axum")]
pub mod handlers;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use error::{AuthError, Result};
pub use membership::Membership;
pub use password::PasswordHasher;
pub use service::{AccountService, Registration};
