//! Mock provider implementations for testing.

pub mod user;

pub use user::MockUserRepository;
