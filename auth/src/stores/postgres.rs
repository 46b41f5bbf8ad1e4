//! `PostgreSQL` user repository implementation.
//!
//! # Example
//!
//! ```no_run
//! use carshare_auth::stores::PostgresUserRepository;
//! use sqlx::PgPool;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = PgPool::connect("postgresql://localhost/car_sharing_system").await?;
//! let repo = PostgresUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use crate::membership::Membership;
use crate::providers::{NewUser, User, UserRepository};
use carshare_core::UserId;
use sqlx::{PgPool, Row};
use std::future::Future;

/// `PostgreSQL` user repository over the `users` table.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    /// `PostgreSQL` connection pool.
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new `PostgreSQL` user repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl UserRepository for PostgresUserRepository {
    fn create_user(&self, user: NewUser) -> impl Future<Output = Result<UserId>> + Send {
        let pool = self.pool.clone();

        async move {
            let (id,): (i64,) = sqlx::query_as(
                r"
                INSERT INTO users (email, password, phone, membership_level)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                ",
            )
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.phone.as_deref())
            .bind(user.membership.as_str())
            .fetch_one(&pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::EmailTaken,
                other => AuthError::Database(format!("Failed to create user: {other}")),
            })?;

            Ok(UserId::new(id))
        }
    }

    fn find_by_email(&self, email: &str) -> impl Future<Output = Result<Option<User>>> + Send {
        let pool = self.pool.clone();
        let email = email.to_string();

        async move {
            let row = sqlx::query(
                r"
                SELECT id, email, password, phone, membership_level
                FROM users
                WHERE email = $1
                ",
            )
            .bind(&email)
            .fetch_optional(&pool)
            .await
            .map_err(|e| AuthError::Database(format!("Failed to get user: {e}")))?;

            let Some(row) = row else {
                return Ok(None);
            };

            let decode = |e: sqlx::Error| AuthError::Database(format!("Failed to decode user: {e}"));
            let membership: String = row.try_get("membership_level").map_err(decode)?;
            let membership: Membership = membership
                .parse()
                .map_err(|_| AuthError::Database(format!("Unknown membership level: {membership}")))?;

            Ok(Some(User {
                id: UserId::new(row.try_get("id").map_err(decode)?),
                email: row.try_get("email").map_err(decode)?,
                password_hash: row.try_get("password").map_err(decode)?,
                phone: row.try_get("phone").map_err(decode)?,
                membership,
            }))
        }
    }
}
