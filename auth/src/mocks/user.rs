//! Mock user repository for testing.

use crate::error::{AuthError, Result};
use crate::providers::{NewUser, User, UserRepository};
use carshare_core::UserId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Accounts {
    by_email: HashMap<String, User>,
    last_id: i64,
    fail_next: Option<String>,
}

/// Mock user repository.
///
/// Uses in-memory storage for testing. Clones share the same accounts.
#[derive(Debug, Clone, Default)]
pub struct MockUserRepository {
    accounts: Arc<Mutex<Accounts>>,
}

impl MockUserRepository {
    /// Create a new mock user repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next repository call fail with [`AuthError::Database`].
    pub fn fail_next(&self, message: impl Into<String>) {
        if let Ok(mut accounts) = self.accounts.lock() {
            accounts.fail_next = Some(message.into());
        }
    }

    /// Number of stored accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.lock().map(|a| a.by_email.len()).unwrap_or(0)
    }

    /// Whether no account is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn injected_failure(accounts: &mut Accounts) -> Result<()> {
        match accounts.fail_next.take() {
            Some(message) => Err(AuthError::Database(message)),
            None => Ok(()),
        }
    }
}

impl UserRepository for MockUserRepository {
    fn create_user(&self, user: NewUser) -> impl Future<Output = Result<UserId>> + Send {
        let accounts = Arc::clone(&self.accounts);

        async move {
            let mut accounts = accounts
                .lock()
                .map_err(|_| AuthError::Database("lock poisoned".to_string()))?;
            Self::injected_failure(&mut accounts)?;

            if accounts.by_email.contains_key(&user.email) {
                return Err(AuthError::EmailTaken);
            }

            accounts.last_id += 1;
            let id = UserId::new(accounts.last_id);
            accounts.by_email.insert(
                user.email.clone(),
                User {
                    id,
                    email: user.email,
                    password_hash: user.password_hash,
                    phone: user.phone,
                    membership: user.membership,
                },
            );

            Ok(id)
        }
    }

    fn find_by_email(&self, email: &str) -> impl Future<Output = Result<Option<User>>> + Send {
        let accounts = Arc::clone(&self.accounts);
        let email = email.to_string();

        async move {
            let mut accounts = accounts
                .lock()
                .map_err(|_| AuthError::Database("lock poisoned".to_string()))?;
            Self::injected_failure(&mut accounts)?;

            Ok(accounts.by_email.get(&email).cloned())
        }
    }
}
