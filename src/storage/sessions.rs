//! In-memory implementation of SessionStore

use crate::core::error::{AuthError, StorageError};
use crate::core::service::{Session, SessionStore, User};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Account {
    id: i32,
    password: String,
    token: String,
}

#[derive(Debug, Default)]
struct Accounts {
    by_username: HashMap<String, Account>,
    by_token: HashMap<String, i32>,
}

/// In-memory session store
///
/// Users and tokens share one lock so a registration updates both maps
/// atomically. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    accounts: Arc<RwLock<Accounts>>,
}

impl InMemorySessionStore {
    /// Create an empty session store
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_token() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Read access for lookups that have no error channel
    ///
    /// Writes never leave the maps half-updated, so a poisoned lock still
    /// guards consistent data.
    fn read_recovering(&self) -> RwLockReadGuard<'_, Accounts> {
        self.accounts.read().unwrap_or_else(|poisoned| {
            tracing::warn!("session lock poisoned, reading recovered state");
            poisoned.into_inner()
        })
    }
}

fn session_for(username: &str, account: &Account) -> Session {
    Session {
        token: account.token.clone(),
        user: User {
            id: account.id,
            name: username.to_string(),
        },
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create_user(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StorageError::LockPoisoned("session"))?;

        if accounts.by_username.contains_key(username) {
            return Err(AuthError::UserExists {
                username: username.to_string(),
            });
        }

        let id = i32::try_from(accounts.by_username.len() + 1)
            .map_err(|_| StorageError::Exhausted("session"))?;
        let account = Account {
            id,
            password: password.to_string(),
            token: Self::issue_token(),
        };

        accounts.by_token.insert(account.token.clone(), id);
        let session = session_for(username, &account);
        accounts.by_username.insert(username.to_string(), account);

        tracing::debug!(user_id = id, "registered user");
        Ok(session)
    }

    async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StorageError::LockPoisoned("session"))?;

        match accounts.by_username.get(username) {
            Some(account) if account.password == password => Ok(session_for(username, account)),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn resolve_token(&self, token: &str) -> Option<i32> {
        self.read_recovering().by_token.get(token).copied()
    }

    async fn user_count(&self) -> usize {
        self.read_recovering().by_username.len()
    }
}
