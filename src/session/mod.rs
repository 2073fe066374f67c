//! Session state owned by the application controller. The token is restored
//! from a [`TokenStore`] at startup and written back on login; the user is kept
//! in memory only. A user is never held without a token.

pub mod store;

pub use self::store::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};

use crate::{api::User, error::Result};
use secrecy::SecretString;
use tracing::debug;

pub struct Session {
    token: Option<SecretString>,
    user: Option<User>,
    store: Box<dyn TokenStore>,
}

impl Session {
    /// Restores the session token from `store`.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn restore(store: Box<dyn TokenStore>) -> Result<Self> {
        let token = store.load()?;
        debug!("session restored, token present: {}", token.is_some());

        Ok(Self {
            token,
            user: None,
            store,
        })
    }

    #[must_use]
    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Persists `token` and records `user`.
    ///
    /// # Errors
    /// Returns an error if the token cannot be persisted; the in-memory state
    /// is left untouched in that case.
    pub fn establish(&mut self, token: SecretString, user: User) -> Result<()> {
        self.store.save(&token)?;
        self.token = Some(token);
        self.user = Some(user);
        Ok(())
    }

    /// Attaches a verified user to the current token. Returns `false` and
    /// leaves the session unchanged when there is no token.
    pub fn attach_user(&mut self, user: User) -> bool {
        if self.token.is_none() {
            return false;
        }
        self.user = Some(user);
        true
    }

    /// Drops the token and user, both in memory and in the store.
    ///
    /// # Errors
    /// Returns an error if the stored token cannot be removed; the in-memory
    /// session is cleared regardless.
    pub fn clear(&mut self) -> Result<()> {
        self.token = None;
        self.user = None;
        self.store.clear()
    }
}
