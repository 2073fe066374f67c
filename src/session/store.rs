//! Durable storage for the bearer token. The token is the only persisted
//! state: its absence means logged out.

use crate::error::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::debug;

/// Fixed key (file name) under which the token is stored.
pub const TOKEN_KEY: &str = "auth_token";

pub trait TokenStore: Send + Sync {
    /// Reads the stored token, `None` when logged out.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be read.
    fn load(&self) -> Result<Option<SecretString>>;

    /// # Errors
    /// Returns an error if the storage cannot be written.
    fn save(&self, token: &SecretString) -> Result<()>;

    /// Removes the stored token; clearing an empty store is not an error.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be modified.
    fn clear(&self) -> Result<()>;
}

/// Keeps the token in a single file readable only by the current user.
#[derive(Clone, Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<SecretString>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(SecretString::from(token.to_string())))
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, token: &SecretString) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, token.expose_secret())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        debug!("token stored in {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("token removed from {}", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-process store. Clones share the same slot.
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<SecretString>>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(SecretString::from(token.to_string())))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<SecretString>> {
        let slot = self.slot.lock().map_err(|_| Error::StorageUnavailable)?;
        Ok(slot.clone())
    }

    fn save(&self, token: &SecretString) -> Result<()> {
        let mut slot = self.slot.lock().map_err(|_| Error::StorageUnavailable)?;
        *slot = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self.slot.lock().map_err(|_| Error::StorageUnavailable)?;
        *slot = None;
        Ok(())
    }
}
