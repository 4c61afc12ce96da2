//! Credential stores backing the content client's bearer token.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use cap_std::{ambient_authority, fs::Dir};
use tracing::warn;
use zeroize::Zeroize;

use crate::domain::ports::{CredentialProvider, CredentialStoreError};

/// Process-local token holder.
#[derive(Debug, Default)]
pub struct InMemoryCredentials {
    token: RwLock<Option<String>>,
}

impl InMemoryCredentials {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    /// Replace the held token.
    pub fn store(&self, token: impl Into<String>) {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.as_mut() {
            previous.zeroize();
        }
        *slot = Some(token.into());
    }
}

impl CredentialProvider for InMemoryCredentials {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(mut token) = slot.take() {
            token.zeroize();
        }
        Ok(())
    }
}

/// Single-token file read before every request and removed on clear.
///
/// A missing file means no token.
#[derive(Debug)]
pub struct FileCredentialStore {
    dir: Dir,
    file_name: PathBuf,
    path: PathBuf,
}

impl FileCredentialStore {
    /// Open the directory holding `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialStoreError::Io`] when `path` has no file name or its
    /// directory cannot be opened.
    pub fn open(path: &Path) -> Result<Self, CredentialStoreError> {
        let file_name = path.file_name().ok_or_else(|| {
            CredentialStoreError::io(format!("{} does not name a file", path.display()))
        })?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|error| io_error(parent, &error))?;
        Ok(Self {
            dir,
            file_name: PathBuf::from(file_name),
            path: path.to_path_buf(),
        })
    }

    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialStoreError::Io`] when the file cannot be written.
    pub fn store(&self, token: &str) -> Result<(), CredentialStoreError> {
        self.dir
            .write(&self.file_name, token.as_bytes())
            .map_err(|error| io_error(&self.path, &error))
    }
}

impl CredentialProvider for FileCredentialStore {
    fn token(&self) -> Option<String> {
        match self.dir.read_to_string(&self.file_name) {
            Ok(mut raw) => {
                let token = raw.trim().to_owned();
                raw.zeroize();
                (!token.is_empty()).then_some(token)
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => None,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "credential file unreadable; sending no token");
                None
            }
        }
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(io_error(&self.path, &error)),
        }
    }
}

fn io_error(path: &Path, error: &io::Error) -> CredentialStoreError {
    CredentialStoreError::io(format!("{}: {error}", path.display()))
}
