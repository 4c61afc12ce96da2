//! Driven port for the bearer credential attached to content requests.
//!
//! The content client reads the token before every request and clears it when
//! the backend answers 401. Redirecting the user to sign in again is a UI
//! concern and does not belong here.

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential stores.
    pub enum CredentialStoreError {
        /// The backing store could not be read or written.
        Io { message: String } =>
            "credential store I/O failed: {message}",
    }
}

/// Source of the optional bearer token.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialProvider: Send + Sync {
    /// Current token, or `None` when the user has not signed in.
    fn token(&self) -> Option<String>;

    /// Forget the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialStoreError`] when the backing store cannot be
    /// updated.
    fn clear(&self) -> Result<(), CredentialStoreError>;
}

/// Provider that never holds a token.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnonymousCredentials;

impl CredentialProvider for AnonymousCredentials {
    fn token(&self) -> Option<String> {
        None
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        Ok(())
    }
}
