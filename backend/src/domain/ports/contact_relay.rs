//! Driven port used by the contact form to reach the relay endpoint.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::contact::{ContactSubmission, ContactSubmissionResult};

/// Fallback shown when the relay rejected a submission without a message.
pub const GENERIC_RETRY_MESSAGE: &str = "Something went wrong. Please try again.";

/// Shown when the relay could not be reached at all.
pub const CONNECTIVITY_MESSAGE: &str =
    "Unable to reach the server. Please check your connection and try again.";

define_port_error! {
    /// Failures submitting through the relay.
    pub enum RelayClientError {
        /// The relay could not be reached.
        Transport { message: String } =>
            "relay transport failed: {message}",
        /// The relay did not answer in time.
        Timeout { message: String } =>
            "relay request timed out: {message}",
        /// The relay answered with an error envelope.
        Rejected { status: u16, message: String } =>
            "relay rejected submission with status {status}: {message}",
        /// The relay answered success with an unreadable body.
        Decode { message: String } =>
            "relay response decode failed: {message}",
    }
}

impl RelayClientError {
    /// The single human-readable string surfaced to the form.
    ///
    /// # Examples
    /// ```
    /// use site_backend::domain::ports::{RelayClientError, CONNECTIVITY_MESSAGE};
    ///
    /// assert_eq!(RelayClientError::rejected(400_u16, "Bad subject").user_message(), "Bad subject");
    /// assert_eq!(RelayClientError::timeout("10s").user_message(), CONNECTIVITY_MESSAGE);
    /// ```
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Transport { .. } | Self::Timeout { .. } => CONNECTIVITY_MESSAGE.to_owned(),
            Self::Rejected { .. } | Self::Decode { .. } => GENERIC_RETRY_MESSAGE.to_owned(),
        }
    }
}

/// Port submitting one sanitised contact submission.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRelay: Send + Sync {
    /// Send `submission` and report the backend's verdict.
    async fn submit(
        &self,
        submission: &ContactSubmission,
    ) -> Result<ContactSubmissionResult, RelayClientError>;
}
