//! Contact form state machine.
//!
//! ```text
//! Idle --submit--> Submitting --ok--> Success --reset--> Idle
//!                             \--err-> Error   --reset--> Idle
//! ```
//!
//! Fields are validated eagerly as they change. Submission is refused while
//! the form is invalid or a submission is already in flight. A successful
//! relay clears the values; a failed one keeps them so nothing typed is lost.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::contact::{
    ContactField, ContactFormValues, ContactSubmission, ContactSubmissionResult, FieldError,
    validate_field,
};
use super::ports::{ContactRelay, GENERIC_RETRY_MESSAGE, RelayClientError};

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    /// Accepting input.
    #[default]
    Idle,
    /// A submission is in flight.
    Submitting,
    /// The backend accepted the submission.
    Success { message: String },
    /// The submission failed; values are preserved.
    Error { message: String },
}

impl FormStatus {
    /// Message to display in the status panel, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message } | Self::Error { message } => Some(message),
            Self::Idle | Self::Submitting => None,
        }
    }
}

/// Why a submit attempt did not start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(BTreeMap<ContactField, FieldError>),
    #[error("a submission is already in flight")]
    InFlight,
}

/// Contact form values, per-field errors and submit status.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    values: ContactFormValues,
    errors: BTreeMap<ContactField, FieldError>,
    status: FormStatus,
}

impl ContactForm {
    /// Empty, idle form.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &ContactFormValues {
        &self.values
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Error currently shown for `field`.
    pub fn error(&self, field: ContactField) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn errors(&self) -> &BTreeMap<ContactField, FieldError> {
        &self.errors
    }

    /// Update one field and re-validate it.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match validate_field(field, &value) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(error) => {
                self.errors.insert(field, error);
            }
        }
        self.values.set(field, value);
    }

    /// Whether every field currently validates.
    pub fn is_valid(&self) -> bool {
        self.values.validate().is_empty()
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(&self) -> bool {
        self.status != FormStatus::Submitting && self.is_valid()
    }

    /// Enter `Submitting` and return the sanitised payload to send.
    ///
    /// # Errors
    ///
    /// [`SubmitBlocked::InFlight`] while a submission is outstanding;
    /// [`SubmitBlocked::Invalid`] when any field fails validation, in which
    /// case every failing field is marked.
    pub fn begin_submit(&mut self) -> Result<ContactSubmission, SubmitBlocked> {
        if self.status == FormStatus::Submitting {
            return Err(SubmitBlocked::InFlight);
        }
        let submission = self.values.to_submission().map_err(|errors| {
            self.errors.clone_from(&errors);
            SubmitBlocked::Invalid(errors)
        })?;
        self.status = FormStatus::Submitting;
        Ok(submission.sanitized())
    }

    /// Apply the relay outcome.
    ///
    /// Outcomes arriving when no submission is in flight are ignored.
    pub fn finish_submit(&mut self, outcome: Result<ContactSubmissionResult, RelayClientError>) {
        if self.status != FormStatus::Submitting {
            debug!("ignoring relay outcome with no submission in flight");
            return;
        }
        self.status = match outcome {
            Ok(result) if result.success => {
                self.values = ContactFormValues::default();
                self.errors.clear();
                FormStatus::Success {
                    message: result.message,
                }
            }
            Ok(result) => FormStatus::Error {
                message: non_blank_or_retry(result.message),
            },
            Err(error) => {
                warn!(kind = error.kind(), error = %error, "contact submission failed");
                FormStatus::Error {
                    message: error.user_message(),
                }
            }
        };
    }

    /// Validate, sanitise, relay and record the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitBlocked`] without touching the network when the form
    /// cannot be submitted.
    pub async fn submit(&mut self, relay: &dyn ContactRelay) -> Result<&FormStatus, SubmitBlocked> {
        let submission = self.begin_submit()?;
        let outcome = relay.submit(&submission).await;
        self.finish_submit(outcome);
        Ok(&self.status)
    }

    /// Return to `Idle` from `Success` or `Error`.
    ///
    /// Values entered before a failed submission are kept. Returns `false`
    /// when there was nothing to reset.
    pub fn reset(&mut self) -> bool {
        match self.status {
            FormStatus::Success { .. } | FormStatus::Error { .. } => {
                self.status = FormStatus::Idle;
                true
            }
            FormStatus::Idle | FormStatus::Submitting => false,
        }
    }
}

fn non_blank_or_retry(message: String) -> String {
    if message.trim().is_empty() {
        GENERIC_RETRY_MESSAGE.to_owned()
    } else {
        message
    }
}
