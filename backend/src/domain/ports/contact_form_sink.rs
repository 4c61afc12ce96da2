//! Driven port forwarding contact payloads to the content backend.
//!
//! The sink is a pure pass-through: it wraps the payload for the backend's
//! contact-forms collection and reports what the backend answered. Shaping
//! that answer for clients is the relay endpoint's job.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::define_port_error;

/// Backend answer to a forwarded submission.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendReply {
    /// HTTP status returned by the backend.
    pub status: u16,
    /// Decoded JSON body. Unreadable error bodies are replaced by `{}`.
    pub body: Value,
}

impl BackendReply {
    /// Build a reply from a status and decoded body.
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Build a rejection whose body could not be decoded.
    pub fn without_body(status: u16) -> Self {
        Self::new(status, Value::Object(Map::new()))
    }

    /// Whether the backend accepted the record.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Non-blank `error.message` from a backend error body, if any.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use site_backend::domain::ports::BackendReply;
    ///
    /// let reply = BackendReply::new(400, json!({ "error": { "message": "Bad subject" } }));
    /// assert_eq!(reply.error_message(), Some("Bad subject"));
    /// assert_eq!(BackendReply::without_body(502).error_message(), None);
    /// ```
    pub fn error_message(&self) -> Option<&str> {
        self.body
            .pointer("/error/message")
            .and_then(Value::as_str)
            .filter(|message| !message.trim().is_empty())
    }
}

define_port_error! {
    /// Local failures while forwarding; the backend never answered usefully.
    pub enum ContactFormSinkError {
        /// Connection failed or dropped.
        Transport { message: String } =>
            "contact forward transport failed: {message}",
        /// The backend did not answer in time.
        Timeout { message: String } =>
            "contact forward timed out: {message}",
        /// A success response carried a body that is not JSON.
        Decode { message: String } =>
            "contact forward response decode failed: {message}",
    }
}

/// Port accepting raw contact payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactFormSink: Send + Sync {
    /// Forward `payload` as one new contact-form record.
    async fn forward(&self, payload: Value) -> Result<BackendReply, ContactFormSinkError>;
}
