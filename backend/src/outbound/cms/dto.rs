//! Wire shapes of content API error bodies.

use serde::Deserialize;

/// `{ "error": { "status", "name", "message" } }`
#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    pub(super) error: ErrorDetailDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorDetailDto {
    #[serde(default)]
    pub(super) name: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
}

impl ErrorEnvelopeDto {
    /// Parse `body`, yielding the non-blank backend message if present.
    pub(super) fn message_from(body: &[u8]) -> Option<String> {
        let envelope: Self = serde_json::from_slice(body).ok()?;
        let ErrorDetailDto { name, message } = envelope.error;
        match (message.filter(|m| !m.trim().is_empty()), name) {
            (Some(message), _) => Some(message),
            (None, Some(name)) if !name.trim().is_empty() => Some(name),
            _ => None,
        }
    }
}
