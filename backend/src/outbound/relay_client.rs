//! HTTP transport used by the contact form to reach the relay endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::domain::contact::{ContactSubmission, ContactSubmissionResult};
use crate::domain::ports::{ContactRelay, RelayClientError};

/// Confirmation shown when the backend accepted a submission silently.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";

/// [`ContactRelay`] posting JSON to the same-origin `/api/contact` endpoint.
pub struct HttpContactRelay {
    client: Client,
    endpoint: Url,
}

impl HttpContactRelay {
    /// # Errors
    ///
    /// Returns the reqwest error when the client cannot be built.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl ContactRelay for HttpContactRelay {
    async fn submit(
        &self,
        submission: &ContactSubmission,
    ) -> Result<ContactSubmissionResult, RelayClientError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(body.as_ref())
                .ok()
                .as_ref()
                .and_then(|body| non_blank_str(body, "/error/message"))
                .unwrap_or_default();
            return Err(RelayClientError::rejected(status.as_u16(), message));
        }

        let body: Value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(body.as_ref()).map_err(|error| {
                RelayClientError::decode(format!("invalid relay response: {error}"))
            })?
        };
        Ok(ContactSubmissionResult {
            id: record_id(&body),
            success: true,
            message: non_blank_str(&body, "/message")
                .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_owned()),
        })
    }
}

fn non_blank_str(body: &Value, pointer: &str) -> Option<String> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_owned)
}

fn record_id(body: &Value) -> Option<String> {
    ["/data/id", "/data/documentId"]
        .into_iter()
        .find_map(|pointer| match body.pointer(pointer)? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        })
}

fn map_transport_error(error: reqwest::Error) -> RelayClientError {
    if error.is_timeout() {
        RelayClientError::timeout(error.to_string())
    } else {
        RelayClientError::transport(error.to_string())
    }
}
