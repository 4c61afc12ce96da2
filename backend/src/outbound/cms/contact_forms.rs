//! Forwarder for the backend's `contact-forms` collection.
//!
//! Posts `{ "data": <payload> }` without credentials and reports the backend's
//! status and body. Error bodies are tolerated: anything that is not JSON is
//! replaced by an empty object.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{Value, json};
use tracing::debug;

use super::{ClientBuildError, endpoint_url};
use crate::domain::ports::{BackendReply, Collection, ContactFormSink, ContactFormSinkError};

/// [`ContactFormSink`] posting to `{api_base}/contact-forms`.
pub struct ContactFormsForwarder {
    client: Client,
    endpoint: Url,
}

impl ContactFormsForwarder {
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] when the endpoint URL or the reqwest
    /// client cannot be built.
    pub fn new(api_base: &Url, timeout: Duration) -> Result<Self, ClientBuildError> {
        let endpoint = endpoint_url(api_base, Collection::ContactForms.path())?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl ContactFormSink for ContactFormsForwarder {
    async fn forward(&self, payload: Value) -> Result<BackendReply, ContactFormSinkError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&json!({ "data": payload }))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status, bytes = body.len(), "contact form forwarded");

        if !(200..300).contains(&status) {
            let reply = match serde_json::from_slice::<Value>(body.as_ref()) {
                Ok(body) => BackendReply::new(status, body),
                Err(_) => BackendReply::without_body(status),
            };
            return Ok(reply);
        }
        if body.is_empty() {
            return Ok(BackendReply::without_body(status));
        }
        let body = serde_json::from_slice(body.as_ref()).map_err(|error| {
            ContactFormSinkError::decode(format!("invalid contact-forms response: {error}"))
        })?;
        Ok(BackendReply::new(status, body))
    }
}

fn map_transport_error(error: reqwest::Error) -> ContactFormSinkError {
    if error.is_timeout() {
        ContactFormSinkError::timeout(error.to_string())
    } else {
        ContactFormSinkError::transport(error.to_string())
    }
}
