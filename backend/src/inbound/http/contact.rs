//! Contact relay endpoint.
//!
//! ```text
//! POST /api/contact  Forward a contact submission to the content backend
//! ```
//!
//! The relay is a pass-through: the JSON body is forwarded verbatim and the
//! backend's verdict is normalised into the uniform error envelope. No
//! credentials are forwarded.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, post, web};
use futures_util::StreamExt;
use serde_json::Value;
use tracing::{error, info, warn};

use super::error::{ApiError, ApiResult, ErrorBody};
use super::state::HttpState;
use crate::domain::ContactSubmission;

/// Message used when the backend rejected a submission without saying why.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Failed to submit contact form";

/// Largest contact body accepted, in bytes.
pub const MAX_CONTACT_BODY_BYTES: usize = 256 * 1024;

/// Message for bodies over [`MAX_CONTACT_BODY_BYTES`].
pub const BODY_TOO_LARGE_MESSAGE: &str = "Contact submission is too large";

/// Relay a contact submission.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactSubmission,
    tags = ["contact"],
    responses(
        (status = 200, description = "Backend accepted the submission; its JSON body is passed through"),
        (status = 400, description = "Backend rejected the submission", body = ErrorBody),
        (status = 413, description = "Body exceeds the size limit", body = ErrorBody),
        (status = 500, description = "Relay failure", body = ErrorBody)
    )
)]
#[post("/contact")]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let body = read_limited(payload).await?;
    let submission: Value = serde_json::from_slice(&body).map_err(|err| {
        error!(error = %err, "contact payload is not valid JSON");
        ApiError::internal()
    })?;

    let reply = state.contact_forms.forward(submission).await.map_err(|err| {
        error!(kind = err.kind(), error = %err, "contact forward failed");
        ApiError::internal()
    })?;

    if reply.is_success() {
        info!(status = reply.status, "contact submission accepted");
        return Ok(HttpResponse::Ok().json(reply.body));
    }

    warn!(status = reply.status, "content backend rejected contact submission");
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let message = reply.error_message().unwrap_or(DEFAULT_REJECTION_MESSAGE);
    Err(ApiError::new(status, message))
}

async fn read_limited(mut payload: web::Payload) -> ApiResult<web::BytesMut> {
    let mut body = web::BytesMut::new();
    while let Some(item) = payload.next().await {
        let chunk = item.map_err(|err| {
            error!(error = %err, "contact payload could not be read");
            ApiError::internal()
        })?;
        if body.len() + chunk.len() > MAX_CONTACT_BODY_BYTES {
            warn!(limit = MAX_CONTACT_BODY_BYTES, "contact payload too large");
            return Err(ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, BODY_TOO_LARGE_MESSAGE));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
