//! OpenAPI document for the HTTP surface.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary for external tooling.

use utoipa::OpenApi;

use crate::domain::contact::{ContactSubmission, ContactSubmissionResult};
use crate::inbound::http::error::{ErrorBody, ErrorDetail};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Site backend API",
        description = "Content pages loaded from the headless CMS, the contact relay and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::contact::submit_contact,
        crate::inbound::http::pages::get_global_settings,
        crate::inbound::http::pages::get_page,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ContactSubmission, ContactSubmissionResult, ErrorBody, ErrorDetail)),
    tags(
        (name = "contact", description = "Contact form relay"),
        (name = "pages", description = "Cached page content"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
