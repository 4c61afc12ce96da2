//! Backend for the studio marketing site.
//!
//! Loads page content from a headless CMS through a revalidating cache,
//! relays contact submissions to the CMS, and hosts the contact form's
//! validation and submission pipeline.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
