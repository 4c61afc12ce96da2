//! Outbound adapters implementing domain ports.
//!
//! - **cms**: reqwest clients for the remote content API (collection reads
//!   and contact-form forwarding).
//! - **relay_client**: the contact form's transport to `POST /api/contact`.
//! - **credentials**: bearer token stores.
//! - **cache**: in-process revalidating page cache.
//!
//! Adapters translate between transport and domain types and contain no
//! business logic.

pub mod cache;
pub mod cms;
pub mod credentials;
pub mod relay_client;
