//! Driven port for reading collections from the remote content API.
//!
//! The domain names the collections it needs; adapters own the transport
//! (base URL, credentials, timeout) and hand back the raw JSON envelope so
//! the page loader can cache it before decoding into typed page models.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;
use crate::domain::content::PageContent;

/// Content collections consumed by the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    /// Landing page single type.
    Homepage,
    /// About page single type.
    About,
    /// Services overview single type.
    Service,
    /// Delivery process single type.
    Process,
    /// Portfolio single type.
    Work,
    /// Contact page single type.
    Contact,
    /// Site-wide settings (navigation, footer, SEO defaults).
    GlobalSettings,
    /// Write-only collection receiving contact submissions.
    ContactForms,
}

impl Collection {
    /// Path segment of the collection below the API base.
    ///
    /// # Examples
    /// ```
    /// use site_backend::domain::ports::Collection;
    ///
    /// assert_eq!(Collection::GlobalSettings.path(), "global-settings");
    /// ```
    pub const fn path(self) -> &'static str {
        match self {
            Self::Homepage => "homepage",
            Self::About => "about",
            Self::Service => "service",
            Self::Process => "process",
            Self::Work => "work",
            Self::Contact => "contact",
            Self::GlobalSettings => "global-settings",
            Self::ContactForms => "contact-forms",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

define_port_error! {
    /// Errors surfaced while fetching content.
    pub enum ContentSourceError {
        /// The request never reached the origin or the connection dropped.
        Transport { message: String } =>
            "content transport failed: {message}",
        /// The origin did not answer within the request timeout.
        Timeout { message: String } =>
            "content request timed out: {message}",
        /// The origin answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "content backend rejected request with status {status}: {message}",
        /// The response body was not a valid content envelope.
        Decode { message: String } =>
            "content response decode failed: {message}",
        /// The request could not be built (bad path or base URL).
        InvalidRequest { message: String } =>
            "content request invalid: {message}",
    }
}

impl ContentSourceError {
    /// Status code reported by the backend, when it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Port for reading one collection with all relations populated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the raw envelope for `collection`.
    async fn fetch(&self, collection: Collection)
    -> Result<PageContent<Value>, ContentSourceError>;
}

/// Fixture source answering every collection with an empty envelope.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContentSource;

#[async_trait]
impl ContentSource for FixtureContentSource {
    async fn fetch(
        &self,
        _collection: Collection,
    ) -> Result<PageContent<Value>, ContentSourceError> {
        Ok(PageContent::empty())
    }
}
