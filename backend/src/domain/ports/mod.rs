//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_form_sink;
mod contact_relay;
mod content_source;
mod credential_provider;
mod page_cache;

#[cfg(test)]
pub use contact_form_sink::MockContactFormSink;
pub use contact_form_sink::{BackendReply, ContactFormSink, ContactFormSinkError};
#[cfg(test)]
pub use contact_relay::MockContactRelay;
pub use contact_relay::{
    CONNECTIVITY_MESSAGE, ContactRelay, GENERIC_RETRY_MESSAGE, RelayClientError,
};
#[cfg(test)]
pub use content_source::MockContentSource;
pub use content_source::{Collection, ContentSource, ContentSourceError, FixtureContentSource};
#[cfg(test)]
pub use credential_provider::MockCredentialProvider;
pub use credential_provider::{AnonymousCredentials, CredentialProvider, CredentialStoreError};
#[cfg(test)]
pub use page_cache::MockPageCache;
pub use page_cache::{CachedPage, NoopPageCache, PageCache};
