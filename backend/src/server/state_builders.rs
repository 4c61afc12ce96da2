//! Adapter wiring for [`HttpState`].

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use site_backend::domain::PageLoader;
use site_backend::domain::ports::CredentialProvider;
use site_backend::inbound::http::state::HttpState;
use site_backend::outbound::cache::RevalidatingPageCache;
use site_backend::outbound::cms::{ContactFormsForwarder, ContentApiClient};
use site_backend::outbound::credentials::{FileCredentialStore, InMemoryCredentials};
use site_backend::settings::SiteConfig;

fn build_credentials(config: &SiteConfig) -> io::Result<Arc<dyn CredentialProvider>> {
    match &config.token_file {
        Some(path) => {
            let store = FileCredentialStore::open(path).map_err(|error| {
                io::Error::other(format!("credential store {}: {error}", path.display()))
            })?;
            info!(path = %path.display(), "content requests use the stored bearer token");
            Ok(Arc::new(store))
        }
        None => Ok(Arc::new(InMemoryCredentials::default())),
    }
}

/// Build the shared handler state from validated configuration.
///
/// # Errors
/// Returns [`io::Error`] when the credential store cannot be opened or an
/// HTTP client cannot be constructed.
pub(super) fn build_http_state(config: &SiteConfig) -> io::Result<web::Data<HttpState>> {
    let api_base = config.api_base();
    let credentials = build_credentials(config)?;
    let content = ContentApiClient::new(api_base.clone(), config.request_timeout, credentials)
        .map_err(|error| io::Error::other(format!("content client: {error}")))?;
    let contact_forms = ContactFormsForwarder::new(&api_base, config.request_timeout)
        .map_err(|error| io::Error::other(format!("contact forwarder: {error}")))?;
    let cache = RevalidatingPageCache::new(Arc::new(DefaultClock), config.revalidate_after);
    let pages = PageLoader::new(Arc::new(content), Arc::new(cache));

    Ok(web::Data::new(HttpState::new(
        pages,
        Arc::new(contact_forms),
        config.api_origin(),
        config.revalidate_after,
    )))
}
