//! Reqwest-backed content API client.
//!
//! Owns transport details only: the shared API base, bearer credential
//! attachment, the request timeout, and mapping HTTP failures into
//! [`ContentSourceError`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::dto::ErrorEnvelopeDto;
use super::{ClientBuildError, body_preview, endpoint_url};
use crate::domain::content::PageContent;
use crate::domain::ports::{Collection, ContentSource, ContentSourceError, CredentialProvider};

/// Per-request options for [`ContentApiClient::get`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestConfig {
    query: Vec<(String, String)>,
}

impl RequestConfig {
    /// Ask the backend to populate every relation (`populate=*`).
    pub fn populate_all() -> Self {
        Self::default().with_query("populate", "*")
    }

    /// Append one query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// GET client for content collections.
pub struct ContentApiClient {
    client: Client,
    api_base: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl ContentApiClient {
    /// Build a client rooted at `api_base` with a fixed request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] when the reqwest client cannot be built.
    pub fn new(
        api_base: Url,
        timeout: Duration,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ClientBuildError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base,
            credentials,
        })
    }

    /// GET `{api_base}/{path}` and decode the envelope.
    ///
    /// # Errors
    ///
    /// [`ContentSourceError::Timeout`] when the request exceeds the timeout,
    /// [`ContentSourceError::Rejected`] with the backend's status and message
    /// for non-success statuses, [`ContentSourceError::Decode`] for bodies that
    /// are not a valid envelope.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        config: Option<&RequestConfig>,
    ) -> Result<PageContent<T>, ContentSourceError> {
        let url = endpoint_url(&self.api_base, path).map_err(|error| {
            ContentSourceError::invalid_request(format!("{path}: {error}"))
        })?;
        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(config) = config {
            request = request.query(&config.query);
        }
        if let Some(token) = self.credentials.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                self.forget_token();
            }
            return Err(map_status_error(status, body.as_ref()));
        }

        debug!(path, bytes = body.len(), "content response received");
        serde_json::from_slice(body.as_ref()).map_err(|error| {
            ContentSourceError::decode(format!("invalid content envelope from {path}: {error}"))
        })
    }

    fn forget_token(&self) {
        warn!("content backend answered 401; clearing stored credential");
        if let Err(error) = self.credentials.clear() {
            warn!(%error, "failed to clear stored credential");
        }
    }
}

#[async_trait]
impl ContentSource for ContentApiClient {
    async fn fetch(&self, collection: Collection) -> Result<PageContent<Value>, ContentSourceError> {
        self.get(collection.path(), Some(&RequestConfig::populate_all()))
            .await
    }
}

fn map_transport_error(error: reqwest::Error) -> ContentSourceError {
    if error.is_timeout() {
        ContentSourceError::timeout(error.to_string())
    } else if error.is_decode() {
        ContentSourceError::decode(error.to_string())
    } else {
        ContentSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ContentSourceError {
    let message = ErrorEnvelopeDto::message_from(body).unwrap_or_else(|| {
        let preview = body_preview(body);
        if preview.is_empty() {
            status
                .canonical_reason()
                .map_or_else(|| format!("status {}", status.as_u16()), str::to_owned)
        } else {
            preview
        }
    });
    ContentSourceError::rejected(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use actix_web::{HttpRequest, HttpResponse, web};
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::content::HomePage;
    use crate::domain::ports::{AnonymousCredentials, MockCredentialProvider};
    use crate::test_support::{spawn_stub, unreachable_origin};

    fn api_base(origin: &Url) -> Url {
        endpoint_url(origin, "api").expect("api base")
    }

    fn client(origin: &Url, credentials: Arc<dyn CredentialProvider>) -> ContentApiClient {
        ContentApiClient::new(api_base(origin), Duration::from_secs(5), credentials)
            .expect("client builds")
    }

    #[rstest]
    #[case::envelope(br#"{"error":{"status":400,"name":"ValidationError","message":"Invalid populate"}}"#.as_slice(), "Invalid populate")]
    #[case::html(b"<h1>Bad gateway</h1>".as_slice(), "<h1>Bad gateway</h1>")]
    #[case::empty(b"".as_slice(), "Bad Request")]
    fn status_errors_carry_status_and_message(#[case] body: &[u8], #[case] expected: &str) {
        let error = map_status_error(StatusCode::BAD_REQUEST, body);
        assert_eq!(error, ContentSourceError::rejected(400_u16, expected));
    }

    #[actix_web::test]
    async fn fetch_requests_populated_collection_with_bearer_token() {
        let origin = spawn_stub(|cfg| {
            cfg.route(
                "/api/homepage",
                web::get().to(|req: HttpRequest| async move {
                    let auth = req
                        .headers()
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_owned();
                    HttpResponse::Ok().json(json!({
                        "data": { "title": req.query_string(), "subtitle": auth },
                        "meta": {}
                    }))
                }),
            );
        });
        let mut credentials = MockCredentialProvider::new();
        credentials
            .expect_token()
            .returning(|| Some("s3cret".to_owned()));
        credentials.expect_clear().never();

        let page = client(&origin, Arc::new(credentials))
            .fetch(Collection::Homepage)
            .await
            .expect("fetch succeeds")
            .decode::<HomePage>()
            .expect("home page decodes")
            .into_data()
            .expect("data present");

        assert_eq!(page.title, "populate=*");
        assert_eq!(page.subtitle.as_deref(), Some("Bearer s3cret"));
    }

    #[actix_web::test]
    async fn no_authorization_header_without_a_token() {
        let origin = spawn_stub(|cfg| {
            cfg.route(
                "/api/about",
                web::get().to(|req: HttpRequest| async move {
                    let has_auth = req.headers().contains_key("authorization");
                    HttpResponse::Ok().json(json!({ "data": { "authorised": has_auth } }))
                }),
            );
        });

        let envelope = client(&origin, Arc::new(AnonymousCredentials))
            .get::<Value>("about", None)
            .await
            .expect("fetch succeeds");

        assert_eq!(envelope.data, Some(json!({ "authorised": false })));
    }

    #[actix_web::test]
    async fn unauthorised_response_clears_the_token() {
        let origin = spawn_stub(|cfg| {
            cfg.route(
                "/api/contact",
                web::get().to(|| async {
                    HttpResponse::Unauthorized().json(json!({
                        "data": null,
                        "error": { "status": 401, "name": "UnauthorizedError", "message": "Missing or invalid credentials" }
                    }))
                }),
            );
        });
        let mut credentials = MockCredentialProvider::new();
        credentials
            .expect_token()
            .returning(|| Some("expired".to_owned()));
        credentials.expect_clear().times(1).returning(|| Ok(()));

        let error = client(&origin, Arc::new(credentials))
            .fetch(Collection::Contact)
            .await
            .expect_err("401 is an error");

        assert_eq!(
            error,
            ContentSourceError::rejected(401_u16, "Missing or invalid credentials")
        );
    }

    #[actix_web::test]
    async fn slow_origin_times_out_distinctly() {
        let origin = spawn_stub(|cfg| {
            cfg.route(
                "/api/work",
                web::get().to(|| async {
                    actix_web::rt::time::sleep(Duration::from_millis(500)).await;
                    HttpResponse::Ok().json(json!({ "data": {} }))
                }),
            );
        });
        let client = ContentApiClient::new(
            api_base(&origin),
            Duration::from_millis(50),
            Arc::new(AnonymousCredentials),
        )
        .expect("client builds");

        let error = client
            .fetch(Collection::Work)
            .await
            .expect_err("request times out");

        assert!(matches!(error, ContentSourceError::Timeout { .. }), "{error:?}");
        assert_eq!(error.status(), None);
    }

    #[actix_web::test]
    async fn malformed_success_body_is_a_decode_error() {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = hits.clone();
        let origin = spawn_stub(move |cfg| {
            let seen = seen.clone();
            cfg.route(
                "/api/service",
                web::get().to(move || {
                    let seen = seen.clone();
                    async move {
                        seen.fetch_add(1, Ordering::SeqCst);
                        HttpResponse::Ok().content_type("application/json").body("{not json")
                    }
                }),
            );
        });

        let error = client(&origin, Arc::new(AnonymousCredentials))
            .fetch(Collection::Service)
            .await
            .expect_err("decode fails");

        assert!(matches!(error, ContentSourceError::Decode { .. }), "{error:?}");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn unreachable_origin_is_a_transport_error() {
        let error = client(&unreachable_origin(), Arc::new(AnonymousCredentials))
            .fetch(Collection::GlobalSettings)
            .await
            .expect_err("nothing is listening");

        assert!(matches!(error, ContentSourceError::Transport { .. }), "{error:?}");
    }
}
