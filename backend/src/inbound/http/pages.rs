//! Page content endpoints backed by the caching page loaders.
//!
//! ```text
//! GET /api/pages/global  Site-wide settings
//! GET /api/pages/{page}  Global settings plus one page
//! ```
//!
//! Responses carry a public `Cache-Control` matching the loader's
//! revalidation window. When nothing at all could be loaded the endpoint
//! answers 503 and the caller renders its fallback.

use std::fmt;
use std::str::FromStr;

use actix_web::http::header::CACHE_CONTROL;
use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use tracing::warn;

use super::cache_control::public_revalidating;
use super::error::{ApiError, ApiResult, ErrorBody};
use super::state::HttpState;
use crate::domain::content::{
    AboutPage, ContactPage, HomePage, PageModel, ProcessPage, ResolveMedia, ServicePage, WorkPage,
};
use crate::domain::PageBundle;

/// Shown when neither global settings nor the page could be loaded.
pub const PAGE_UNAVAILABLE_MESSAGE: &str = "Content is temporarily unavailable";

/// Page slugs served under `/api/pages/{page}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlug {
    Home,
    About,
    Services,
    Process,
    Works,
    Contact,
}

impl PageSlug {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Services => "services",
            Self::Process => "process",
            Self::Works => "works",
            Self::Contact => "contact",
        }
    }
}

impl fmt::Display for PageSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The slug names no page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page: {0}")]
pub struct UnknownPage(String);

impl FromStr for PageSlug {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Self::Home),
            "about" => Ok(Self::About),
            "services" => Ok(Self::Services),
            "process" => Ok(Self::Process),
            "works" => Ok(Self::Works),
            "contact" => Ok(Self::Contact),
            other => Err(UnknownPage(other.to_owned())),
        }
    }
}

/// Site-wide settings.
#[utoipa::path(
    get,
    path = "/api/pages/global",
    tags = ["pages"],
    responses(
        (status = 200, description = "Global settings"),
        (status = 503, description = "Content unavailable", body = ErrorBody)
    )
)]
#[get("/pages/global")]
pub async fn get_global_settings(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let mut global = state
        .pages
        .global_settings()
        .await
        .ok()
        .and_then(|content| content.into_data())
        .ok_or_else(|| ApiError::service_unavailable(PAGE_UNAVAILABLE_MESSAGE))?;
    global.resolve_media(&state.media_origin);
    Ok(cached_json(&state, &global))
}

/// Global settings plus one page.
#[utoipa::path(
    get,
    path = "/api/pages/{page}",
    tags = ["pages"],
    params(("page" = String, Path, description = "home, about, services, process, works or contact")),
    responses(
        (status = 200, description = "`{ global, page }`; either half may be null"),
        (status = 404, description = "Unknown page", body = ErrorBody),
        (status = 503, description = "Neither half could be loaded", body = ErrorBody)
    )
)]
#[get("/pages/{page}")]
pub async fn get_page(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let slug: PageSlug = path
        .into_inner()
        .parse()
        .map_err(|err: UnknownPage| ApiError::not_found(err.to_string()))?;
    let pages = &state.pages;
    match slug {
        PageSlug::Home => bundle_response(&state, slug, pages.load_bundle::<HomePage>().await),
        PageSlug::About => bundle_response(&state, slug, pages.load_bundle::<AboutPage>().await),
        PageSlug::Services => {
            bundle_response(&state, slug, pages.load_bundle::<ServicePage>().await)
        }
        PageSlug::Process => {
            bundle_response(&state, slug, pages.load_bundle::<ProcessPage>().await)
        }
        PageSlug::Works => bundle_response(&state, slug, pages.load_bundle::<WorkPage>().await),
        PageSlug::Contact => {
            bundle_response(&state, slug, pages.load_bundle::<ContactPage>().await)
        }
    }
}

fn bundle_response<P: PageModel>(
    state: &HttpState,
    slug: PageSlug,
    mut bundle: PageBundle<P>,
) -> ApiResult<HttpResponse> {
    if bundle.is_unavailable() {
        warn!(page = %slug, "global settings and page both unavailable");
        return Err(ApiError::service_unavailable(PAGE_UNAVAILABLE_MESSAGE));
    }
    bundle.resolve_media(&state.media_origin);
    Ok(cached_json(state, &bundle))
}

fn cached_json(state: &HttpState, body: &impl Serialize) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((CACHE_CONTROL, public_revalidating(state.revalidate_after)))
        .json(body)
}
