//! Server construction and middleware wiring.

mod state_builders;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use site_backend::Trace;
#[cfg(debug_assertions)]
use site_backend::doc::ApiDoc;
use site_backend::inbound::http::contact::submit_contact;
use site_backend::inbound::http::health::{HealthState, live, ready};
use site_backend::inbound::http::pages::{get_global_settings, get_page};
use site_backend::inbound::http::state::HttpState;
use site_backend::settings::SiteConfig;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    // `/pages/global` must be registered before the `{page}` matcher.
    let api = web::scope("/api")
        .service(get_global_settings)
        .service(get_page)
        .service(submit_contact);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server from validated configuration.
///
/// Readiness is flipped once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when adapter construction, binding the socket
/// or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: SiteConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(config.bind_addr)?
        .run();

    info!(
        bind_addr = %config.bind_addr,
        api_origin = config.api_origin(),
        "site backend listening"
    );
    health_state.mark_ready();
    Ok(server)
}
