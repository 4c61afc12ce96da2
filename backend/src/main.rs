//! Backend entry-point: loads settings, wires adapters and serves HTTP.

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use site_backend::inbound::http::health::HealthState;
use site_backend::settings::SiteSettings;

mod server;

use server::create_server;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = SiteSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(e.to_string()))?;
    let config = settings
        .into_config()
        .map_err(|e| io::Error::other(format!("invalid configuration: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
