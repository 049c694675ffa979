//! Backend entry-point: loads configuration, migrates the database, and
//! serves the REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use diet_backend::inbound::http::health::HealthState;
use diet_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use diet_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};

use server::{ServerConfig, ServerSettings, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("configuration error: {e}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(fingerprint = %session.key_fingerprint(), "session key loaded");

    let database_url = settings.database_url()?;
    run_migrations(database_url)
        .await
        .map_err(std::io::Error::other)?;

    let pool = DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(settings.pool_max_size())
            .with_connection_timeout(settings.pool_connection_timeout()),
    )
    .await
    .map_err(std::io::Error::other)?;

    let bind_addr = settings.bind_addr()?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig {
            session,
            bind_addr,
            http_state: build_http_state(&pool),
        },
    )?;
    info!(%bind_addr, "listening");
    server.await
}
