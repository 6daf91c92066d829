//! Users API entry-point: loads settings, wires persistence and serves HTTP.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server, drain_on, shutdown_signal};
use users_api::inbound::http::auth_config::{BuildMode, auth_settings_from_env};
use users_api::inbound::http::basic_auth::BasicAuth;
use users_api::inbound::http::health::HealthState;
use users_api::outbound::persistence::{DatabaseSettings, DbPool};

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
        .map_err(|e| std::io::Error::other(format!("failed to load server settings: {e}")))?;
    let env = DefaultEnv::new();

    let auth = auth_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let database = DatabaseSettings::from_env(&env);
    let pool = DbPool::new(
        database
            .pool_config(settings.pool_max_size(), settings.pool_timeout())
            .with_min_idle(settings.pool_min_idle()),
    );

    let bind_addr = settings.bind_addr()?;
    let config = ServerConfig::new(
        bind_addr,
        pool,
        BasicAuth::new(Arc::new(auth.verifier()), auth.realm()),
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(health_state, server.handle(), shutdown_signal()));
    info!(%bind_addr, tls = database.tls, "users API listening");
    server.await
}
