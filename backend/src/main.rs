//! Backend entry-point: loads configuration and serves the record API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::sync::Arc;

use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recordkeeper::inbound::http::token_config::{BuildMode, token_settings_from_env};
use recordkeeper::outbound::persistence::InMemoryDocumentStore;
use recordkeeper::server::{ServerSettings, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let secret = token_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    info!(fingerprint = %secret.fingerprint(), "token secret loaded");

    let http_state = build_http_state(
        Arc::new(InMemoryDocumentStore::new()),
        settings.hash_cost(),
        secret.expose(),
        Arc::new(DefaultClock),
    );
    drop(secret);

    let bind_addr = settings.bind_addr();
    info!(%bind_addr, "starting HTTP server");
    create_server(http_state, bind_addr)?.await
}
