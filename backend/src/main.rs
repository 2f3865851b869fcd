//! Pantry entry-point: loads settings, prepares storage and identity, then
//! serves the REST API.

mod server;

use std::env;
use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Report, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pantry::domain::ports::{StubTokenVerifier, TokenVerifier};
use pantry::inbound::http::health::HealthState;
use pantry::outbound::identity::IntrospectionTokenVerifier;
use pantry::outbound::persistence::{
    DbPool, PoolConfig, redact_database_url, run_pending_migrations,
};
use pantry::settings::{AppSettings, BuildMode, IdentityMode};

use server::{ServerConfig, create_server};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

fn build_token_verifier(mode: IdentityMode) -> Result<Arc<dyn TokenVerifier>> {
    match mode {
        IdentityMode::Introspection {
            url,
            secret,
            timeout,
        } => {
            info!(endpoint = %url, "verifying tokens by introspection");
            let verifier = IntrospectionTokenVerifier::new(url, secret, timeout)
                .wrap_err("failed to build identity provider client")?;
            Ok(Arc::new(verifier))
        }
        IdentityMode::Stub(user_id) => {
            warn!(user_id = %user_id, "accepting every bearer token as the stub user");
            Ok(Arc::new(StubTokenVerifier::authenticated(user_id)))
        }
    }
}

async fn build_db_pool(settings: &AppSettings, database_url: &str) -> Result<DbPool> {
    let applied = run_pending_migrations(database_url)
        .await
        .wrap_err("failed to apply database migrations")?;
    info!(
        database = %redact_database_url(database_url),
        applied,
        "database migrations up to date"
    );
    let config = PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    DbPool::new(config)
        .await
        .map_err(|err| Report::new(err).wrap_err("failed to build database pool"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings =
        AppSettings::load_from_iter(env::args_os()).wrap_err("failed to load settings")?;
    let bind_addr = settings.bind_addr()?;
    let tokens = build_token_verifier(settings.identity_mode(BuildMode::current())?)?;

    let mut config = ServerConfig::new(bind_addr, tokens);
    match settings.database_url() {
        Some(database_url) => {
            let pool = build_db_pool(&settings, database_url).await?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; records live in process memory only"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "pantry listening");
    server.await.wrap_err("server terminated with an error")
}
