use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use rms_api::app::app;
use rms_api::config;
use rms_api::database;
use rms_api::mail::{Mailer, SmtpMailTransport};
use rms_api::state::AppState;
use rms_api::storage::Storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, S3_*, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Fails fast with the full list of missing variables.
    let env = config::env();
    tracing::info!("Starting RMS API in {:?} mode", env.environment);

    let pool = database::connect(env)
        .await
        .context("failed to connect to database")?;
    database::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let storage = Arc::new(Storage::from_env(env).await);
    let mailer = Mailer::start(Arc::new(
        SmtpMailTransport::from_env(env).context("failed to build mail transport")?,
    ));

    let state = AppState {
        pool,
        storage,
        mailer,
    };

    let bind_addr = format!("0.0.0.0:{}", env.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("RMS API listening on http://{bind_addr}");
    axum::serve(listener, app(state)).await.context("server")?;
    Ok(())
}
