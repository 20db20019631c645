pub mod models;
pub mod repositories;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Env;

const MAX_CONNECTIONS: u32 = 10;

/// Build the process-wide connection pool.
pub async fn connect(env: &Env) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(&env.database_url)
        .await
}

/// Pool that defers connecting until first use. Router-level tests use this
/// to exercise paths that never reach the database.
pub fn connect_lazy(env: &Env) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_lazy(&env.database_url)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
