pub mod models;
pub mod repositories;
pub mod schema;
pub mod specifications;

use diesel::{Connection, PgConnection};
use diesel_async::pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager};
use diesel_async::AsyncPgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

use crate::config::StoreConfig;
use crate::errors::StoreError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub fn build_pool(config: &StoreConfig) -> Result<Pool<AsyncPgConnection>, StoreError> {
    let manager =
        AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url.as_str());
    Pool::builder(manager)
        .max_size(config.pool_max_size)
        .build()
        .map_err(|err| StoreError::Unavailable(format!("could not build connection pool: {err}")))
}

/// Applies pending embedded migrations over a blocking connection.
pub fn run_migrations(database_url: &str) -> Result<(), StoreError> {
    let mut conn = PgConnection::establish(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| StoreError::Migration(err.to_string()))?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(())
}

/// Reverts every applied migration, dropping the schema.
pub fn revert_migrations(database_url: &str) -> Result<(), StoreError> {
    let mut conn = PgConnection::establish(database_url)?;
    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|err| StoreError::Migration(err.to_string()))?;
    Ok(())
}
