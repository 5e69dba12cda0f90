use anyhow::Context;
use person_store::adapters::postgres::{build_pool, run_migrations};
use person_store::{telemetry, PersonsStore, StoreConfig, UnitOfWorkFactory};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = StoreConfig::from_env().context("loading store configuration")?;

    if config.run_migrations {
        let database_url = config.database_url.clone();
        tokio::task::spawn_blocking(move || run_migrations(&database_url))
            .await
            .context("migration task panicked")?
            .context("running migrations")?;
    }

    let pool = build_pool(&config)?;
    let store = PersonsStore::new(UnitOfWorkFactory::new(pool), config.delete_policy);

    let total = store.count().await.context("counting persons")?;
    info!(
        total,
        pool_max_size = config.pool_max_size,
        delete_policy = ?store.delete_policy(),
        "person store ready"
    );
    Ok(())
}
