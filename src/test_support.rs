use std::env;

use dotenvy::dotenv;
use rstest::fixture;
use tokio::runtime::{Builder, Runtime};

use crate::adapters::postgres::repositories::UnitOfWorkFactory;
use crate::adapters::postgres::{build_pool, revert_migrations, run_migrations};
use crate::config::{DeletePolicy, StoreConfig};
use crate::dtos::persons::PersonDTO;

// Fixtures stay sync: the runtime is a fixture of its own and is drilled through the
// others, so cleanup can run from `Drop`, which cannot be async.
pub struct WithCleanup<ValT> {
    pub closure: Box<dyn FnMut()>,
    pub val: ValT,
}

impl<ValT> Drop for WithCleanup<ValT> {
    fn drop(&mut self) {
        (*self.closure)();
    }
}

pub type MigratedDb = WithCleanup<(UnitOfWorkFactory, Runtime)>;

#[fixture]
pub fn runtime() -> Runtime {
    Builder::new_current_thread().enable_all().build().unwrap()
}

#[fixture]
pub fn store_config() -> StoreConfig {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DB URL must be set");
    StoreConfig {
        database_url,
        pool_max_size: 4,
        delete_policy: DeletePolicy::Lenient,
        run_migrations: true,
    }
}

/// A freshly migrated schema plus a unit of work factory over it; the schema is
/// reverted on drop.
#[fixture]
pub fn migrated_db(runtime: Runtime, store_config: StoreConfig) -> MigratedDb {
    let database_url = store_config.database_url.clone();

    // An interrupted earlier run may have left the schema behind.
    let _ = revert_migrations(&database_url);
    run_migrations(&database_url).expect("Error running migrations");

    let pool = build_pool(&store_config).expect("Error building connection pool");

    WithCleanup {
        val: (UnitOfWorkFactory::new(pool), runtime),
        closure: Box::new(move || {
            revert_migrations(&database_url).expect("Error reverting migrations");
        }),
    }
}

#[fixture]
pub fn default_persons() -> Vec<PersonDTO> {
    vec![
        PersonDTO::new("Alice", Some("alice@mail.com")),
        PersonDTO::new("Bob", Some("bob@mail.com")),
        PersonDTO::new("Carol", None),
    ]
}
