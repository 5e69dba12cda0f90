pub mod adapters;
pub mod config;
pub mod dtos;
pub mod errors;
pub mod services;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use adapters::postgres::repositories::{
    PersonsRepo, Repository, UnitOfWork, UnitOfWorkFactory, UnitOfWorkPublic,
};
pub use config::{DeletePolicy, StoreConfig};
pub use dtos::{entity::Entity, persons::PersonDTO};
pub use errors::{ConfigError, StoreError};
pub use services::entity_store::{EntityStore, PersonsStore};
