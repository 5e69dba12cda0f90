use std::marker::PhantomData;

use tracing::{debug, warn};

use crate::adapters::postgres::{
    repositories::{PersonsRepo, Repository, UnitOfWorkFactory, UnitOfWorkPublic},
    specifications::{PersonsSpecification, Specification},
};
use crate::config::DeletePolicy;
use crate::dtos::entity::Entity;
use crate::dtos::page::{Page, PageRequest};
use crate::dtos::persons::PersonDTO;
use crate::errors::StoreError;

/// Typed access to the store for one entity kind.
///
/// Each call checks out its own connection and is one independent round trip;
/// only `save_all` spans several statements, inside one transaction.
pub struct EntityStore<RepoType, EntityType, SpecificationType> {
    uow_factory: UnitOfWorkFactory,
    delete_policy: DeletePolicy,
    _types: PhantomData<fn() -> (RepoType, EntityType, SpecificationType)>,
}

pub type PersonsStore = EntityStore<PersonsRepo, PersonDTO, PersonsSpecification>;

impl<RepoType, EntityType, SpecificationType> Clone
    for EntityStore<RepoType, EntityType, SpecificationType>
{
    fn clone(&self) -> Self {
        Self {
            uow_factory: self.uow_factory.clone(),
            delete_policy: self.delete_policy,
            _types: PhantomData,
        }
    }
}

impl<RepoType, EntityType, SpecificationType> EntityStore<RepoType, EntityType, SpecificationType>
where
    RepoType: Repository<EntityType, SpecificationType>,
    EntityType: Entity,
    SpecificationType: Specification,
{
    pub fn new(uow_factory: UnitOfWorkFactory, delete_policy: DeletePolicy) -> Self {
        Self {
            uow_factory,
            delete_policy,
            _types: PhantomData,
        }
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    pub async fn save(&self, entity: &EntityType) -> Result<EntityType, StoreError> {
        let mut uow = self.uow_factory.create_uow().await?;
        RepoType::save(entity, &mut uow).await
    }

    /// Saves every entity or none of them.
    pub async fn save_all(&self, entities: &[EntityType]) -> Result<Vec<EntityType>, StoreError> {
        let mut uow = self.uow_factory.create_uow().await?;
        uow.begin_transaction().await?;
        match RepoType::save_all(entities, &mut uow).await {
            Ok(saved) => {
                uow.commit().await?;
                Ok(saved)
            }
            Err(err) => {
                if let Err(rollback_err) = uow.rollback().await {
                    warn!(error = %rollback_err, "rollback after failed save_all failed");
                }
                Err(err)
            }
        }
    }

    pub async fn find_by_id(&self, id: EntityType::Id) -> Result<Option<EntityType>, StoreError> {
        let mut uow = self.uow_factory.create_uow().await?;
        RepoType::find_by_id(id, &mut uow).await
    }

    pub async fn find_all(&self) -> Result<Vec<EntityType>, StoreError> {
        let mut uow = self.uow_factory.create_uow().await?;
        RepoType::find_all(&mut uow).await
    }

    pub async fn find_all_by_id(
        &self,
        ids: &[EntityType::Id],
    ) -> Result<Vec<EntityType>, StoreError> {
        let mut uow = self.uow_factory.create_uow().await?;
        RepoType::find_all_by_id(ids, &mut uow).await
    }

    pub async fn find_page(&self, request: PageRequest) -> Result<Page<EntityType>, StoreError> {
        let mut uow = self.uow_factory.create_uow().await?;
        RepoType::find_page(request, &mut uow).await
    }

    pub async fn get_one_by(
        &self,
        specification: SpecificationType,
    ) -> Result<Option<EntityType>, StoreError> {
        let mut uow = self.uow_factory.create_uow().await?;
        RepoType::get_one_by(specification, &mut uow).await
    }

    pub async fn find_all_by(
        &self,
        specification: SpecificationType,
    ) -> Result<Vec<EntityType>, StoreError> {
        let mut uow = self.uow_factory.create_uow().await?;
        RepoType::find_all_by(specification, &mut uow).await
    }

    pub async fn exists_by_id(&self, id: EntityType::Id) -> Result<bool, StoreError> {
        let mut uow = self.uow_factory.create_uow().await?;
        RepoType::exists_by_id(id, &mut uow).await
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let mut uow = self.uow_factory.create_uow().await?;
        RepoType::count(&mut uow).await
    }

    /// A missing id is a no-op under `DeletePolicy::Lenient` and
    /// `StoreError::NotFound` under `DeletePolicy::Strict`.
    pub async fn delete_by_id(&self, id: EntityType::Id) -> Result<(), StoreError> {
        let mut uow = self.uow_factory.create_uow().await?;
        let removed = RepoType::delete_by_id(id, &mut uow).await?;
        self.check_removed(removed, id)
    }

    /// Entities without an id were never stored and are ignored under either policy.
    pub async fn delete(&self, entity: &EntityType) -> Result<(), StoreError> {
        let Some(id) = entity.id() else {
            debug!("delete of an unsaved entity ignored");
            return Ok(());
        };
        let mut uow = self.uow_factory.create_uow().await?;
        let removed = RepoType::delete(entity, &mut uow).await?;
        self.check_removed(removed, id)
    }

    pub async fn delete_all_by_id(&self, ids: &[EntityType::Id]) -> Result<usize, StoreError> {
        let mut uow = self.uow_factory.create_uow().await?;
        RepoType::delete_all_by_id(ids, &mut uow).await
    }

    pub async fn delete_all(&self) -> Result<usize, StoreError> {
        let mut uow = self.uow_factory.create_uow().await?;
        RepoType::delete_all(&mut uow).await
    }

    fn check_removed(&self, removed: bool, id: EntityType::Id) -> Result<(), StoreError> {
        match (removed, self.delete_policy) {
            (false, DeletePolicy::Strict) => Err(StoreError::NotFound { id: id.to_string() }),
            _ => Ok(()),
        }
    }
}
