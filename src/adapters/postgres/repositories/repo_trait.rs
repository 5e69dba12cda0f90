use super::super::specifications::Specification;
use super::unit_of_work::UnitOfWork;
use crate::dtos::entity::Entity;
use crate::dtos::page::{Page, PageRequest};
use crate::errors::StoreError;

/// CRUD over one entity kind. Every operation runs on the caller's unit of work,
/// so several calls can share one transaction.
#[allow(async_fn_in_trait)]
pub trait Repository<EntityType: Entity, SpecificationType: Specification>:
    Send + Sync + 'static
{
    /// Inserts when the entity has no id, otherwise updates the row with that id.
    /// An id with no row is inserted as a new row under a store-assigned id.
    async fn save(entity: &EntityType, uow: &mut UnitOfWork) -> Result<EntityType, StoreError>;

    async fn find_by_id(
        id: EntityType::Id,
        uow: &mut UnitOfWork,
    ) -> Result<Option<EntityType>, StoreError>;

    async fn find_all(uow: &mut UnitOfWork) -> Result<Vec<EntityType>, StoreError>;

    async fn find_all_by_id(
        ids: &[EntityType::Id],
        uow: &mut UnitOfWork,
    ) -> Result<Vec<EntityType>, StoreError>;

    async fn find_page(
        request: PageRequest,
        uow: &mut UnitOfWork,
    ) -> Result<Page<EntityType>, StoreError>;

    async fn get_one_by(
        specification: SpecificationType,
        uow: &mut UnitOfWork,
    ) -> Result<Option<EntityType>, StoreError>;

    async fn find_all_by(
        specification: SpecificationType,
        uow: &mut UnitOfWork,
    ) -> Result<Vec<EntityType>, StoreError>;

    async fn exists_by_id(id: EntityType::Id, uow: &mut UnitOfWork) -> Result<bool, StoreError>;

    async fn count(uow: &mut UnitOfWork) -> Result<i64, StoreError>;

    /// Returns whether a row was removed.
    async fn delete_by_id(id: EntityType::Id, uow: &mut UnitOfWork) -> Result<bool, StoreError>;

    async fn delete_all_by_id(
        ids: &[EntityType::Id],
        uow: &mut UnitOfWork,
    ) -> Result<usize, StoreError>;

    async fn delete_all(uow: &mut UnitOfWork) -> Result<usize, StoreError>;

    async fn save_all(
        entities: &[EntityType],
        uow: &mut UnitOfWork,
    ) -> Result<Vec<EntityType>, StoreError> {
        let mut saved = Vec::with_capacity(entities.len());
        for entity in entities {
            saved.push(Self::save(entity, uow).await?);
        }
        Ok(saved)
    }

    /// An entity that was never saved has nothing to remove.
    async fn delete(entity: &EntityType, uow: &mut UnitOfWork) -> Result<bool, StoreError> {
        match entity.id() {
            Some(id) => Self::delete_by_id(id, uow).await,
            None => Ok(false),
        }
    }
}
