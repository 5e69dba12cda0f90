use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::super::schema::persons;
use super::super::specifications::{CompType, PersonsSpecification};
use super::repo_trait::Repository;
use super::unit_of_work::UnitOfWork;
use super::UnitOfWorkInternal;
use crate::adapters::postgres::models::{NewPersonModel, PersonChangeset, PersonModel};
use crate::dtos::page::{Page, PageRequest};
use crate::dtos::persons::PersonDTO;
use crate::errors::StoreError;

pub struct PersonsRepo {}

macro_rules! compare {
    ($query:expr, $column:expr, $comp:expr) => {
        match $comp {
            CompType::Equals(value) => $query.filter($column.eq(value)),
            CompType::Gte(value) => $query.filter($column.ge(value)),
            CompType::Lte(value) => $query.filter($column.le(value)),
            CompType::Lt(value) => $query.filter($column.lt(value)),
            CompType::Gt(value) => $query.filter($column.gt(value)),
        }
    };
}

fn filtered_by(specification: PersonsSpecification) -> persons::BoxedQuery<'static, Pg> {
    let query = persons::table.into_boxed();
    match specification {
        PersonsSpecification::Id(comp) => compare!(query, persons::id, comp),
        PersonsSpecification::Name(comp) => compare!(query, persons::name, comp),
        PersonsSpecification::Email(comp) => compare!(query, persons::email, comp),
    }
}

fn into_dtos(models: Vec<PersonModel>) -> Vec<PersonDTO> {
    models.into_iter().map(PersonDTO::from).collect()
}

impl Repository<PersonDTO, PersonsSpecification> for PersonsRepo {
    async fn save(entity: &PersonDTO, uow: &mut UnitOfWork) -> Result<PersonDTO, StoreError> {
        if let Some(person_id) = entity.id {
            let updated = diesel::update(persons::table.find(person_id))
                .set(PersonChangeset::from_dto(entity))
                .returning(PersonModel::as_returning())
                .get_result::<PersonModel>(uow.get_conn())
                .await
                .optional()?;

            if let Some(person) = updated {
                debug!(id = person.id, "updated person");
                return Ok(person.into());
            }
            debug!(id = person_id, "no person with this id, inserting as new");
        }

        let person = diesel::insert_into(persons::table)
            .values(NewPersonModel::from_dto(entity))
            .returning(PersonModel::as_returning())
            .get_result::<PersonModel>(uow.get_conn())
            .await?;
        debug!(id = person.id, "inserted person");
        Ok(person.into())
    }

    async fn find_by_id(id: i32, uow: &mut UnitOfWork) -> Result<Option<PersonDTO>, StoreError> {
        let person = persons::table
            .find(id)
            .select(PersonModel::as_select())
            .first::<PersonModel>(uow.get_conn())
            .await
            .optional()?;
        Ok(person.map(PersonDTO::from))
    }

    async fn find_all(uow: &mut UnitOfWork) -> Result<Vec<PersonDTO>, StoreError> {
        let people = persons::table
            .select(PersonModel::as_select())
            .load::<PersonModel>(uow.get_conn())
            .await?;
        Ok(into_dtos(people))
    }

    async fn find_all_by_id(
        ids: &[i32],
        uow: &mut UnitOfWork,
    ) -> Result<Vec<PersonDTO>, StoreError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let people = persons::table
            .filter(persons::id.eq_any(ids.to_vec()))
            .select(PersonModel::as_select())
            .load::<PersonModel>(uow.get_conn())
            .await?;
        Ok(into_dtos(people))
    }

    async fn find_page(
        request: PageRequest,
        uow: &mut UnitOfWork,
    ) -> Result<Page<PersonDTO>, StoreError> {
        let total = persons::table
            .count()
            .get_result::<i64>(uow.get_conn())
            .await?;
        let people = persons::table
            .select(PersonModel::as_select())
            .order(persons::id.asc())
            .limit(request.limit())
            .offset(request.offset())
            .load::<PersonModel>(uow.get_conn())
            .await?;
        Ok(Page::new(into_dtos(people), request, total))
    }

    async fn get_one_by(
        specification: PersonsSpecification,
        uow: &mut UnitOfWork,
    ) -> Result<Option<PersonDTO>, StoreError> {
        let person = filtered_by(specification)
            .select(PersonModel::as_select())
            .order(persons::id.asc())
            .first::<PersonModel>(uow.get_conn())
            .await
            .optional()?;
        Ok(person.map(PersonDTO::from))
    }

    async fn find_all_by(
        specification: PersonsSpecification,
        uow: &mut UnitOfWork,
    ) -> Result<Vec<PersonDTO>, StoreError> {
        let people = filtered_by(specification)
            .select(PersonModel::as_select())
            .order(persons::id.asc())
            .load::<PersonModel>(uow.get_conn())
            .await?;
        Ok(into_dtos(people))
    }

    async fn exists_by_id(id: i32, uow: &mut UnitOfWork) -> Result<bool, StoreError> {
        let exists = diesel::select(diesel::dsl::exists(persons::table.find(id)))
            .get_result::<bool>(uow.get_conn())
            .await?;
        Ok(exists)
    }

    async fn count(uow: &mut UnitOfWork) -> Result<i64, StoreError> {
        let total = persons::table
            .count()
            .get_result::<i64>(uow.get_conn())
            .await?;
        Ok(total)
    }

    async fn delete_by_id(id: i32, uow: &mut UnitOfWork) -> Result<bool, StoreError> {
        let removed = diesel::delete(persons::table.find(id))
            .execute(uow.get_conn())
            .await?;
        if removed == 0 {
            debug!(id, "no person to delete");
        } else {
            debug!(id, "deleted person");
        }
        Ok(removed > 0)
    }

    async fn delete_all_by_id(ids: &[i32], uow: &mut UnitOfWork) -> Result<usize, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let removed = diesel::delete(persons::table.filter(persons::id.eq_any(ids.to_vec())))
            .execute(uow.get_conn())
            .await?;
        debug!(removed, "deleted persons by id");
        Ok(removed)
    }

    async fn delete_all(uow: &mut UnitOfWork) -> Result<usize, StoreError> {
        let removed = diesel::delete(persons::table)
            .execute(uow.get_conn())
            .await?;
        debug!(removed, "deleted all persons");
        Ok(removed)
    }
}
