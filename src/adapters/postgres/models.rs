use crate::dtos::persons::PersonDTO;
use chrono::prelude::*;
use diesel::prelude::*;

#[derive(Queryable, Selectable, PartialEq, Insertable, Debug)]
#[diesel(table_name = super::schema::persons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PersonModel {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
}

impl PersonModel {
    /// Model for a DTO that already carries an id; `None` otherwise.
    pub fn from_dto(dto: &PersonDTO) -> Option<Self> {
        Some(Self {
            id: dto.id?,
            name: dto.name.clone(),
            email: dto.email.clone(),
            created_at: dto.created_at,
        })
    }
}

impl From<PersonModel> for PersonDTO {
    fn from(model: PersonModel) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = super::schema::persons)]
pub struct NewPersonModel<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub created_at: &'a NaiveDateTime,
}

impl<'a> NewPersonModel<'a> {
    pub fn from_dto(dto: &'a PersonDTO) -> Self {
        Self {
            name: &dto.name,
            email: dto.email.as_deref(),
            created_at: &dto.created_at,
        }
    }
}

/// Full-row update; a `None` email clears the column.
#[derive(AsChangeset)]
#[diesel(table_name = super::schema::persons)]
#[diesel(treat_none_as_null = true)]
pub struct PersonChangeset<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub created_at: &'a NaiveDateTime,
}

impl<'a> PersonChangeset<'a> {
    pub fn from_dto(dto: &'a PersonDTO) -> Self {
        Self {
            name: &dto.name,
            email: dto.email.as_deref(),
            created_at: &dto.created_at,
        }
    }
}
