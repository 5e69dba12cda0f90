use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PersonDTO {
    pub id: Option<i32>,
    pub name: String,
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
}

impl PersonDTO {
    /// A person not yet saved, stamped with the current UTC time.
    pub fn new(name: impl Into<String>, email: Option<&str>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.map(str::to_owned),
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl Entity for PersonDTO {
    type Id = i32;

    fn id(&self) -> Option<i32> {
        self.id
    }
}
