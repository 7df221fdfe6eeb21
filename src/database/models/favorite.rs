use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Favorite {
    pub id: Uuid,
    pub email: String,
    pub biodata_id: i64,
    pub name: String,
    pub permanent_division: String,
    pub occupation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFavorite {
    pub biodata_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permanent_division: String,
    #[serde(default)]
    pub occupation: String,
}

impl Favorite {
    pub fn new(owner: &str, new: NewFavorite) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: owner.to_string(),
            biodata_id: new.biodata_id,
            name: new.name,
            permanent_division: new.permanent_division,
            occupation: new.occupation,
        }
    }
}
