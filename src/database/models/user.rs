use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Access tier of a member. Stored as lowercase text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum Role {
    #[default]
    None,
    Admin,
    Premium,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub email: String,
    pub name: String,
    pub photo_url: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Body of a first sign-in. Role is never client supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub photo_url: Option<String>,
}

impl From<NewUser> for User {
    fn from(new: NewUser) -> Self {
        Self {
            email: new.email,
            name: new.name,
            photo_url: new.photo_url,
            role: Role::None,
            created_at: Utc::now(),
        }
    }
}

/// Result of an idempotent insert keyed by email
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    AlreadyExists,
}
