use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Review state of a premium upgrade request. `Approved` keeps the
/// capitalisation existing clients send and expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum RequestStatus {
    #[serde(rename = "pending")]
    #[sqlx(rename = "pending")]
    Pending,
    #[serde(rename = "Approved")]
    #[sqlx(rename = "Approved")]
    Approved,
    #[serde(rename = "rejected")]
    #[sqlx(rename = "rejected")]
    Rejected,
}

/// What a reviewer may decide about a pending request. `pending` is not a
/// decision, so it cannot be sent back through review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Approved")]
    Approved,
    #[serde(rename = "rejected")]
    Rejected,
}

impl From<Verdict> for RequestStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Approved => RequestStatus::Approved,
            Verdict::Rejected => RequestStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PremiumRequest {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub biodata_id: Option<i64>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl PremiumRequest {
    pub fn pending(email: &str, name: String, biodata_id: Option<i64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name,
            biodata_id,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
