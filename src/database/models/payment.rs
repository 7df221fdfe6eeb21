use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum PaymentStatus {
    #[serde(rename = "pending")]
    #[sqlx(rename = "pending")]
    Pending,
    #[serde(rename = "Approved")]
    #[sqlx(rename = "Approved")]
    Approved,
}

/// A captured payment. Doubles as the contact request for `biodata_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub email: String,
    pub biodata_id: Option<i64>,
    pub amount: f64,
    pub transaction_id: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPayment {
    pub biodata_id: Option<i64>,
    pub amount: f64,
    #[serde(default)]
    pub transaction_id: String,
}

impl Payment {
    pub fn pending(payer: &str, new: NewPayment) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: payer.to_string(),
            biodata_id: new.biodata_id,
            amount: new.amount,
            transaction_id: new.transaction_id,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
