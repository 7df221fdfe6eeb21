use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SuccessStory {
    pub id: Uuid,
    pub biodata_id_self: i64,
    pub biodata_id_partner: i64,
    pub image: String,
    pub marriage_date: NaiveDate,
    pub rating: i32,
    pub review: String,
}
