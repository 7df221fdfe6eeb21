use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum BiodataType {
    Male,
    Female,
}

/// A member's matrimonial profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Biodata {
    pub biodata_id: i64,
    pub email: String,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: BiodataFields,
}

/// Owner-editable part of a biodata. A replace writes every field, so anything
/// missing from the request body is stored as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BiodataFields {
    pub biodata_type: BiodataType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_image: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub race: String,
    #[serde(default)]
    pub fathers_name: String,
    #[serde(default)]
    pub mothers_name: String,
    #[serde(default)]
    pub permanent_division: String,
    #[serde(default)]
    pub present_division: String,
    #[serde(default)]
    pub expected_partner_age: Option<i32>,
    #[serde(default)]
    pub expected_partner_height: String,
    #[serde(default)]
    pub expected_partner_weight: String,
    #[serde(default)]
    pub mobile_number: String,
}

/// Catalog totals for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BiodataCounts {
    pub total: i64,
    pub male: i64,
    pub female: i64,
    pub premium: i64,
}
