//! Fixtures shared by unit tests

use chrono::NaiveDate;
use uuid::Uuid;

use crate::database::models::{BiodataFields, BiodataType, SuccessStory};

pub fn biodata_fields(biodata_type: BiodataType) -> BiodataFields {
    BiodataFields {
        biodata_type,
        name: "Test Member".to_string(),
        profile_image: "https://img.example.com/p.png".to_string(),
        date_of_birth: "1996-04-12".to_string(),
        height: "5'6\"".to_string(),
        weight: "60kg".to_string(),
        age: Some(28),
        occupation: "Engineer".to_string(),
        race: "Asian".to_string(),
        fathers_name: "Father".to_string(),
        mothers_name: "Mother".to_string(),
        permanent_division: "Dhaka".to_string(),
        present_division: "Dhaka".to_string(),
        expected_partner_age: Some(27),
        expected_partner_height: "5'4\"".to_string(),
        expected_partner_weight: "55kg".to_string(),
        mobile_number: "+8801700000000".to_string(),
    }
}

/// A success story married on `date` (YYYY-MM-DD)
pub fn story(date: &str) -> SuccessStory {
    SuccessStory {
        id: Uuid::new_v4(),
        biodata_id_self: 1,
        biodata_id_partner: 2,
        image: String::new(),
        marriage_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("fixture date"),
        rating: 5,
        review: "We met here".to_string(),
    }
}
