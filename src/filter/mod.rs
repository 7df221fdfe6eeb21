use serde::Deserialize;

use crate::database::models::{Biodata, BiodataType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Query-string filter for the biodata listing. Every dimension is optional
/// and an absent one places no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BiodataFilter {
    #[serde(rename = "type")]
    pub biodata_type: Option<BiodataType>,
    pub division: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    /// Orders by age when present
    pub sort: Option<SortDirection>,
}

impl BiodataFilter {
    pub fn matches(&self, biodata: &Biodata) -> bool {
        let fields = &biodata.fields;

        if let Some(biodata_type) = self.biodata_type {
            if fields.biodata_type != biodata_type {
                return false;
            }
        }
        if let Some(division) = &self.division {
            if &fields.permanent_division != division {
                return false;
            }
        }
        if self.min_age.is_some() || self.max_age.is_some() {
            let Some(age) = fields.age else {
                return false;
            };
            if self.min_age.is_some_and(|min| age < min) {
                return false;
            }
            if self.max_age.is_some_and(|max| age > max) {
                return false;
            }
        }
        true
    }

    /// Push the WHERE/ORDER BY clauses onto a query that already has its SELECT
    pub fn push_sql<'a>(&'a self, builder: &mut sqlx::QueryBuilder<'a, sqlx::Postgres>) {
        let mut keyword = " WHERE ";

        if let Some(biodata_type) = self.biodata_type {
            builder.push(keyword).push("biodata_type = ").push_bind(biodata_type);
            keyword = " AND ";
        }
        if let Some(division) = &self.division {
            builder.push(keyword).push("permanent_division = ").push_bind(division);
            keyword = " AND ";
        }
        if let Some(min) = self.min_age {
            builder.push(keyword).push("age >= ").push_bind(min);
            keyword = " AND ";
        }
        if let Some(max) = self.max_age {
            builder.push(keyword).push("age <= ").push_bind(max);
        }

        match self.sort {
            Some(direction) => builder.push(format!(" ORDER BY age {} NULLS LAST", direction.to_sql())),
            None => builder.push(" ORDER BY biodata_id ASC"),
        };
    }
}

/// Sort profiles by age, keeping profiles without an age last
pub fn sort_by_age(profiles: &mut [Biodata], direction: SortDirection) {
    profiles.sort_by(|a, b| match (a.fields.age, b.fields.age) {
        (Some(x), Some(y)) => match direction {
            SortDirection::Asc => x.cmp(&y),
            SortDirection::Desc => y.cmp(&x),
        },
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::biodata_fields;

    fn profile(id: i64, biodata_type: BiodataType, division: &str, age: Option<i32>) -> Biodata {
        let mut fields = biodata_fields(biodata_type);
        fields.permanent_division = division.to_string();
        fields.age = age;
        Biodata { biodata_id: id, email: format!("{id}@x.com"), fields }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = BiodataFilter::default();
        assert!(filter.matches(&profile(1, BiodataType::Male, "Dhaka", None)));
    }

    #[test]
    fn age_range_is_inclusive() {
        let filter = BiodataFilter { min_age: Some(25), max_age: Some(35), ..Default::default() };
        assert!(filter.matches(&profile(1, BiodataType::Male, "Dhaka", Some(25))));
        assert!(filter.matches(&profile(2, BiodataType::Male, "Dhaka", Some(35))));
        assert!(!filter.matches(&profile(3, BiodataType::Male, "Dhaka", Some(24))));
        assert!(!filter.matches(&profile(4, BiodataType::Male, "Dhaka", Some(36))));
        assert!(!filter.matches(&profile(5, BiodataType::Male, "Dhaka", None)));
    }

    #[test]
    fn single_bound_and_exact_fields() {
        let filter = BiodataFilter {
            biodata_type: Some(BiodataType::Female),
            division: Some("Khulna".to_string()),
            min_age: Some(30),
            ..Default::default()
        };
        assert!(filter.matches(&profile(1, BiodataType::Female, "Khulna", Some(60))));
        assert!(!filter.matches(&profile(2, BiodataType::Male, "Khulna", Some(60))));
        assert!(!filter.matches(&profile(3, BiodataType::Female, "Dhaka", Some(60))));
    }

    #[test]
    fn sorts_by_age_with_unknown_last() {
        let mut profiles = vec![
            profile(1, BiodataType::Male, "Dhaka", Some(30)),
            profile(2, BiodataType::Male, "Dhaka", None),
            profile(3, BiodataType::Male, "Dhaka", Some(22)),
        ];
        sort_by_age(&mut profiles, SortDirection::Desc);
        let ids: Vec<i64> = profiles.iter().map(|p| p.biodata_id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }
}
