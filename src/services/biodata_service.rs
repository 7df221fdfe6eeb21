use crate::database::manager::DatabaseError;
use crate::database::models::{Biodata, BiodataType, Role};
use crate::database::store::Store;
use crate::filter::{sort_by_age, SortDirection};

pub const PREMIUM_PREVIEW_LIMIT: usize = 6;
pub const SIMILAR_LIMIT: usize = 3;

/// Profiles owned by premium members, ordered by age.
///
/// Reads the premium email set first and the profiles second. A role change
/// landing between the two reads can include or drop a borderline profile.
pub async fn premium_preview(
    store: &dyn Store,
    direction: SortDirection,
    limit: usize,
) -> Result<Vec<Biodata>, DatabaseError> {
    let premium_emails = store.emails_with_role(Role::Premium).await?;
    let mut profiles = store.list_biodata_by_owners(&premium_emails).await?;
    sort_by_age(&mut profiles, direction);
    profiles.truncate(limit);
    Ok(profiles)
}

pub async fn similar(
    store: &dyn Store,
    biodata_type: BiodataType,
    exclude_id: i64,
) -> Result<Vec<Biodata>, DatabaseError> {
    store.list_similar(biodata_type, exclude_id, SIMILAR_LIMIT).await
}
