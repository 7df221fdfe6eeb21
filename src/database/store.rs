use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Biodata, BiodataCounts, BiodataFields, BiodataType, Favorite, Payment, PaymentStatus,
    PremiumRequest, RequestStatus, Role, SuccessStory, UpsertOutcome, User,
};
use crate::filter::BiodataFilter;

pub type StoreResult<T> = Result<T, DatabaseError>;

/// Identity & role collection
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, email: &str) -> StoreResult<Option<User>>;

    /// Insert unless a user with the same email exists
    async fn insert_user_if_absent(&self, user: User) -> StoreResult<UpsertOutcome>;

    /// Overwrite the role. Returns false when no such user exists.
    async fn set_role(&self, email: &str, role: Role) -> StoreResult<bool>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;

    async fn emails_with_role(&self, role: Role) -> StoreResult<Vec<String>>;
}

#[async_trait]
pub trait BiodataStore: Send + Sync {
    async fn list_biodata(&self, filter: &BiodataFilter) -> StoreResult<Vec<Biodata>>;

    async fn list_biodata_by_owners(&self, emails: &[String]) -> StoreResult<Vec<Biodata>>;

    async fn get_biodata(&self, biodata_id: i64) -> StoreResult<Option<Biodata>>;

    async fn get_biodata_by_owner(&self, email: &str) -> StoreResult<Option<Biodata>>;

    async fn list_similar(
        &self,
        biodata_type: BiodataType,
        exclude_id: i64,
        limit: usize,
    ) -> StoreResult<Vec<Biodata>>;

    /// Insert with id = max existing id + 1, assigned in the same write
    async fn create_biodata(&self, owner: &str, fields: BiodataFields) -> StoreResult<Biodata>;

    /// Replace every editable field of the biodata `owner` holds under `biodata_id`
    async fn replace_biodata(
        &self,
        biodata_id: i64,
        owner: &str,
        fields: BiodataFields,
    ) -> StoreResult<Option<Biodata>>;

    async fn count_biodata(&self) -> StoreResult<BiodataCounts>;
}

#[async_trait]
pub trait FavoriteStore: Send + Sync {
    async fn add_favorite(&self, favorite: Favorite) -> StoreResult<Favorite>;

    async fn list_favorites(&self, owner: &str) -> StoreResult<Vec<Favorite>>;

    /// Delete `owner`'s entries for `biodata_id`, returning how many went
    async fn remove_favorite(&self, owner: &str, biodata_id: i64) -> StoreResult<u64>;
}

#[async_trait]
pub trait PremiumRequestStore: Send + Sync {
    /// Insert unless the email already has a pending request, in which case
    /// nothing is written and `None` comes back
    async fn insert_pending_request(&self, request: PremiumRequest) -> StoreResult<Option<PremiumRequest>>;

    async fn list_requests_by_status(&self, status: RequestStatus) -> StoreResult<Vec<PremiumRequest>>;

    /// Mark the email's pending request rejected. Decided requests are left
    /// as they are. Returns how many rows changed.
    async fn reject_pending_request(&self, email: &str) -> StoreResult<u64>;

    /// Mark the email's pending request Approved and its user premium in one
    /// write. Decided requests are left as they are. Nothing is written unless
    /// the user exists and, when `require_request` is set, a pending request
    /// exists.
    async fn promote_to_premium(&self, email: &str, require_request: bool) -> StoreResult<Promotion>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn insert_payment(&self, payment: Payment) -> StoreResult<Payment>;

    async fn list_payments_for(&self, email: &str) -> StoreResult<Vec<Payment>>;

    async fn list_payments_by_status(&self, status: PaymentStatus) -> StoreResult<Vec<Payment>>;

    async fn approve_payments(&self, email: &str) -> StoreResult<u64>;

    async fn total_revenue(&self) -> StoreResult<f64>;
}

#[async_trait]
pub trait SuccessStoryStore: Send + Sync {
    /// Newest marriage first
    async fn list_success_stories(&self) -> StoreResult<Vec<SuccessStory>>;
}

/// Everything the handlers need from the document store
#[async_trait]
pub trait Store:
    UserStore + BiodataStore + FavoriteStore + PremiumRequestStore + PaymentStore + SuccessStoryStore
{
    async fn health_check(&self) -> StoreResult<()>;
}

/// What a premium promotion touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Promotion {
    pub requests_approved: u64,
    pub user_found: bool,
}
