use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::models::{
    Biodata, BiodataCounts, BiodataFields, BiodataType, Favorite, Payment, PaymentStatus,
    PremiumRequest, RequestStatus, Role, SuccessStory, UpsertOutcome, User,
};
use crate::database::store::{
    BiodataStore, FavoriteStore, PaymentStore, PremiumRequestStore, Promotion, Store, StoreResult,
    SuccessStoryStore, UserStore,
};
use crate::filter::{sort_by_age, BiodataFilter};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    biodatas: Vec<Biodata>,
    favorites: Vec<Favorite>,
    premium_requests: Vec<PremiumRequest>,
    payments: Vec<Payment>,
    success_stories: Vec<SuccessStory>,
}

/// Process-local store. Each operation holds the lock for its whole
/// read-modify-write, which gives compound writes the same atomicity the
/// Postgres store gets from transactions.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed read-only success stories
    pub async fn with_success_stories(self, stories: Vec<SuccessStory>) -> Self {
        self.data.write().await.success_stories.extend(stories);
        self
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, email: &str) -> StoreResult<Option<User>> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user_if_absent(&self, user: User) -> StoreResult<UpsertOutcome> {
        let mut data = self.data.write().await;
        if data.users.iter().any(|u| u.email == user.email) {
            return Ok(UpsertOutcome::AlreadyExists);
        }
        data.users.push(user);
        Ok(UpsertOutcome::Inserted)
    }

    async fn set_role(&self, email: &str, role: Role) -> StoreResult<bool> {
        let mut data = self.data.write().await;
        match data.users.iter_mut().find(|u| u.email == email) {
            Some(user) => {
                user.role = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.data.read().await.users.clone())
    }

    async fn emails_with_role(&self, role: Role) -> StoreResult<Vec<String>> {
        let data = self.data.read().await;
        Ok(data
            .users
            .iter()
            .filter(|u| u.role == role)
            .map(|u| u.email.clone())
            .collect())
    }
}

#[async_trait]
impl BiodataStore for MemoryStore {
    async fn list_biodata(&self, filter: &BiodataFilter) -> StoreResult<Vec<Biodata>> {
        let data = self.data.read().await;
        let mut profiles: Vec<Biodata> = data
            .biodatas
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        if let Some(direction) = filter.sort {
            sort_by_age(&mut profiles, direction);
        }
        Ok(profiles)
    }

    async fn list_biodata_by_owners(&self, emails: &[String]) -> StoreResult<Vec<Biodata>> {
        let data = self.data.read().await;
        Ok(data
            .biodatas
            .iter()
            .filter(|b| emails.contains(&b.email))
            .cloned()
            .collect())
    }

    async fn get_biodata(&self, biodata_id: i64) -> StoreResult<Option<Biodata>> {
        let data = self.data.read().await;
        Ok(data.biodatas.iter().find(|b| b.biodata_id == biodata_id).cloned())
    }

    async fn get_biodata_by_owner(&self, email: &str) -> StoreResult<Option<Biodata>> {
        let data = self.data.read().await;
        Ok(data.biodatas.iter().find(|b| b.email == email).cloned())
    }

    async fn list_similar(
        &self,
        biodata_type: BiodataType,
        exclude_id: i64,
        limit: usize,
    ) -> StoreResult<Vec<Biodata>> {
        let data = self.data.read().await;
        Ok(data
            .biodatas
            .iter()
            .filter(|b| b.fields.biodata_type == biodata_type && b.biodata_id != exclude_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create_biodata(&self, owner: &str, fields: BiodataFields) -> StoreResult<Biodata> {
        let mut data = self.data.write().await;
        let next_id = data.biodatas.iter().map(|b| b.biodata_id).max().unwrap_or(0) + 1;
        let biodata = Biodata {
            biodata_id: next_id,
            email: owner.to_string(),
            fields,
        };
        data.biodatas.push(biodata.clone());
        Ok(biodata)
    }

    async fn replace_biodata(
        &self,
        biodata_id: i64,
        owner: &str,
        fields: BiodataFields,
    ) -> StoreResult<Option<Biodata>> {
        let mut data = self.data.write().await;
        let Some(existing) = data
            .biodatas
            .iter_mut()
            .find(|b| b.biodata_id == biodata_id && b.email == owner)
        else {
            return Ok(None);
        };
        existing.fields = fields;
        Ok(Some(existing.clone()))
    }

    async fn count_biodata(&self) -> StoreResult<BiodataCounts> {
        let data = self.data.read().await;
        let premium_owners: Vec<&str> = data
            .users
            .iter()
            .filter(|u| u.role == Role::Premium)
            .map(|u| u.email.as_str())
            .collect();

        let mut counts = BiodataCounts::default();
        for biodata in &data.biodatas {
            counts.total += 1;
            match biodata.fields.biodata_type {
                BiodataType::Male => counts.male += 1,
                BiodataType::Female => counts.female += 1,
            }
            if premium_owners.contains(&biodata.email.as_str()) {
                counts.premium += 1;
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl FavoriteStore for MemoryStore {
    async fn add_favorite(&self, favorite: Favorite) -> StoreResult<Favorite> {
        self.data.write().await.favorites.push(favorite.clone());
        Ok(favorite)
    }

    async fn list_favorites(&self, owner: &str) -> StoreResult<Vec<Favorite>> {
        let data = self.data.read().await;
        Ok(data.favorites.iter().filter(|f| f.email == owner).cloned().collect())
    }

    async fn remove_favorite(&self, owner: &str, biodata_id: i64) -> StoreResult<u64> {
        let mut data = self.data.write().await;
        let before = data.favorites.len();
        data.favorites
            .retain(|f| !(f.email == owner && f.biodata_id == biodata_id));
        Ok((before - data.favorites.len()) as u64)
    }
}

fn is_pending_for(request: &PremiumRequest, email: &str) -> bool {
    request.email == email && request.status == RequestStatus::Pending
}

#[async_trait]
impl PremiumRequestStore for MemoryStore {
    async fn insert_pending_request(&self, request: PremiumRequest) -> StoreResult<Option<PremiumRequest>> {
        let mut data = self.data.write().await;
        let already_pending = data
            .premium_requests
            .iter()
            .any(|r| r.email == request.email && r.status == RequestStatus::Pending);
        if already_pending {
            return Ok(None);
        }
        data.premium_requests.push(request.clone());
        Ok(Some(request))
    }

    async fn list_requests_by_status(&self, status: RequestStatus) -> StoreResult<Vec<PremiumRequest>> {
        let data = self.data.read().await;
        Ok(data
            .premium_requests
            .iter()
            .filter(|r| r.status == status)
            .cloned()
            .collect())
    }

    async fn reject_pending_request(&self, email: &str) -> StoreResult<u64> {
        let mut data = self.data.write().await;
        let mut matched = 0;
        for request in data.premium_requests.iter_mut().filter(|r| is_pending_for(r, email)) {
            request.status = RequestStatus::Rejected;
            matched += 1;
        }
        Ok(matched)
    }

    async fn promote_to_premium(&self, email: &str, require_request: bool) -> StoreResult<Promotion> {
        let mut data = self.data.write().await;
        let requests_approved = data.premium_requests.iter().filter(|r| is_pending_for(r, email)).count() as u64;
        let user_found = data.users.iter().any(|u| u.email == email);

        if !user_found || (require_request && requests_approved == 0) {
            return Ok(Promotion { requests_approved, user_found });
        }

        for request in data.premium_requests.iter_mut().filter(|r| is_pending_for(r, email)) {
            request.status = RequestStatus::Approved;
        }
        for user in data.users.iter_mut().filter(|u| u.email == email) {
            user.role = Role::Premium;
        }
        Ok(Promotion { requests_approved, user_found })
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn insert_payment(&self, payment: Payment) -> StoreResult<Payment> {
        self.data.write().await.payments.push(payment.clone());
        Ok(payment)
    }

    async fn list_payments_for(&self, email: &str) -> StoreResult<Vec<Payment>> {
        let data = self.data.read().await;
        Ok(data.payments.iter().filter(|p| p.email == email).cloned().collect())
    }

    async fn list_payments_by_status(&self, status: PaymentStatus) -> StoreResult<Vec<Payment>> {
        let data = self.data.read().await;
        Ok(data.payments.iter().filter(|p| p.status == status).cloned().collect())
    }

    async fn approve_payments(&self, email: &str) -> StoreResult<u64> {
        let mut data = self.data.write().await;
        let mut matched = 0;
        for payment in data.payments.iter_mut().filter(|p| p.email == email) {
            payment.status = PaymentStatus::Approved;
            matched += 1;
        }
        Ok(matched)
    }

    async fn total_revenue(&self) -> StoreResult<f64> {
        Ok(self.data.read().await.payments.iter().map(|p| p.amount).sum())
    }
}

#[async_trait]
impl SuccessStoryStore for MemoryStore {
    async fn list_success_stories(&self) -> StoreResult<Vec<SuccessStory>> {
        let mut stories = self.data.read().await.success_stories.clone();
        stories.sort_by(|a, b| b.marriage_date.cmp(&a.marriage_date));
        Ok(stories)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
