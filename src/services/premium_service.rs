use thiserror::Error;
use tracing::info;

use crate::database::manager::DatabaseError;
use crate::database::models::{PremiumRequest, RequestStatus, Verdict};
use crate::database::store::{Promotion, Store};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("A premium request for '{0}' is already pending")]
    AlreadyPending(String),

    #[error("No pending premium request for '{0}'")]
    RequestNotFound(String),

    #[error("No user found for '{0}'")]
    UserNotFound(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Premium upgrade workflow: `none -> pending -> {Approved, rejected}`.
///
/// Approval through the review queue (`decide`) and the direct admin grant
/// (`grant_premium`) both end in [`PremiumService::promote`], which writes the
/// request status and the member's role as one store operation.
pub struct PremiumService<'a> {
    store: &'a dyn Store,
}

impl<'a> PremiumService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// File a pending request. Only an existing *pending* request blocks a new
    /// one; approved or rejected history does not.
    pub async fn submit(
        &self,
        email: &str,
        name: String,
        biodata_id: Option<i64>,
    ) -> Result<PremiumRequest, WorkflowError> {
        let request = PremiumRequest::pending(email, name, biodata_id);
        match self.store.insert_pending_request(request).await? {
            Some(created) => {
                info!("Premium request submitted by {}", email);
                Ok(created)
            }
            None => Err(WorkflowError::AlreadyPending(email.to_string())),
        }
    }

    pub async fn list_pending(&self) -> Result<Vec<PremiumRequest>, WorkflowError> {
        Ok(self.store.list_requests_by_status(RequestStatus::Pending).await?)
    }

    /// Decide the email's pending request. Approving also promotes the member
    /// to premium. Requests decided earlier keep their status.
    pub async fn decide(&self, email: &str, verdict: Verdict) -> Result<Decision, WorkflowError> {
        let requests_updated = match verdict {
            Verdict::Approved => self.promote(email, true).await?.requests_approved,
            Verdict::Rejected => {
                let updated = self.store.reject_pending_request(email).await?;
                if updated == 0 {
                    return Err(WorkflowError::RequestNotFound(email.to_string()));
                }
                info!("Premium request for {} rejected", email);
                updated
            }
        };

        Ok(Decision {
            email: email.to_string(),
            status: verdict.into(),
            requests_updated,
            role_promoted: verdict == Verdict::Approved,
        })
    }

    /// Admin shortcut: approve the pending request if there is one and promote
    /// the member, even when no request was ever filed.
    pub async fn grant_premium(&self, email: &str) -> Result<Decision, WorkflowError> {
        let promotion = self.promote(email, false).await?;
        Ok(Decision {
            email: email.to_string(),
            status: RequestStatus::Approved,
            requests_updated: promotion.requests_approved,
            role_promoted: true,
        })
    }

    async fn promote(&self, email: &str, require_request: bool) -> Result<Promotion, WorkflowError> {
        let promotion = self.store.promote_to_premium(email, require_request).await?;

        if require_request && promotion.requests_approved == 0 {
            return Err(WorkflowError::RequestNotFound(email.to_string()));
        }
        if !promotion.user_found {
            return Err(WorkflowError::UserNotFound(email.to_string()));
        }

        info!(
            "Promoted {} to premium ({} request(s) approved)",
            email, promotion.requests_approved
        );
        Ok(promotion)
    }
}

/// Outcome of a review decision or direct grant
#[derive(Debug, Clone, serde::Serialize)]
pub struct Decision {
    pub email: String,
    pub status: RequestStatus,
    pub requests_updated: u64,
    pub role_promoted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{NewUser, Role, User};
    use crate::database::store::{PremiumRequestStore, UserStore};
    use crate::database::MemoryStore;

    async fn store_with_user(email: &str) -> MemoryStore {
        let store = MemoryStore::new();
        let user = User::from(NewUser { email: email.to_string(), name: "A".to_string(), photo_url: None });
        store.insert_user_if_absent(user).await.unwrap();
        store
    }

    #[tokio::test]
    async fn second_submit_while_pending_is_rejected() {
        let store = store_with_user("a@x.com").await;
        let service = PremiumService::new(&store);

        service.submit("a@x.com", "A".to_string(), Some(1)).await.unwrap();
        let err = service.submit("a@x.com", "A".to_string(), Some(1)).await.unwrap_err();
        assert!(matches!(err, WorkflowError::AlreadyPending(_)));
        assert_eq!(service.list_pending().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn approval_promotes_and_later_submit_is_allowed() {
        let store = store_with_user("a@x.com").await;
        let service = PremiumService::new(&store);

        service.submit("a@x.com", "A".to_string(), None).await.unwrap();
        let decision = service.decide("a@x.com", Verdict::Approved).await.unwrap();
        assert!(decision.role_promoted);
        assert_eq!(decision.requests_updated, 1);
        assert_eq!(store.get_user("a@x.com").await.unwrap().unwrap().role, Role::Premium);
        assert!(service.list_pending().await.unwrap().is_empty());

        // No "already premium" guard
        assert!(service.submit("a@x.com", "A".to_string(), None).await.is_ok());
    }

    #[tokio::test]
    async fn rejection_leaves_role_untouched() {
        let store = store_with_user("a@x.com").await;
        let service = PremiumService::new(&store);

        service.submit("a@x.com", "A".to_string(), None).await.unwrap();
        let decision = service.decide("a@x.com", Verdict::Rejected).await.unwrap();
        assert!(!decision.role_promoted);
        assert_eq!(store.get_user("a@x.com").await.unwrap().unwrap().role, Role::None);
    }

    #[tokio::test]
    async fn approving_without_request_writes_nothing() {
        let store = store_with_user("a@x.com").await;
        let service = PremiumService::new(&store);

        let err = service.decide("a@x.com", Verdict::Approved).await.unwrap_err();
        assert!(matches!(err, WorkflowError::RequestNotFound(_)));
        assert_eq!(store.get_user("a@x.com").await.unwrap().unwrap().role, Role::None);
    }

    #[tokio::test]
    async fn direct_grant_needs_no_request_but_needs_user() {
        let store = store_with_user("a@x.com").await;
        let service = PremiumService::new(&store);

        let decision = service.grant_premium("a@x.com").await.unwrap();
        assert_eq!(decision.requests_updated, 0);
        assert_eq!(store.get_user("a@x.com").await.unwrap().unwrap().role, Role::Premium);

        let err = service.grant_premium("ghost@x.com").await.unwrap_err();
        assert!(matches!(err, WorkflowError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn rejecting_a_new_request_keeps_the_earlier_approval() {
        let store = store_with_user("a@x.com").await;
        let service = PremiumService::new(&store);

        service.submit("a@x.com", "A".to_string(), None).await.unwrap();
        service.decide("a@x.com", Verdict::Approved).await.unwrap();
        service.submit("a@x.com", "A".to_string(), None).await.unwrap();

        let decision = service.decide("a@x.com", Verdict::Rejected).await.unwrap();
        assert_eq!(decision.requests_updated, 1);

        let approved = store.list_requests_by_status(RequestStatus::Approved).await.unwrap();
        let rejected = store.list_requests_by_status(RequestStatus::Rejected).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(rejected.len(), 1);
        assert!(service.list_pending().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn approving_a_new_request_keeps_the_earlier_rejection() {
        let store = store_with_user("a@x.com").await;
        let service = PremiumService::new(&store);

        service.submit("a@x.com", "A".to_string(), None).await.unwrap();
        service.decide("a@x.com", Verdict::Rejected).await.unwrap();
        service.submit("a@x.com", "A".to_string(), None).await.unwrap();

        let decision = service.decide("a@x.com", Verdict::Approved).await.unwrap();
        assert_eq!(decision.requests_updated, 1);
        assert_eq!(store.list_requests_by_status(RequestStatus::Rejected).await.unwrap().len(), 1);
        assert_eq!(store.list_requests_by_status(RequestStatus::Approved).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deciding_twice_finds_nothing_pending() {
        let store = store_with_user("a@x.com").await;
        let service = PremiumService::new(&store);

        service.submit("a@x.com", "A".to_string(), None).await.unwrap();
        service.decide("a@x.com", Verdict::Rejected).await.unwrap();

        let err = service.decide("a@x.com", Verdict::Rejected).await.unwrap_err();
        assert!(matches!(err, WorkflowError::RequestNotFound(_)));
        assert_eq!(store.list_requests_by_status(RequestStatus::Rejected).await.unwrap().len(), 1);
    }

    #[test]
    fn pending_is_not_a_verdict() {
        assert!(serde_json::from_str::<Verdict>("\"pending\"").is_err());
        assert_eq!(serde_json::from_str::<Verdict>("\"Approved\"").unwrap(), Verdict::Approved);
        assert_eq!(serde_json::from_str::<Verdict>("\"rejected\"").unwrap(), Verdict::Rejected);
    }
}
