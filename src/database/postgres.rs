use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::database::manager::DatabaseManager;
use crate::database::models::{
    Biodata, BiodataCounts, BiodataFields, BiodataType, Favorite, Payment, PaymentStatus,
    PremiumRequest, RequestStatus, Role, SuccessStory, UpsertOutcome, User,
};
use crate::database::store::{
    BiodataStore, FavoriteStore, PaymentStore, PremiumRequestStore, Promotion, Store, StoreResult,
    SuccessStoryStore, UserStore,
};
use crate::filter::BiodataFilter;

const BIODATA_COLUMNS: &str = "biodata_id, email, biodata_type, name, profile_image, date_of_birth, \
     height, weight, age, occupation, race, fathers_name, mothers_name, permanent_division, \
     present_division, expected_partner_age, expected_partner_height, expected_partner_weight, \
     mobile_number";

/// Postgres-backed store, one table per collection
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn get_user(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT email, name, photo_url, role, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_user_if_absent(&self, user: User) -> StoreResult<UpsertOutcome> {
        let result = sqlx::query(
            "INSERT INTO users (email, name, photo_url, role, created_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.photo_url)
        .bind(user.role)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(if result.rows_affected() == 0 {
            UpsertOutcome::AlreadyExists
        } else {
            UpsertOutcome::Inserted
        })
    }

    async fn set_role(&self, email: &str, role: Role) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE users SET role = $2 WHERE email = $1")
            .bind(email)
            .bind(role)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT email, name, photo_url, role, created_at FROM users ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn emails_with_role(&self, role: Role) -> StoreResult<Vec<String>> {
        let emails = sqlx::query_scalar::<_, String>("SELECT email FROM users WHERE role = $1")
            .bind(role)
            .fetch_all(&self.pool)
            .await?;
        Ok(emails)
    }
}

#[async_trait]
impl BiodataStore for PgStore {
    async fn list_biodata(&self, filter: &BiodataFilter) -> StoreResult<Vec<Biodata>> {
        let mut builder = sqlx::QueryBuilder::new(format!("SELECT {BIODATA_COLUMNS} FROM biodatas"));
        filter.push_sql(&mut builder);
        let rows = builder.build_query_as::<Biodata>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn list_biodata_by_owners(&self, emails: &[String]) -> StoreResult<Vec<Biodata>> {
        if emails.is_empty() {
            return Ok(vec![]);
        }
        let query = format!("SELECT {BIODATA_COLUMNS} FROM biodatas WHERE email = ANY($1) ORDER BY biodata_id");
        let rows = sqlx::query_as::<_, Biodata>(&query)
            .bind(emails)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_biodata(&self, biodata_id: i64) -> StoreResult<Option<Biodata>> {
        let query = format!("SELECT {BIODATA_COLUMNS} FROM biodatas WHERE biodata_id = $1");
        let row = sqlx::query_as::<_, Biodata>(&query)
            .bind(biodata_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_biodata_by_owner(&self, email: &str) -> StoreResult<Option<Biodata>> {
        let query = format!("SELECT {BIODATA_COLUMNS} FROM biodatas WHERE email = $1 ORDER BY biodata_id LIMIT 1");
        let row = sqlx::query_as::<_, Biodata>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_similar(
        &self,
        biodata_type: BiodataType,
        exclude_id: i64,
        limit: usize,
    ) -> StoreResult<Vec<Biodata>> {
        let query = format!(
            "SELECT {BIODATA_COLUMNS} FROM biodatas
             WHERE biodata_type = $1 AND biodata_id <> $2
             ORDER BY biodata_id LIMIT $3"
        );
        let rows = sqlx::query_as::<_, Biodata>(&query)
            .bind(biodata_type)
            .bind(exclude_id)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_biodata(&self, owner: &str, fields: BiodataFields) -> StoreResult<Biodata> {
        let query = format!(
            "INSERT INTO biodatas ({BIODATA_COLUMNS})
             SELECT COALESCE(MAX(biodata_id), 0) + 1, $1, $2, $3, $4, $5, $6, $7, $8, $9,
                    $10, $11, $12, $13, $14, $15, $16, $17, $18
             FROM biodatas
             RETURNING {BIODATA_COLUMNS}"
        );

        let mut tx = self.pool.begin().await?;

        // Conflicts with itself, so concurrent creators read MAX one at a time.
        // Readers are not blocked. Released at commit or rollback.
        sqlx::query("LOCK TABLE biodatas IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let row = bind_fields(sqlx::query_as::<_, Biodata>(&query).bind(owner), &fields)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn replace_biodata(
        &self,
        biodata_id: i64,
        owner: &str,
        fields: BiodataFields,
    ) -> StoreResult<Option<Biodata>> {
        let query = format!(
            "UPDATE biodatas SET
                biodata_type = $2, name = $3, profile_image = $4, date_of_birth = $5,
                height = $6, weight = $7, age = $8, occupation = $9, race = $10,
                fathers_name = $11, mothers_name = $12, permanent_division = $13,
                present_division = $14, expected_partner_age = $15,
                expected_partner_height = $16, expected_partner_weight = $17,
                mobile_number = $18
             WHERE biodata_id = $19 AND email = $1
             RETURNING {BIODATA_COLUMNS}"
        );
        let row = bind_fields(sqlx::query_as::<_, Biodata>(&query).bind(owner), &fields)
            .bind(biodata_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn count_biodata(&self) -> StoreResult<BiodataCounts> {
        let row = sqlx::query(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE b.biodata_type = 'Male') AS male,
                COUNT(*) FILTER (WHERE b.biodata_type = 'Female') AS female,
                COUNT(*) FILTER (WHERE u.role = 'premium') AS premium
             FROM biodatas b
             LEFT JOIN users u ON u.email = b.email",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(BiodataCounts {
            total: row.try_get("total")?,
            male: row.try_get("male")?,
            female: row.try_get("female")?,
            premium: row.try_get("premium")?,
        })
    }
}

/// Bind the editable biodata fields as $2..$18, after the owner at $1
fn bind_fields<'q>(
    query: sqlx::query::QueryAs<'q, sqlx::Postgres, Biodata, sqlx::postgres::PgArguments>,
    fields: &'q BiodataFields,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, Biodata, sqlx::postgres::PgArguments> {
    query
        .bind(fields.biodata_type)
        .bind(&fields.name)
        .bind(&fields.profile_image)
        .bind(&fields.date_of_birth)
        .bind(&fields.height)
        .bind(&fields.weight)
        .bind(fields.age)
        .bind(&fields.occupation)
        .bind(&fields.race)
        .bind(&fields.fathers_name)
        .bind(&fields.mothers_name)
        .bind(&fields.permanent_division)
        .bind(&fields.present_division)
        .bind(fields.expected_partner_age)
        .bind(&fields.expected_partner_height)
        .bind(&fields.expected_partner_weight)
        .bind(&fields.mobile_number)
}

#[async_trait]
impl FavoriteStore for PgStore {
    async fn add_favorite(&self, favorite: Favorite) -> StoreResult<Favorite> {
        let row = sqlx::query_as::<_, Favorite>(
            "INSERT INTO favorites_biodata (id, email, biodata_id, name, permanent_division, occupation)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, email, biodata_id, name, permanent_division, occupation",
        )
        .bind(favorite.id)
        .bind(&favorite.email)
        .bind(favorite.biodata_id)
        .bind(&favorite.name)
        .bind(&favorite.permanent_division)
        .bind(&favorite.occupation)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_favorites(&self, owner: &str) -> StoreResult<Vec<Favorite>> {
        let rows = sqlx::query_as::<_, Favorite>(
            "SELECT id, email, biodata_id, name, permanent_division, occupation
             FROM favorites_biodata WHERE email = $1",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn remove_favorite(&self, owner: &str, biodata_id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM favorites_biodata WHERE email = $1 AND biodata_id = $2")
            .bind(owner)
            .bind(biodata_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl PremiumRequestStore for PgStore {
    async fn insert_pending_request(&self, request: PremiumRequest) -> StoreResult<Option<PremiumRequest>> {
        // The partial unique index turns a concurrent duplicate into a no-op
        let row = sqlx::query_as::<_, PremiumRequest>(
            "INSERT INTO premium_requests (id, email, name, biodata_id, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (email) WHERE status = 'pending' DO NOTHING
             RETURNING id, email, name, biodata_id, status, created_at",
        )
        .bind(request.id)
        .bind(&request.email)
        .bind(&request.name)
        .bind(request.biodata_id)
        .bind(request.status)
        .bind(request.created_at)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_requests_by_status(&self, status: RequestStatus) -> StoreResult<Vec<PremiumRequest>> {
        let rows = sqlx::query_as::<_, PremiumRequest>(
            "SELECT id, email, name, biodata_id, status, created_at
             FROM premium_requests WHERE status = $1 ORDER BY created_at",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn reject_pending_request(&self, email: &str) -> StoreResult<u64> {
        let result = sqlx::query("UPDATE premium_requests SET status = $2 WHERE email = $1 AND status = $3")
            .bind(email)
            .bind(RequestStatus::Rejected)
            .bind(RequestStatus::Pending)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn promote_to_premium(&self, email: &str, require_request: bool) -> StoreResult<Promotion> {
        let mut tx = self.pool.begin().await?;

        let requests = sqlx::query("UPDATE premium_requests SET status = $2 WHERE email = $1 AND status = $3")
            .bind(email)
            .bind(RequestStatus::Approved)
            .bind(RequestStatus::Pending)
            .execute(&mut *tx)
            .await?;

        let user = sqlx::query("UPDATE users SET role = $2 WHERE email = $1")
            .bind(email)
            .bind(Role::Premium)
            .execute(&mut *tx)
            .await?;

        let promotion = Promotion {
            requests_approved: requests.rows_affected(),
            user_found: user.rows_affected() > 0,
        };

        if !promotion.user_found || (require_request && promotion.requests_approved == 0) {
            tx.rollback().await?;
        } else {
            tx.commit().await?;
        }
        Ok(promotion)
    }
}

#[async_trait]
impl PaymentStore for PgStore {
    async fn insert_payment(&self, payment: Payment) -> StoreResult<Payment> {
        let row = sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (id, email, biodata_id, amount, transaction_id, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, email, biodata_id, amount, transaction_id, status, created_at",
        )
        .bind(payment.id)
        .bind(&payment.email)
        .bind(payment.biodata_id)
        .bind(payment.amount)
        .bind(&payment.transaction_id)
        .bind(payment.status)
        .bind(payment.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_payments_for(&self, email: &str) -> StoreResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, Payment>(
            "SELECT id, email, biodata_id, amount, transaction_id, status, created_at
             FROM payments WHERE email = $1 ORDER BY created_at",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_payments_by_status(&self, status: PaymentStatus) -> StoreResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, Payment>(
            "SELECT id, email, biodata_id, amount, transaction_id, status, created_at
             FROM payments WHERE status = $1 ORDER BY created_at",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn approve_payments(&self, email: &str) -> StoreResult<u64> {
        let result = sqlx::query("UPDATE payments SET status = $2 WHERE email = $1")
            .bind(email)
            .bind(PaymentStatus::Approved)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn total_revenue(&self) -> StoreResult<f64> {
        let total = sqlx::query_scalar::<_, f64>("SELECT COALESCE(SUM(amount), 0)::DOUBLE PRECISION FROM payments")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}

#[async_trait]
impl SuccessStoryStore for PgStore {
    async fn list_success_stories(&self) -> StoreResult<Vec<SuccessStory>> {
        let rows = sqlx::query_as::<_, SuccessStory>(
            "SELECT id, biodata_id_self, biodata_id_partner, image, marriage_date, rating, review
             FROM success_stories ORDER BY marriage_date DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        DatabaseManager::health_check(&self.pool).await
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::DatabaseConfig;
    use crate::testing::biodata_fields;

    async fn connect() -> PgStore {
        let config = DatabaseConfig {
            url: std::env::var("DATABASE_URL").ok(),
            max_connections: 10,
            connection_timeout: 5,
        };
        let pool = DatabaseManager::connect(&config).await.unwrap();
        DatabaseManager::ensure_schema(&pool).await.unwrap();
        PgStore::new(pool)
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn concurrent_creates_get_consecutive_ids() {
        let store = Arc::new(connect().await);
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let owner = format!("race{i}-{}@x.com", uuid::Uuid::new_v4());
                    store.create_biodata(&owner, biodata_fields(BiodataType::Male)).await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap().unwrap().biodata_id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
        // Other writers may share the table, so only the spread is checked
        assert!(ids[7] - ids[0] >= 7);
    }
}
