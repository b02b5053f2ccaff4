//! Donation repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_entity::donation::{CreateDonation, Donation};

/// Repository for donation CRUD and query operations.
#[derive(Debug, Clone)]
pub struct DonationRepository {
    pool: PgPool,
}

impl DonationRepository {
    /// Create a new donation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a donation by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Donation>> {
        sqlx::query_as::<_, Donation>("SELECT * FROM donations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find donation", e))
    }

    /// Post a new donation (status starts as `available`).
    pub async fn create(&self, data: &CreateDonation) -> AppResult<Donation> {
        sqlx::query_as::<_, Donation>(
            "INSERT INTO donations (donor_id, title, description, quantity, unit, \
                                    prepared_time, expiry_time, pickup_lat, pickup_lng, \
                                    pickup_address, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'available') \
             RETURNING *",
        )
        .bind(data.donor_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.quantity)
        .bind(&data.unit)
        .bind(data.prepared_time)
        .bind(data.expiry_time)
        .bind(data.pickup_lat)
        .bind(data.pickup_lng)
        .bind(&data.pickup_address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create donation", e))
    }

    /// List a donor's own donations, newest first.
    pub async fn find_by_donor(&self, donor_id: Uuid) -> AppResult<Vec<Donation>> {
        sqlx::query_as::<_, Donation>(
            "SELECT * FROM donations WHERE donor_id = $1 ORDER BY created_at DESC",
        )
        .bind(donor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list donor donations", e)
        })
    }

    /// List donations NGOs can still claim.
    ///
    /// The expiry filter happens here rather than via a sweep; rows whose
    /// expiry has passed simply stop appearing.
    pub async fn find_requestable(&self) -> AppResult<Vec<Donation>> {
        sqlx::query_as::<_, Donation>(
            "SELECT * FROM donations \
             WHERE status IN ('available', 'requested') AND expiry_time > NOW() \
             ORDER BY expiry_time ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list requestable donations", e)
        })
    }

    /// List all donations with pagination (admin view).
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Donation>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM donations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count donations", e)
            })?;

        let donations = sqlx::query_as::<_, Donation>(
            "SELECT * FROM donations ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list donations", e))?;

        Ok(PageResponse::new(donations, page, total as u64))
    }
}
