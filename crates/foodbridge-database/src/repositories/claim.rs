//! Claim repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_entity::claim::{Claim, ClaimDetail, ClaimStatus};

/// Repository for claim read operations.
///
/// Claim writes happen through the workflow repository so they stay in the
/// same transaction as the donation they touch.
#[derive(Debug, Clone)]
pub struct ClaimRepository {
    pool: PgPool,
}

impl ClaimRepository {
    /// Create a new claim repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a claim by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Claim>> {
        sqlx::query_as::<_, Claim>("SELECT * FROM claims WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find claim", e))
    }

    /// Check whether the NGO already has an active claim on the donation.
    pub async fn has_active_claim(&self, donation_id: Uuid, ngo_id: Uuid) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM claims \
             WHERE donation_id = $1 AND ngo_id = $2 AND status IN ('pending', 'approved')",
        )
        .bind(donation_id)
        .bind(ngo_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check active claims", e)
        })?;
        Ok(count > 0)
    }

    /// List an NGO's claims joined with donation display fields.
    pub async fn find_by_ngo(&self, ngo_id: Uuid) -> AppResult<Vec<ClaimDetail>> {
        sqlx::query_as::<_, ClaimDetail>(
            "SELECT c.id, c.donation_id, c.ngo_id, c.quantity, c.status, c.decision_reason, \
                    c.created_at, \
                    d.title AS donation_title, d.status AS donation_status, \
                    d.quantity AS donation_quantity, d.unit AS donation_unit, \
                    d.expiry_time AS donation_expiry_time, \
                    d.pickup_address AS donation_pickup_address \
             FROM claims c JOIN donations d ON d.id = c.donation_id \
             WHERE c.ngo_id = $1 \
             ORDER BY c.created_at DESC",
        )
        .bind(ngo_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list NGO claims", e))
    }

    /// List claims for the admin queue, optionally filtered by status.
    pub async fn find_all(
        &self,
        status: Option<ClaimStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ClaimDetail>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM claims WHERE ($1::claim_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count claims", e))?;

        let claims = sqlx::query_as::<_, ClaimDetail>(
            "SELECT c.id, c.donation_id, c.ngo_id, c.quantity, c.status, c.decision_reason, \
                    c.created_at, \
                    d.title AS donation_title, d.status AS donation_status, \
                    d.quantity AS donation_quantity, d.unit AS donation_unit, \
                    d.expiry_time AS donation_expiry_time, \
                    d.pickup_address AS donation_pickup_address \
             FROM claims c JOIN donations d ON d.id = c.donation_id \
             WHERE ($1::claim_status IS NULL OR c.status = $1) \
             ORDER BY c.created_at ASC \
             LIMIT $2 OFFSET $3",
        )
        .bind(status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list claims", e))?;

        Ok(PageResponse::new(claims, page, total as u64))
    }
}
