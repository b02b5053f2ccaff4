//! Transactional workflow repository.
//!
//! Every workflow operation that touches more than one table runs here, in
//! a single transaction. Each UPDATE is guarded on the current status, so a
//! concurrent operation that already moved the row makes the guard match
//! zero rows; that surfaces as `InvalidState` and the whole transaction
//! rolls back. Two racing admins cannot both win.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;
use foodbridge_entity::claim::{Claim, CreateClaim};
use foodbridge_entity::delivery::{CreateDelivery, Delivery, DeliveryStatus};
use foodbridge_entity::donation::Donation;

/// Result of approving a claim.
#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    /// The approved claim.
    pub claim: Claim,
    /// The donation, now `approved`.
    pub donation: Donation,
    /// NGOs whose competing pending claims were auto-rejected.
    pub rejected_ngo_ids: Vec<Uuid>,
}

/// Result of an NGO confirming receipt.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    /// The completed claim.
    pub claim: Claim,
    /// The completed delivery.
    pub delivery: Delivery,
    /// The completed donation.
    pub donation: Donation,
}

/// Repository running multi-entity workflow transitions transactionally.
#[derive(Debug, Clone)]
pub struct WorkflowRepository {
    pool: PgPool,
}

impl WorkflowRepository {
    /// Create a new workflow repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }

    /// Insert a pending claim and move the donation to `requested`.
    ///
    /// The insert re-checks requestability inside the transaction; the
    /// service's earlier read may be stale by the time we get here.
    pub async fn submit_claim(&self, data: &CreateClaim) -> AppResult<Claim> {
        let mut tx = self.begin().await?;

        let claim = sqlx::query_as::<_, Claim>(
            "INSERT INTO claims (donation_id, ngo_id, quantity, status) \
             SELECT $1, $2, $3, 'pending' \
             WHERE EXISTS (\
                 SELECT 1 FROM donations \
                 WHERE id = $1 AND status IN ('available', 'requested') AND expiry_time > NOW()\
             ) \
             RETURNING *",
        )
        .bind(data.donation_id)
        .bind(data.ngo_id)
        .bind(data.quantity)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("claims_donation_ngo_active_key") =>
            {
                AppError::conflict("You already have an active claim on this donation")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create claim", e),
        })?
        .ok_or_else(|| AppError::invalid_state("Donation is no longer open for claims"))?;

        sqlx::query("UPDATE donations SET status = 'requested', updated_at = NOW() WHERE id = $1 AND status = 'available'")
            .bind(data.donation_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark donation requested", e))?;

        Self::commit(tx).await?;
        Ok(claim)
    }

    /// Approve a pending claim: first approval wins.
    ///
    /// The same transaction rejects every competing pending claim and moves
    /// the donation to `approved`.
    pub async fn approve_claim(&self, claim_id: Uuid) -> AppResult<ApprovalOutcome> {
        let mut tx = self.begin().await?;

        let claim = sqlx::query_as::<_, Claim>(
            "UPDATE claims SET status = 'approved', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(claim_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to approve claim", e))?
        .ok_or_else(|| AppError::invalid_state("Claim is no longer pending"))?;

        let rejected: Vec<(Uuid,)> = sqlx::query_as(
            "UPDATE claims SET status = 'rejected', \
                    decision_reason = 'Another claim for this donation was approved', \
                    updated_at = NOW() \
             WHERE donation_id = $1 AND id <> $2 AND status = 'pending' \
             RETURNING ngo_id",
        )
        .bind(claim.donation_id)
        .bind(claim_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to reject sibling claims", e)
        })?;

        let donation = sqlx::query_as::<_, Donation>(
            "UPDATE donations SET status = 'approved', updated_at = NOW() \
             WHERE id = $1 AND status IN ('available', 'requested') RETURNING *",
        )
        .bind(claim.donation_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to approve donation", e))?
        .ok_or_else(|| AppError::invalid_state("Donation is no longer open for approval"))?;

        Self::commit(tx).await?;
        Ok(ApprovalOutcome {
            claim,
            donation,
            rejected_ngo_ids: rejected.into_iter().map(|(id,)| id).collect(),
        })
    }

    /// Reject a pending or approved claim.
    ///
    /// The guard also refuses once a delivery exists for the claim; an
    /// assignment racing this rejection makes the UPDATE match zero rows.
    /// If no approved claim remains afterwards, the donation reopens as
    /// `available` (unless it already moved past the claimable phase).
    pub async fn reject_claim(&self, claim_id: Uuid, reason: &str) -> AppResult<(Claim, Donation)> {
        let mut tx = self.begin().await?;

        let claim = sqlx::query_as::<_, Claim>(
            "UPDATE claims SET status = 'rejected', decision_reason = $2, updated_at = NOW() \
             WHERE id = $1 AND status IN ('pending', 'approved') \
               AND NOT EXISTS (SELECT 1 FROM deliveries WHERE claim_id = $1) \
             RETURNING *",
        )
        .bind(claim_id)
        .bind(reason)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reject claim", e))?
        .ok_or_else(|| AppError::invalid_state("Claim can no longer be rejected"))?;

        let approved_left: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM claims WHERE donation_id = $1 AND status = 'approved'",
        )
        .bind(claim.donation_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count approved claims", e)
        })?;

        if approved_left == 0 {
            sqlx::query(
                "UPDATE donations SET status = 'available', updated_at = NOW() \
                 WHERE id = $1 AND status IN ('requested', 'approved')",
            )
            .bind(claim.donation_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to reopen donation", e)
            })?;
        }

        let donation = sqlx::query_as::<_, Donation>("SELECT * FROM donations WHERE id = $1")
            .bind(claim.donation_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load donation", e))?;

        Self::commit(tx).await?;
        Ok((claim, donation))
    }

    /// Create the delivery for an approved claim.
    ///
    /// The insert is guarded on the claim still being approved, and the
    /// unique index on `claim_id` turns a duplicate assignment into
    /// `Conflict`.
    pub async fn create_delivery(&self, data: &CreateDelivery) -> AppResult<Delivery> {
        sqlx::query_as::<_, Delivery>(
            "INSERT INTO deliveries (donation_id, claim_id, volunteer_id, status, assigned_at) \
             SELECT $1, $2, $3, 'assigned', NOW() \
             WHERE EXISTS (SELECT 1 FROM claims WHERE id = $2 AND status = 'approved') \
             RETURNING *",
        )
        .bind(data.donation_id)
        .bind(data.claim_id)
        .bind(data.volunteer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("deliveries_claim_id_key") =>
            {
                AppError::conflict("A delivery is already assigned for this claim")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create delivery", e),
        })?
        .ok_or_else(|| AppError::invalid_state("Claim is not approved"))
    }

    /// Advance a delivery one step along the volunteer chain.
    ///
    /// Stamps the timestamp matching `to` and mirrors `picked_up` /
    /// `reached_ngo` onto the donation.
    pub async fn advance_delivery(
        &self,
        delivery_id: Uuid,
        from: DeliveryStatus,
        to: DeliveryStatus,
    ) -> AppResult<Delivery> {
        let stamp_column = match to {
            DeliveryStatus::Accepted => "accepted_at",
            DeliveryStatus::PickedUp => "picked_up_at",
            DeliveryStatus::ReachedNgo => "reached_ngo_at",
            _ => return Err(AppError::validation(format!("'{to}' is not an advance target"))),
        };

        let mut tx = self.begin().await?;

        let query = format!(
            "UPDATE deliveries SET status = $2, {stamp_column} = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = $3 RETURNING *"
        );
        let delivery = sqlx::query_as::<_, Delivery>(&query)
            .bind(delivery_id)
            .bind(to)
            .bind(from)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to advance delivery", e)
            })?
            .ok_or_else(|| {
                AppError::invalid_transition(format!(
                    "Delivery is no longer '{from}'; cannot move to '{to}'"
                ))
            })?;

        if matches!(to, DeliveryStatus::PickedUp | DeliveryStatus::ReachedNgo) {
            sqlx::query(
                "UPDATE donations SET status = ($2::text)::donation_status, updated_at = NOW() \
                 WHERE id = $1",
            )
            .bind(delivery.donation_id)
            .bind(to.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to mirror donation status", e)
            })?;
        }

        Self::commit(tx).await?;
        Ok(delivery)
    }

    /// Complete claim, delivery, and donation on NGO confirmation.
    pub async fn complete_delivery(&self, claim_id: Uuid) -> AppResult<CompletionOutcome> {
        let mut tx = self.begin().await?;

        let claim = sqlx::query_as::<_, Claim>(
            "UPDATE claims SET status = 'completed', updated_at = NOW() \
             WHERE id = $1 AND status = 'approved' RETURNING *",
        )
        .bind(claim_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to complete claim", e))?
        .ok_or_else(|| AppError::invalid_state("Claim is not approved"))?;

        let delivery = sqlx::query_as::<_, Delivery>(
            "UPDATE deliveries SET status = 'completed', completed_at = NOW(), updated_at = NOW() \
             WHERE claim_id = $1 AND status = 'reached_ngo' RETURNING *",
        )
        .bind(claim_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to complete delivery", e))?
        .ok_or_else(|| AppError::invalid_state("Delivery has not reached the NGO yet"))?;

        let donation = sqlx::query_as::<_, Donation>(
            "UPDATE donations SET status = 'completed', updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(claim.donation_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to complete donation", e))?;

        Self::commit(tx).await?;
        Ok(CompletionOutcome {
            claim,
            delivery,
            donation,
        })
    }
}
