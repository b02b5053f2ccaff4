//! Delivery repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;
use foodbridge_entity::delivery::{Delivery, DeliveryDetail};

/// Repository for delivery read operations.
///
/// Status changes go through the workflow repository.
#[derive(Debug, Clone)]
pub struct DeliveryRepository {
    pool: PgPool,
}

impl DeliveryRepository {
    /// Create a new delivery repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a delivery by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Delivery>> {
        sqlx::query_as::<_, Delivery>("SELECT * FROM deliveries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find delivery", e))
    }

    /// Find the delivery fulfilling a claim, if any.
    pub async fn find_by_claim(&self, claim_id: Uuid) -> AppResult<Option<Delivery>> {
        sqlx::query_as::<_, Delivery>("SELECT * FROM deliveries WHERE claim_id = $1")
            .bind(claim_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find delivery by claim", e)
            })
    }

    /// List a volunteer's deliveries, newest assignment first.
    pub async fn find_by_volunteer(&self, volunteer_id: Uuid) -> AppResult<Vec<Delivery>> {
        sqlx::query_as::<_, Delivery>(
            "SELECT * FROM deliveries WHERE volunteer_id = $1 ORDER BY assigned_at DESC",
        )
        .bind(volunteer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list volunteer deliveries", e)
        })
    }

    /// Fetch a delivery joined with pickup and drop-off display fields.
    pub async fn find_detail(&self, id: Uuid) -> AppResult<Option<DeliveryDetail>> {
        sqlx::query_as::<_, DeliveryDetail>(
            "SELECT dl.id, dl.donation_id, dl.claim_id, dl.volunteer_id, dl.status, \
                    dl.assigned_at, \
                    d.title AS donation_title, d.quantity AS donation_quantity, \
                    d.unit AS donation_unit, d.expiry_time AS donation_expiry_time, \
                    d.pickup_lat, d.pickup_lng, d.pickup_address, \
                    COALESCE(donor.display_name, donor.username) AS donor_name, \
                    COALESCE(ngo.display_name, ngo.username) AS ngo_name, \
                    ngo.delivery_lat AS dropoff_lat, \
                    ngo.delivery_lng AS dropoff_lng, \
                    ngo.delivery_address AS dropoff_address \
             FROM deliveries dl \
             JOIN donations d ON d.id = dl.donation_id \
             JOIN users donor ON donor.id = d.donor_id \
             JOIN claims c ON c.id = dl.claim_id \
             JOIN users ngo ON ngo.id = c.ngo_id \
             WHERE dl.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load delivery detail", e)
        })
    }
}
