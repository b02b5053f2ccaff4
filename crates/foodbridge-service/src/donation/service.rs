//! Donation posting and read views.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use foodbridge_core::error::AppError;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_database::repositories::donation::DonationRepository;
use foodbridge_entity::donation::{CreateDonation, Donation};

use crate::context::RequestContext;

/// Request to post a new donation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDonation {
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Amount of food.
    pub quantity: f64,
    /// Unit for `quantity`.
    pub unit: String,
    /// When the food was prepared.
    pub prepared_time: DateTime<Utc>,
    /// When the food expires.
    pub expiry_time: DateTime<Utc>,
    /// Pickup latitude.
    pub pickup_lat: f64,
    /// Pickup longitude.
    pub pickup_lng: f64,
    /// Pickup street address.
    pub pickup_address: String,
}

/// Manages donation posting and listing.
#[derive(Debug, Clone)]
pub struct DonationService {
    /// Donation repository.
    donation_repo: Arc<DonationRepository>,
}

impl DonationService {
    /// Creates a new donation service.
    pub fn new(donation_repo: Arc<DonationRepository>) -> Self {
        Self { donation_repo }
    }

    /// Posts a new donation for the donor caller.
    pub async fn create_donation(
        &self,
        ctx: &RequestContext,
        req: PostDonation,
    ) -> Result<Donation, AppError> {
        if req.title.trim().is_empty() {
            return Err(AppError::validation("Title must not be empty"));
        }
        if req.quantity <= 0.0 {
            return Err(AppError::validation("Quantity must be positive"));
        }
        if req.unit.trim().is_empty() {
            return Err(AppError::validation("Unit must not be empty"));
        }
        if req.expiry_time <= req.prepared_time {
            return Err(AppError::validation(
                "Expiry time must be after the prepared time",
            ));
        }
        if req.expiry_time <= Utc::now() {
            return Err(AppError::validation("Expiry time is already in the past"));
        }
        if !(-90.0..=90.0).contains(&req.pickup_lat)
            || !(-180.0..=180.0).contains(&req.pickup_lng)
        {
            return Err(AppError::validation("Pickup coordinates are out of range"));
        }
        if req.pickup_address.trim().is_empty() {
            return Err(AppError::validation("Pickup address must not be empty"));
        }

        let donation = self
            .donation_repo
            .create(&CreateDonation {
                donor_id: ctx.user_id,
                title: req.title,
                description: req.description,
                quantity: req.quantity,
                unit: req.unit,
                prepared_time: req.prepared_time,
                expiry_time: req.expiry_time,
                pickup_lat: req.pickup_lat,
                pickup_lng: req.pickup_lng,
                pickup_address: req.pickup_address,
            })
            .await?;

        info!(
            donation_id = %donation.id,
            donor_id = %ctx.user_id,
            title = %donation.title,
            "Donation posted"
        );

        Ok(donation)
    }

    /// Lists the donor caller's own donations.
    pub async fn list_my_donations(&self, ctx: &RequestContext) -> Result<Vec<Donation>, AppError> {
        self.donation_repo.find_by_donor(ctx.user_id).await
    }

    /// Gets a single donation; only the owner or the admin may view it.
    pub async fn get_donation(
        &self,
        ctx: &RequestContext,
        donation_id: Uuid,
    ) -> Result<Donation, AppError> {
        let donation = self
            .donation_repo
            .find_by_id(donation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Donation not found"))?;

        if donation.donor_id != ctx.user_id && !ctx.is_admin() {
            return Err(AppError::forbidden("You can only view your own donations"));
        }

        Ok(donation)
    }

    /// Lists donations NGOs can still claim.
    pub async fn list_requestable(&self) -> Result<Vec<Donation>, AppError> {
        self.donation_repo.find_requestable().await
    }

    /// Lists all donations (admin overview).
    pub async fn list_all(&self, page: PageRequest) -> Result<PageResponse<Donation>, AppError> {
        self.donation_repo.find_all(&page).await
    }
}
