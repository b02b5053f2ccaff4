//! The donation workflow engine.
//!
//! Every status transition across donations, claims, and deliveries goes
//! through this service. Preconditions are checked in a fixed order so the
//! first violation wins; the writes themselves run in a single transaction
//! inside the workflow repository, whose status guards catch anything that
//! changed between our reads and the write. Notifications go out only
//! after the transaction commits and can never fail an operation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use foodbridge_core::error::AppError;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_database::repositories::claim::ClaimRepository;
use foodbridge_database::repositories::delivery::DeliveryRepository;
use foodbridge_database::repositories::donation::DonationRepository;
use foodbridge_database::repositories::user::UserRepository;
use foodbridge_database::repositories::workflow::WorkflowRepository;
use foodbridge_entity::claim::{Claim, ClaimDetail, ClaimStatus, CreateClaim};
use foodbridge_entity::delivery::{CreateDelivery, Delivery, DeliveryDetail, DeliveryStatus};
use foodbridge_entity::donation::Donation;
use foodbridge_entity::notification::NotificationSeverity;
use foodbridge_entity::user::UserRole;

use crate::context::RequestContext;
use crate::notification::NotificationService;

/// A claim decision together with the donation it moved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimDecision {
    /// The decided claim.
    pub claim: Claim,
    /// The donation after the decision.
    pub donation: Donation,
}

/// A completed hand-off: claim, delivery, and donation all `completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedDelivery {
    /// The completed claim.
    pub claim: Claim,
    /// The completed delivery.
    pub delivery: Delivery,
    /// The completed donation.
    pub donation: Donation,
}

/// Orchestrates the donation → claim → delivery state machine.
#[derive(Debug, Clone)]
pub struct WorkflowService {
    /// Claim read repository.
    claim_repo: Arc<ClaimRepository>,
    /// Delivery read repository.
    delivery_repo: Arc<DeliveryRepository>,
    /// Donation read repository.
    donation_repo: Arc<DonationRepository>,
    /// User read repository.
    user_repo: Arc<UserRepository>,
    /// Transactional write repository.
    workflow_repo: Arc<WorkflowRepository>,
    /// Best-effort notification dispatch.
    notifications: Arc<NotificationService>,
}

impl WorkflowService {
    /// Creates a new workflow service.
    pub fn new(
        claim_repo: Arc<ClaimRepository>,
        delivery_repo: Arc<DeliveryRepository>,
        donation_repo: Arc<DonationRepository>,
        user_repo: Arc<UserRepository>,
        workflow_repo: Arc<WorkflowRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            claim_repo,
            delivery_repo,
            donation_repo,
            user_repo,
            workflow_repo,
            notifications,
        }
    }

    // ── NGO operations ──────────────────────────────────────────────

    /// Submits a claim on a donation for the NGO caller.
    pub async fn submit_claim(
        &self,
        ctx: &RequestContext,
        donation_id: Uuid,
        quantity: f64,
    ) -> Result<Claim, AppError> {
        let ngo = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))?;
        if !ngo.can_claim() {
            return Err(AppError::forbidden(
                "Your organisation has not been approved to claim donations",
            ));
        }

        let donation = self
            .donation_repo
            .find_by_id(donation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Donation not found"))?;

        if donation.is_expired_at(ctx.request_time) {
            return Err(AppError::invalid_state("Donation has expired"));
        }
        if !donation.status.is_requestable() {
            return Err(AppError::invalid_state(format!(
                "Donation is '{}' and can no longer be claimed",
                donation.status
            )));
        }
        if quantity <= 0.0 {
            return Err(AppError::validation("Quantity must be positive"));
        }
        if quantity > donation.quantity {
            return Err(AppError::validation(
                "Requested quantity exceeds the donated amount",
            ));
        }
        if self
            .claim_repo
            .has_active_claim(donation_id, ctx.user_id)
            .await?
        {
            return Err(AppError::conflict(
                "You already have an active claim on this donation",
            ));
        }

        let claim = self
            .workflow_repo
            .submit_claim(&CreateClaim {
                donation_id,
                ngo_id: ctx.user_id,
                quantity,
            })
            .await?;

        info!(
            claim_id = %claim.id,
            donation_id = %donation_id,
            ngo_id = %ctx.user_id,
            "Claim submitted"
        );

        self.notifications.notify_detached(
            donation.donor_id,
            "New claim on your donation".to_string(),
            format!("'{}' has been claimed by an NGO.", donation.title),
            NotificationSeverity::Info,
        );

        Ok(claim)
    }

    /// The NGO caller confirms receipt, completing claim, delivery, and
    /// donation in one transaction.
    pub async fn confirm_delivery(
        &self,
        ctx: &RequestContext,
        claim_id: Uuid,
    ) -> Result<CompletedDelivery, AppError> {
        let claim = self
            .claim_repo
            .find_by_id(claim_id)
            .await?
            .ok_or_else(|| AppError::not_found("Claim not found"))?;
        if claim.ngo_id != ctx.user_id {
            return Err(AppError::forbidden("You can only confirm your own claims"));
        }
        if claim.status != ClaimStatus::Approved {
            return Err(AppError::invalid_state(format!(
                "Claim is '{}', not 'approved'",
                claim.status
            )));
        }

        let delivery = self
            .delivery_repo
            .find_by_claim(claim_id)
            .await?
            .ok_or_else(|| AppError::not_found("No delivery has been assigned for this claim"))?;
        if delivery.status != DeliveryStatus::ReachedNgo {
            return Err(AppError::invalid_state(format!(
                "Delivery is '{}', not 'reached_ngo'",
                delivery.status
            )));
        }

        let outcome = self.workflow_repo.complete_delivery(claim_id).await?;

        info!(
            claim_id = %claim_id,
            donation_id = %outcome.donation.id,
            "Delivery confirmed by NGO"
        );

        self.notifications.notify_detached(
            outcome.donation.donor_id,
            "Donation delivered".to_string(),
            format!("'{}' was received by the NGO.", outcome.donation.title),
            NotificationSeverity::Success,
        );
        self.notifications.notify_detached(
            outcome.delivery.volunteer_id,
            "Delivery confirmed".to_string(),
            "The NGO confirmed receipt of your delivery. Thank you!".to_string(),
            NotificationSeverity::Success,
        );

        Ok(CompletedDelivery {
            claim: outcome.claim,
            delivery: outcome.delivery,
            donation: outcome.donation,
        })
    }

    /// Lists the NGO caller's claims joined with donation details.
    pub async fn list_my_claims(&self, ctx: &RequestContext) -> Result<Vec<ClaimDetail>, AppError> {
        self.claim_repo.find_by_ngo(ctx.user_id).await
    }

    // ── Admin operations ────────────────────────────────────────────

    /// Approves a pending claim; competing pending claims lose.
    pub async fn approve_claim(&self, claim_id: Uuid) -> Result<ClaimDecision, AppError> {
        let claim = self
            .claim_repo
            .find_by_id(claim_id)
            .await?
            .ok_or_else(|| AppError::not_found("Claim not found"))?;
        if claim.status != ClaimStatus::Pending {
            return Err(AppError::invalid_state(format!(
                "Claim is '{}', not 'pending'",
                claim.status
            )));
        }

        let outcome = self.workflow_repo.approve_claim(claim_id).await?;

        info!(
            claim_id = %claim_id,
            donation_id = %outcome.donation.id,
            rejected_siblings = outcome.rejected_ngo_ids.len(),
            "Claim approved"
        );

        self.notifications.notify_detached(
            outcome.claim.ngo_id,
            "Claim approved".to_string(),
            format!("Your claim on '{}' was approved.", outcome.donation.title),
            NotificationSeverity::Success,
        );
        self.notifications.notify_detached(
            outcome.donation.donor_id,
            "Donation approved".to_string(),
            format!(
                "'{}' was approved for an NGO; a volunteer will be assigned.",
                outcome.donation.title
            ),
            NotificationSeverity::Info,
        );
        for ngo_id in &outcome.rejected_ngo_ids {
            self.notifications.notify_detached(
                *ngo_id,
                "Claim not selected".to_string(),
                format!(
                    "Another claim on '{}' was approved instead.",
                    outcome.donation.title
                ),
                NotificationSeverity::Warning,
            );
        }

        Ok(ClaimDecision {
            claim: outcome.claim,
            donation: outcome.donation,
        })
    }

    /// Rejects a pending or approved claim.
    ///
    /// An approved claim is only rejectable while no delivery exists for
    /// it; once a volunteer is assigned the claim must run to completion
    /// or be cancelled through the delivery.
    pub async fn reject_claim(
        &self,
        claim_id: Uuid,
        reason: Option<String>,
    ) -> Result<ClaimDecision, AppError> {
        let claim = self
            .claim_repo
            .find_by_id(claim_id)
            .await?
            .ok_or_else(|| AppError::not_found("Claim not found"))?;
        if !claim.status.is_rejectable() {
            return Err(AppError::invalid_state(format!(
                "Claim is '{}' and can no longer be rejected",
                claim.status
            )));
        }
        // An approval is reversible only until a volunteer is assigned;
        // rejecting afterwards would orphan the delivery.
        if self.delivery_repo.find_by_claim(claim_id).await?.is_some() {
            return Err(AppError::invalid_state(
                "A delivery is already assigned for this claim; it can no longer be rejected",
            ));
        }

        let reason =
            reason.unwrap_or_else(|| "Your claim was rejected by the platform.".to_string());
        let (claim, donation) = self.workflow_repo.reject_claim(claim_id, &reason).await?;

        info!(claim_id = %claim_id, donation_id = %donation.id, "Claim rejected");

        self.notifications.notify_detached(
            claim.ngo_id,
            "Claim rejected".to_string(),
            format!("Your claim on '{}': {}", donation.title, reason),
            NotificationSeverity::Warning,
        );

        Ok(ClaimDecision { claim, donation })
    }

    /// Assigns a volunteer to an approved claim, creating the delivery.
    pub async fn assign_volunteer(
        &self,
        claim_id: Uuid,
        volunteer_id: Uuid,
    ) -> Result<Delivery, AppError> {
        let claim = self
            .claim_repo
            .find_by_id(claim_id)
            .await?
            .ok_or_else(|| AppError::not_found("Claim not found"))?;
        if claim.status != ClaimStatus::Approved {
            return Err(AppError::invalid_state(format!(
                "Claim is '{}', not 'approved'",
                claim.status
            )));
        }

        let volunteer = self
            .user_repo
            .find_by_id(volunteer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Volunteer not found"))?;
        if volunteer.role != UserRole::Volunteer {
            return Err(AppError::invalid_state("Account is not a volunteer"));
        }

        if self.delivery_repo.find_by_claim(claim_id).await?.is_some() {
            return Err(AppError::conflict(
                "A delivery is already assigned for this claim",
            ));
        }

        let delivery = self
            .workflow_repo
            .create_delivery(&CreateDelivery {
                donation_id: claim.donation_id,
                claim_id,
                volunteer_id,
            })
            .await?;

        info!(
            delivery_id = %delivery.id,
            claim_id = %claim_id,
            volunteer_id = %volunteer_id,
            "Volunteer assigned"
        );

        self.notifications.notify_detached(
            volunteer_id,
            "New delivery task".to_string(),
            "You have been assigned a pickup. Check your tasks for details.".to_string(),
            NotificationSeverity::Info,
        );
        self.notifications.notify_detached(
            claim.ngo_id,
            "Volunteer assigned".to_string(),
            "A volunteer was assigned to deliver your approved claim.".to_string(),
            NotificationSeverity::Info,
        );

        Ok(delivery)
    }

    /// Lists claims for the admin queue, optionally filtered by status.
    pub async fn list_claims(
        &self,
        status: Option<ClaimStatus>,
        page: PageRequest,
    ) -> Result<PageResponse<ClaimDetail>, AppError> {
        self.claim_repo.find_all(status, &page).await
    }

    // ── Volunteer operations ────────────────────────────────────────

    /// Advances the caller's delivery one step along the chain.
    ///
    /// The target is validated before any lookup; a delivery the caller
    /// does not own reads as not found rather than forbidden.
    pub async fn advance_delivery(
        &self,
        ctx: &RequestContext,
        delivery_id: Uuid,
        target: DeliveryStatus,
    ) -> Result<Delivery, AppError> {
        if !target.is_volunteer_target() {
            return Err(AppError::validation(format!(
                "'{target}' is not a valid target status; use accepted, picked_up, or reached_ngo"
            )));
        }

        let delivery = self
            .delivery_repo
            .find_by_id(delivery_id)
            .await?
            .filter(|d| d.volunteer_id == ctx.user_id)
            .ok_or_else(|| AppError::not_found("Delivery not found"))?;

        if !delivery.status.can_advance_to(target) {
            return Err(AppError::invalid_transition(format!(
                "Cannot move delivery from '{}' to '{target}'",
                delivery.status
            )));
        }

        let updated = self
            .workflow_repo
            .advance_delivery(delivery_id, delivery.status, target)
            .await?;

        info!(
            delivery_id = %delivery_id,
            from = %delivery.status,
            to = %target,
            "Delivery advanced"
        );

        match target {
            DeliveryStatus::PickedUp => {
                if let Some(donation) = self.donation_repo.find_by_id(updated.donation_id).await? {
                    self.notifications.notify_detached(
                        donation.donor_id,
                        "Donation picked up".to_string(),
                        format!("'{}' was collected by the volunteer.", donation.title),
                        NotificationSeverity::Info,
                    );
                }
            }
            DeliveryStatus::ReachedNgo => {
                if let Some(claim) = self.claim_repo.find_by_id(updated.claim_id).await? {
                    self.notifications.notify_detached(
                        claim.ngo_id,
                        "Delivery arrived".to_string(),
                        "Your delivery has arrived. Please confirm receipt.".to_string(),
                        NotificationSeverity::Info,
                    );
                }
            }
            _ => {}
        }

        Ok(updated)
    }

    /// Lists the volunteer caller's deliveries.
    pub async fn list_my_deliveries(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<Delivery>, AppError> {
        self.delivery_repo.find_by_volunteer(ctx.user_id).await
    }

    /// Loads a delivery with pickup and drop-off details.
    ///
    /// Visible to the assigned volunteer and the admin only.
    pub async fn get_delivery_detail(
        &self,
        ctx: &RequestContext,
        delivery_id: Uuid,
    ) -> Result<DeliveryDetail, AppError> {
        let detail = self
            .delivery_repo
            .find_detail(delivery_id)
            .await?
            .ok_or_else(|| AppError::not_found("Delivery not found"))?;

        if detail.volunteer_id != ctx.user_id && !ctx.is_admin() {
            return Err(AppError::not_found("Delivery not found"));
        }

        Ok(detail)
    }
}
