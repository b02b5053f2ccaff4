//! Role-based access guards.
//!
//! These run as checks inside handlers rather than as tower middleware:
//! every guarded handler already extracts the authenticated user, so the
//! role check is a one-liner at the top of the handler body.

use foodbridge_core::error::AppError;
use foodbridge_entity::user::UserRole;
use foodbridge_service::context::RequestContext;

use crate::error::ApiError;

/// Requires the caller to hold the admin role.
pub fn require_admin(ctx: &RequestContext) -> Result<(), ApiError> {
    require_role(ctx, UserRole::Admin)
}

/// Requires the caller to hold the donor role.
pub fn require_donor(ctx: &RequestContext) -> Result<(), ApiError> {
    require_role(ctx, UserRole::Donor)
}

/// Requires the caller to hold the NGO role.
pub fn require_ngo(ctx: &RequestContext) -> Result<(), ApiError> {
    require_role(ctx, UserRole::Ngo)
}

/// Requires the caller to hold the volunteer role.
pub fn require_volunteer(ctx: &RequestContext) -> Result<(), ApiError> {
    require_role(ctx, UserRole::Volunteer)
}

fn require_role(ctx: &RequestContext, role: UserRole) -> Result<(), ApiError> {
    if ctx.role == role {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "This action requires the '{}' role",
            role
        ))
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn ctx(role: UserRole) -> RequestContext {
        RequestContext::new(Uuid::new_v4(), role, "someone".to_string())
    }

    #[test]
    fn test_matching_role_passes() {
        assert!(require_ngo(&ctx(UserRole::Ngo)).is_ok());
        assert!(require_admin(&ctx(UserRole::Admin)).is_ok());
    }

    #[test]
    fn test_wrong_role_is_forbidden() {
        let err = require_volunteer(&ctx(UserRole::Donor)).unwrap_err();
        assert_eq!(err.0.kind, foodbridge_core::error::ErrorKind::Forbidden);
    }
}
