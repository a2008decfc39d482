//! Allow-set role checks.

use fithub_core::AppError;
use fithub_entity::user::UserRole;

use crate::jwt::Claims;

/// Message returned for every role mismatch; it never names the roles.
pub const ACCESS_DENIED: &str = "Access denied";

/// An allow-set of roles guarding one API area.
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    /// Area name used in logs.
    pub area: &'static str,
    /// Roles admitted.
    pub allowed: &'static [UserRole],
}

/// `/api/member/*`.
pub const MEMBER_GATE: RoleGate = RoleGate {
    area: "member",
    allowed: &[UserRole::Member],
};

/// `/api/staff/*`.
pub const STAFF_GATE: RoleGate = RoleGate {
    area: "staff",
    allowed: &[UserRole::Trainer, UserRole::Manager, UserRole::Admin],
};

/// `/api/admin/*`.
pub const ADMIN_GATE: RoleGate = RoleGate {
    area: "admin",
    allowed: &[UserRole::Admin],
};

impl RoleGate {
    /// Whether `role` may enter. A super-admin enters every gate that admits admins.
    pub fn allows(&self, role: UserRole) -> bool {
        self.allowed.contains(&role)
            || (role == UserRole::SuperAdmin && self.allowed.contains(&UserRole::Admin))
    }

    /// Decide access for the verified session, if any.
    ///
    /// No session is `Authentication` (401); a role outside the set is
    /// `Authorization` (403) with a generic message.
    pub fn check(&self, claims: Option<&Claims>) -> Result<(), AppError> {
        let claims = claims.ok_or_else(|| AppError::unauthorized("Authentication required"))?;
        if self.allows(claims.role) {
            Ok(())
        } else {
            tracing::debug!(area = self.area, role = %claims.role, "Role gate denied access");
            Err(AppError::forbidden(ACCESS_DENIED))
        }
    }
}
