//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a user can hold.
///
/// Roles are not ordered. Route access is decided by explicit allow-sets,
/// except that `SuperAdmin` satisfies any gate that admits `Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    /// Gym member.
    Member,
    /// Trainer running classes and sessions.
    Trainer,
    /// Front-desk or branch manager.
    Manager,
    /// Administrator.
    Admin,
    /// Administrator allowed to manage other administrators.
    SuperAdmin,
}

impl UserRole {
    /// Every defined role.
    pub const ALL: [UserRole; 5] = [
        Self::Member,
        Self::Trainer,
        Self::Manager,
        Self::Admin,
        Self::SuperAdmin,
    ];

    /// Whether this role works at the gym rather than training there.
    pub fn is_staff(&self) -> bool {
        !matches!(self, Self::Member)
    }

    /// Whether this role is one of the two administrator roles.
    pub fn is_admin_level(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }

    /// Return the role as its wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Trainer => "trainer",
            Self::Manager => "manager",
            Self::Admin => "admin",
            Self::SuperAdmin => "super-admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = fithub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "member" => Ok(Self::Member),
            "trainer" => Ok(Self::Trainer),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            "super-admin" | "superadmin" => Ok(Self::SuperAdmin),
            _ => Err(fithub_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: member, trainer, manager, admin, super-admin"
            ))),
        }
    }
}
