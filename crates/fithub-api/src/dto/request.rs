//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use fithub_entity::membership::{CreatePlan, UpdatePlan};
use fithub_entity::user::UserRole;
use fithub_service::membership::Purchase;
use fithub_service::user::{AdminUpdateUser, ChangePassword};

/// Sign-up request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email.
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    /// Password; the strength policy is applied by the session manager.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password; optional for accounts without one.
    pub current_password: Option<String>,
    /// New password.
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

impl From<ChangePasswordRequest> for ChangePassword {
    fn from(req: ChangePasswordRequest) -> Self {
        Self {
            current_password: req.current_password,
            new_password: req.new_password,
        }
    }
}

/// Membership purchase request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PurchaseRequest {
    /// Plan to buy.
    pub plan_id: Uuid,
    /// Renew automatically.
    #[serde(default)]
    pub auto_renew: bool,
    /// Reference from the payment processor.
    #[validate(length(max = 255))]
    pub payment_reference: Option<String>,
}

impl From<PurchaseRequest> for Purchase {
    fn from(req: PurchaseRequest) -> Self {
        Self {
            plan_id: req.plan_id,
            auto_renew: req.auto_renew,
            payment_reference: req.payment_reference,
        }
    }
}

/// Membership renewal request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RenewRequest {
    /// Reference from the payment processor.
    #[validate(length(max = 255))]
    pub payment_reference: Option<String>,
}

/// Membership freeze request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FreezeRequest {
    /// Days to pause; the upper bound comes from configuration.
    #[validate(range(min = 1, message = "Freeze must last at least one day"))]
    pub days: u32,
}

/// Admin user update request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
    /// New display name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// Activate or deactivate.
    pub is_active: Option<bool>,
}

impl From<AdminUpdateUserRequest> for AdminUpdateUser {
    fn from(req: AdminUpdateUserRequest) -> Self {
        Self {
            name: req.name,
            role: req.role,
            is_active: req.is_active,
        }
    }
}

/// Create plan request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePlanRequest {
    /// Plan name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Description.
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    /// Period length in days.
    #[validate(range(min = 1, max = 3660))]
    pub duration_days: i32,
    /// Price in minor units.
    #[validate(range(min = 0))]
    pub price_cents: i64,
    /// ISO 4217 currency code.
    #[validate(length(equal = 3))]
    pub currency: String,
}

impl From<CreatePlanRequest> for CreatePlan {
    fn from(req: CreatePlanRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            duration_days: req.duration_days,
            price_cents: req.price_cents,
            currency: req.currency,
        }
    }
}

/// Update plan request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePlanRequest {
    /// New name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New description.
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    /// New period length.
    #[validate(range(min = 1, max = 3660))]
    pub duration_days: Option<i32>,
    /// New price.
    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,
    /// Offer or retire the plan.
    pub is_active: Option<bool>,
}

impl From<UpdatePlanRequest> for UpdatePlan {
    fn from(req: UpdatePlanRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            duration_days: req.duration_days,
            price_cents: req.price_cents,
            is_active: req.is_active,
        }
    }
}

/// Query of the provider callback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OAuthCallbackQuery {
    /// Authorization code.
    pub code: Option<String>,
    /// Anti-forgery state echoed by the provider.
    pub state: Option<String>,
    /// Set when the user or provider denied the login.
    pub error: Option<String>,
}
