//! Membership plan catalogue entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A purchasable membership plan.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MembershipPlan {
    /// Unique plan identifier.
    pub id: Uuid,
    /// Plan name shown to members.
    pub name: String,
    /// Optional marketing description.
    pub description: Option<String>,
    /// Length of one period in days.
    pub duration_days: i32,
    /// Price of one period in minor currency units.
    pub price_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Inactive plans cannot be purchased; existing memberships keep them.
    pub is_active: bool,
    /// When the plan was created.
    pub created_at: DateTime<Utc>,
    /// When the plan was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlan {
    /// Plan name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Period length in days.
    pub duration_days: i32,
    /// Price in minor units.
    pub price_cents: i64,
    /// Currency code.
    pub currency: String,
}

impl CreatePlan {
    /// Materialize the record with a fresh id and timestamps.
    pub fn into_plan(self) -> MembershipPlan {
        let now = Utc::now();
        MembershipPlan {
            id: Uuid::now_v7(),
            name: self.name,
            description: self.description,
            duration_days: self.duration_days,
            price_cents: self.price_cents,
            currency: self.currency.to_uppercase(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlan {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New period length.
    pub duration_days: Option<i32>,
    /// New price.
    pub price_cents: Option<i64>,
    /// Activate or retire the plan.
    pub is_active: Option<bool>,
}

impl UpdatePlan {
    /// Apply the present fields to `plan`.
    pub fn apply(self, plan: &mut MembershipPlan) {
        if let Some(name) = self.name {
            plan.name = name;
        }
        if let Some(description) = self.description {
            plan.description = Some(description);
        }
        if let Some(days) = self.duration_days {
            plan.duration_days = days;
        }
        if let Some(price) = self.price_cents {
            plan.price_cents = price;
        }
        if let Some(active) = self.is_active {
            plan.is_active = active;
        }
        plan.updated_at = Utc::now();
    }
}
