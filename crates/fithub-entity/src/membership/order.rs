//! Membership orders: the record of each purchase or renewal charge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::model::Membership;
use super::plan::MembershipPlan;

/// Why the order was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    /// First purchase of a membership.
    Purchase,
    /// Extension of an existing membership.
    Renewal,
}

/// Settlement state reported by the payment processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Charged successfully.
    Paid,
    /// Charge reversed.
    Refunded,
}

/// One charge against a membership plan.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MembershipOrder {
    /// Unique order identifier.
    pub id: Uuid,
    /// Paying user.
    pub user_id: Uuid,
    /// Plan charged for.
    pub plan_id: Uuid,
    /// Membership the order created or extended.
    pub membership_id: Option<Uuid>,
    /// Purchase or renewal.
    pub kind: OrderKind,
    /// Amount charged in minor units.
    pub amount_cents: i64,
    /// Currency code.
    pub currency: String,
    /// Settlement state.
    pub status: OrderStatus,
    /// Reference issued by the external payment processor.
    pub payment_reference: Option<String>,
    /// When the order was recorded.
    pub created_at: DateTime<Utc>,
}

impl MembershipOrder {
    /// Record a paid charge of `plan` for `membership`.
    pub fn paid(
        membership: &Membership,
        plan: &MembershipPlan,
        kind: OrderKind,
        payment_reference: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id: membership.user_id,
            plan_id: plan.id,
            membership_id: Some(membership.id),
            kind,
            amount_cents: plan.price_cents,
            currency: plan.currency.clone(),
            status: OrderStatus::Paid,
            payment_reference,
            created_at: Utc::now(),
        }
    }
}
