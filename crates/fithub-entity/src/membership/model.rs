//! Membership subscription record and its lifecycle transitions.

use chrono::{DateTime, Duration, Utc};
use fithub_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::plan::MembershipPlan;

/// Lifecycle state of a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "membership_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    /// Grants access until `end_date`.
    Active,
    /// Ran past `end_date` without renewal.
    Expired,
    /// Ended by the member or staff.
    Cancelled,
}

impl MembershipStatus {
    /// All statuses, in reporting order.
    pub const ALL: [MembershipStatus; 3] = [Self::Active, Self::Expired, Self::Cancelled];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's subscription to a plan.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Membership {
    /// Unique membership identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Plan the membership was bought on.
    pub plan_id: Uuid,
    /// Current lifecycle state.
    pub status: MembershipStatus,
    /// Start of the current period.
    pub start_date: DateTime<Utc>,
    /// End of the current period.
    pub end_date: DateTime<Utc>,
    /// Renew automatically when the period runs out.
    pub auto_renew: bool,
    /// Access is paused until this instant.
    pub frozen_until: Option<DateTime<Utc>>,
    /// When the membership was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// When the membership was created.
    pub created_at: DateTime<Utc>,
    /// When the membership was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Membership {
    /// Start a new active membership on `plan` at `now`.
    pub fn start(user_id: Uuid, plan: &MembershipPlan, auto_renew: bool, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            plan_id: plan.id,
            status: MembershipStatus::Active,
            start_date: now,
            end_date: now + Duration::days(i64::from(plan.duration_days)),
            auto_renew,
            frozen_until: None,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether access is currently paused.
    pub fn is_frozen(&self, now: DateTime<Utc>) -> bool {
        self.frozen_until.is_some_and(|until| until > now)
    }

    /// Whether the current period has run out.
    pub fn is_past_end(&self, now: DateTime<Utc>) -> bool {
        self.end_date <= now
    }

    /// Whether the membership currently grants access.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.status == MembershipStatus::Active && !self.is_past_end(now)
    }

    /// Move an active membership past its end date to `expired`.
    ///
    /// Returns `true` when the record changed and must be persisted.
    pub fn refresh_status(&mut self, now: DateTime<Utc>) -> bool {
        if self.status == MembershipStatus::Active && self.is_past_end(now) {
            self.status = MembershipStatus::Expired;
            self.frozen_until = None;
            self.updated_at = now;
            return true;
        }
        false
    }

    /// Extend an active membership by one period, or restart an expired one.
    pub fn renew(&mut self, plan: &MembershipPlan, now: DateTime<Utc>) -> AppResult<()> {
        let period = Duration::days(i64::from(plan.duration_days));
        self.refresh_status(now);
        match self.status {
            MembershipStatus::Cancelled => {
                return Err(AppError::conflict("A cancelled membership cannot be renewed"));
            }
            MembershipStatus::Active => {
                self.end_date += period;
            }
            MembershipStatus::Expired => {
                self.status = MembershipStatus::Active;
                self.start_date = now;
                self.end_date = now + period;
            }
        }
        self.plan_id = plan.id;
        self.updated_at = now;
        Ok(())
    }

    /// Cancel an active membership.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        self.refresh_status(now);
        match self.status {
            MembershipStatus::Active => {
                self.status = MembershipStatus::Cancelled;
                self.auto_renew = false;
                self.frozen_until = None;
                self.cancelled_at = Some(now);
                self.updated_at = now;
                Ok(())
            }
            MembershipStatus::Cancelled => {
                Err(AppError::conflict("Membership is already cancelled"))
            }
            MembershipStatus::Expired => Err(AppError::conflict("Membership has expired")),
        }
    }

    /// Pause an active membership for `days`, pushing the end date out by the same amount.
    pub fn freeze(&mut self, days: u32, max_days: u32, now: DateTime<Utc>) -> AppResult<()> {
        if days == 0 || days > max_days {
            return Err(AppError::validation(format!(
                "Freeze length must be between 1 and {max_days} days"
            )));
        }
        self.refresh_status(now);
        if self.status != MembershipStatus::Active {
            return Err(AppError::conflict("Only an active membership can be frozen"));
        }
        if self.is_frozen(now) {
            return Err(AppError::conflict("Membership is already frozen"));
        }
        let pause = Duration::days(i64::from(days));
        self.frozen_until = Some(now + pause);
        self.end_date += pause;
        self.updated_at = now;
        Ok(())
    }
}
