//! First-boot data: the bootstrap super-admin and a starter plan catalogue.

use tracing::{info, warn};

use fithub_auth::PasswordHasher;
use fithub_core::AppResult;
use fithub_core::config::SeedConfig;
use fithub_database::Repositories;
use fithub_entity::membership::CreatePlan;
use fithub_entity::user::{CreateUser, UserRole};

/// What a seeding run created.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Whether the bootstrap admin was created.
    pub admin_created: bool,
    /// Number of plans inserted.
    pub plans_created: usize,
}

/// Apply the seed configuration. Existing data is never modified.
pub async fn seed(
    config: &SeedConfig,
    repos: &Repositories,
    hasher: &PasswordHasher,
) -> AppResult<SeedOutcome> {
    let mut outcome = SeedOutcome::default();

    if let Some(admin) = &config.admin {
        if admin.email.trim().is_empty() || admin.password.is_empty() {
            warn!("Seed admin is missing an email or password; skipping");
        } else if repos.users.find_by_email(&admin.email).await?.is_none() {
            let hash = hasher.hash_password(&admin.password)?;
            let user = repos
                .users
                .create(CreateUser {
                    email: admin.email.clone(),
                    name: admin.name.clone(),
                    password_hash: Some(hash),
                    role: UserRole::SuperAdmin,
                    oauth_provider: None,
                })
                .await?;
            info!(user_id = %user.id, "Created bootstrap super-admin");
            outcome.admin_created = true;
        }
    }

    if config.default_plans && repos.plans.list(true).await?.is_empty() {
        for plan in default_plans() {
            repos.plans.create(plan).await?;
            outcome.plans_created += 1;
        }
        info!(count = outcome.plans_created, "Created default membership plans");
    }

    Ok(outcome)
}

fn default_plans() -> Vec<CreatePlan> {
    [
        ("Monthly", "Unlimited gym access for one month", 30, 4_900),
        ("Quarterly", "Unlimited gym access for three months", 90, 13_500),
        ("Annual", "Unlimited gym access for one year", 365, 49_900),
    ]
    .into_iter()
    .map(|(name, description, duration_days, price_cents)| CreatePlan {
        name: name.to_string(),
        description: Some(description.to_string()),
        duration_days,
        price_cents,
        currency: "USD".to_string(),
    })
    .collect()
}
