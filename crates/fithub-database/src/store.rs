//! Repository bundle and backend selection.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use fithub_core::AppResult;
use fithub_core::config::{DatabaseConfig, DatabaseProvider};

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::postgres::{PgMembershipRepository, PgOrderRepository, PgPlanRepository, PgUserRepository};
use crate::repositories::{MembershipRepository, OrderRepository, PlanRepository, UserRepository};

/// Liveness of the backing store.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Fail when the store cannot serve queries.
    async fn ping(&self) -> AppResult<()>;

    /// Release connections on shutdown.
    async fn close(&self) {}
}

#[async_trait]
impl StoreHealth for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for DatabasePool {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> AppResult<()> {
        DatabasePool::ping(self).await
    }

    async fn close(&self) {
        DatabasePool::close(self).await;
    }
}

/// Every repository the services need, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    /// User accounts.
    pub users: Arc<dyn UserRepository>,
    /// Plan catalogue.
    pub plans: Arc<dyn PlanRepository>,
    /// Memberships.
    pub memberships: Arc<dyn MembershipRepository>,
    /// Orders.
    pub orders: Arc<dyn OrderRepository>,
    /// Store liveness.
    pub health: Arc<dyn StoreHealth>,
}

impl Repositories {
    /// Repositories over a fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            plans: store.clone(),
            memberships: store.clone(),
            orders: store.clone(),
            health: store,
        }
    }

    /// Repositories over an open PostgreSQL pool.
    pub fn postgres(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            plans: Arc::new(PgPlanRepository::new(pool.clone())),
            memberships: Arc::new(PgMembershipRepository::new(pool.clone())),
            orders: Arc::new(PgOrderRepository::new(pool)),
            health: Arc::new(db),
        }
    }

    /// Build the repositories named by `database.provider`.
    ///
    /// The PostgreSQL backend connects and runs pending migrations first.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Memory => {
                info!("Using in-memory store; data is lost on restart");
                Ok(Self::in_memory())
            }
            DatabaseProvider::Postgres => {
                let db = DatabasePool::connect(config).await?;
                db.migrate().await?;
                Ok(Self::postgres(db))
            }
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories")
            .field("backend", &self.health.backend())
            .finish()
    }
}
