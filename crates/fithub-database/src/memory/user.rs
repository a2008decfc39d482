use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use fithub_core::types::{PageRequest, PageResponse};
use fithub_core::{AppError, AppResult};
use fithub_entity::user::model::normalize_email;
use fithub_entity::user::{CreateUser, User, UserRole};

use super::MemoryStore;
use crate::repositories::UserRepository;

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let id = self.emails.get(&normalize_email(email)).map(|r| *r.value());
        Ok(id.and_then(|id| self.users.get(&id).map(|u| u.value().clone())))
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let user = data.into_user();
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Email is already registered")),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut stored = self
            .users
            .get_mut(&user.id)
            .ok_or_else(|| AppError::not_found(format!("User {} not found", user.id)))?;
        stored.name = user.name.clone();
        stored.password_hash = user.password_hash.clone();
        stored.role = user.role;
        stored.is_active = user.is_active;
        stored.oauth_provider = user.oauth_provider.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn touch_last_login(&self, id: Uuid) -> AppResult<()> {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.last_login_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn list(
        &self,
        role: Option<UserRole>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|u| role.is_none_or(|r| u.role == r))
            .map(|u| u.value().clone())
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = users.len() as u64;
        let items = users
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page, total))
    }

    async fn count_by_role(&self) -> AppResult<Vec<(UserRole, u64)>> {
        Ok(UserRole::ALL
            .iter()
            .map(|role| {
                let n = self.users.iter().filter(|u| u.role == *role).count() as u64;
                (*role, n)
            })
            .collect())
    }
}
