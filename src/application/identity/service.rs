//! User service: application-layer orchestration
//!
//! HTTP handlers stay thin and delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::application::notifications::{EmailSender, EmailTemplate};
use crate::domain::{
    DomainError, DomainResult, Permission, UpdateUserDto, User, UserRepositoryInterface,
};

/// Profile fields written during onboarding.
#[derive(Debug, Clone)]
pub struct OnboardProfile {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// User service, generic over `R: UserRepositoryInterface` so it stays
/// decoupled from the concrete persistence layer (`dyn` repositories included).
pub struct UserService<R: UserRepositoryInterface + ?Sized> {
    repo: Arc<R>,
    email_sender: Arc<dyn EmailSender>,
}

impl<R: UserRepositoryInterface + ?Sized> UserService<R> {
    pub fn new(repo: Arc<R>, email_sender: Arc<dyn EmailSender>) -> Self {
        Self { repo, email_sender }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        self.repo.get_user_by_id(id).await
    }

    /// Load a user together with the tags they own.
    pub async fn get_user_with_tags(&self, id: &str) -> DomainResult<User> {
        let mut user = self
            .repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))?;
        user.tags = self.repo.get_user_tags(id).await?;
        Ok(user)
    }

    // ── Commands ────────────────────────────────────────────────

    /// Write onboarding profile fields.
    pub async fn update(&self, id: &str, profile: OnboardProfile) -> DomainResult<User> {
        let dto = format_update(UpdateUserDto {
            email: Some(profile.email),
            first_name: profile.first_name,
            last_name: profile.last_name,
            favorite_wallet_addresses: None,
        });
        self.persist(id, dto).await
    }

    /// Normalize free-text fields, then persist. Favorites pass through as given.
    pub async fn format_and_update(&self, id: &str, dto: UpdateUserDto) -> DomainResult<User> {
        let dto = format_update(dto);
        self.persist(id, dto).await
    }

    pub async fn add_permission(&self, id: &str, permission: Permission) -> DomainResult<User> {
        let user = self
            .repo
            .add_permission(id, permission)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))?;
        info!(user_id = id, permission = %permission, "Permission granted");
        Ok(user)
    }

    pub async fn send_email(
        &self,
        user_id: &str,
        email: &str,
        template: EmailTemplate,
    ) -> DomainResult<()> {
        self.email_sender.send(email, template, user_id).await
    }

    async fn persist(&self, id: &str, dto: UpdateUserDto) -> DomainResult<User> {
        let favorites = dto.favorite_wallet_addresses.as_ref().map(Vec::len);
        let user = self
            .repo
            .update_user(id, dto)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))?;
        info!(user_id = id, favorites = ?favorites, "User updated");
        Ok(user)
    }
}

// ── Helpers ─────────────────────────────────────────────────────

fn format_update(dto: UpdateUserDto) -> UpdateUserDto {
    UpdateUserDto {
        email: clean(dto.email).map(|e| e.to_lowercase()),
        first_name: clean(dto.first_name),
        last_name: clean(dto.last_name),
        favorite_wallet_addresses: dto.favorite_wallet_addresses,
    }
}

/// Trim; blank becomes absent.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
