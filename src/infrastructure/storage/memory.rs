//! In-memory user repository

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, Permission, TagId, UpdateUserDto, User,
    UserRepositoryInterface, UserTag,
};

/// In-memory storage for development and testing
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
    tags: DashMap<String, Vec<UserTag>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();
        let mut permissions = Vec::new();
        for p in dto.permissions {
            if !permissions.contains(&p) {
                permissions.push(p);
            }
        }

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: dto.email,
            first_name: dto.first_name,
            last_name: dto.last_name,
            permissions,
            tags: Vec::new(),
            favorite_wallet_addresses: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn create_tag(&self, user_id: &str, name: &str) -> DomainResult<UserTag> {
        if !self.users.contains_key(user_id) {
            return Err(DomainError::user_not_found(user_id));
        }

        let tag = UserTag {
            id: TagId::new(uuid::Uuid::new_v4().to_string()),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.tags
            .entry(user_id.to_string())
            .or_default()
            .push(tag.clone());
        Ok(tag)
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn get_user_tags(&self, user_id: &str) -> DomainResult<Vec<UserTag>> {
        Ok(self
            .tags
            .get(user_id)
            .map(|t| t.clone())
            .unwrap_or_default())
    }

    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let Some(mut user) = self.users.get_mut(id) else {
            return Ok(None);
        };

        if let Some(email) = dto.email {
            user.email = Some(email);
        }
        if let Some(first_name) = dto.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = dto.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(favorites) = dto.favorite_wallet_addresses {
            user.favorite_wallet_addresses = favorites;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn add_permission(&self, id: &str, permission: Permission) -> DomainResult<Option<User>> {
        let Some(mut user) = self.users.get_mut(id) else {
            return Ok(None);
        };

        if !user.permissions.contains(&permission) {
            user.permissions.push(permission);
            user.updated_at = Utc::now();
        }

        Ok(Some(user.clone()))
    }
}
