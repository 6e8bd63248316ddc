use async_trait::async_trait;

use super::{CreateUserDto, Permission, UpdateUserDto, User, UserTag};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;
    async fn create_tag(&self, user_id: &str, name: &str) -> DomainResult<UserTag>;

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn get_user_tags(&self, user_id: &str) -> DomainResult<Vec<UserTag>>;

    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>>;
    async fn add_permission(&self, id: &str, permission: Permission) -> DomainResult<Option<User>>;
}
