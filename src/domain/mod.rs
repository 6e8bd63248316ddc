//! Domain layer: entities, decision logic, and repository ports.

pub mod auth;
pub mod favorites;
pub mod user;

pub use user::{
    CreateUserDto, FavoriteWalletAddress, Permission, TagId, UpdateUserDto, User,
    UserRepositoryInterface, UserTag,
};

pub use crate::shared::errors::{DomainError, DomainResult};
