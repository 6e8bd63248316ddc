//! User aggregate
//!
//! Contains the User entity, favorite addresses, DTOs, and repository interface.

pub mod favorite;
pub mod model;
pub mod repository;

mod dto_create;
mod dto_update;

pub use favorite::{FavoriteWalletAddress, TagId};
pub use model::{Permission, User, UserTag};

pub use dto_create::CreateUserDto;
pub use dto_update::UpdateUserDto;

pub use repository::UserRepositoryInterface;
