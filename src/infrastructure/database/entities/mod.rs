//! Database entities module

pub mod favorite_wallet_address;
pub mod user;
pub mod user_tag;

pub use favorite_wallet_address::Entity as FavoriteWalletAddress;
pub use user::Entity as User;
pub use user_tag::Entity as UserTag;
