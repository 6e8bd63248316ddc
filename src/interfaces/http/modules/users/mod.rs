//! User module: onboarding, profile and favorite wallet addresses

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
