//! Auth module: refresh token resolution

pub mod handlers;

pub use handlers::*;
