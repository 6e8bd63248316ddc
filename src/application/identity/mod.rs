//! Identity module: user profile use-cases and permission helpers

pub mod permissions;
pub mod service;

pub use service::{OnboardProfile, UserService};
