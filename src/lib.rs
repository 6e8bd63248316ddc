//! # Account Service
//!
//! User accounts for the studio: refresh-token resolution, onboarding,
//! permissions, and favorite wallet addresses tagged with the user's own tags.
//!
//! ## Architecture
//!
//! - **domain**: entities, the refresh guard decision, favorite address validation
//! - **application**: user service, permission helpers, e-mail port
//! - **infrastructure**: SeaORM persistence, in-memory storage, JWT, log sinks
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: error types and shutdown plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, DatabaseConfig};
pub use interfaces::{create_api_router, AppContext};
