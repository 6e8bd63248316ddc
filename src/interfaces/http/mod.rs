//! HTTP REST API
//!
//! - `common`: response envelope, error mapping, validated JSON extractor
//! - `guards`: access, refresh and permission guards
//! - `modules`: route handlers grouped by resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod guards;
pub mod modules;
pub mod router;

pub use router::{create_api_router, AppContext};
