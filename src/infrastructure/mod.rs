//! Infrastructure layer: persistence, token crypto, and log sinks

pub mod crypto;
pub mod database;
pub mod logging;
pub mod storage;

pub use database::{init_database, DatabaseConfig, UserRepository};
pub use logging::TracingGuardLogger;
pub use storage::InMemoryUserRepository;
