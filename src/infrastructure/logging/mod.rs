//! Log sinks for domain-level logging capabilities

use tracing::error;

use crate::domain::auth::{AuthInfo, GuardLogger};

/// Writes guard diagnostics through `tracing`.
#[derive(Debug, Default, Clone)]
pub struct TracingGuardLogger;

impl GuardLogger for TracingGuardLogger {
    fn error(&self, message: &str, component: &str, operation: &str, context: Option<&AuthInfo>) {
        let context = context.and_then(|c| serde_json::to_string(c).ok());
        error!(component, operation, context = ?context, "{}", message);
    }
}
