//! Refresh-token guard decision.
//!
//! Turns the loosely coupled `(error, user, info)` signals of the refresh
//! strategy into either the principal or a [`RefreshRejection`]:
//!
//! | user | error | info | result |
//! |------|-------|------|--------|
//! | -    | -     | -    | `NoCredential`, "User not found" |
//! | any  | set   | any  | `VerificationFailed`, logged |
//! | -    | -     | set  | `VerificationFailed`, logged |
//! | set  | -     | any  | principal |

use std::sync::Arc;

use super::outcome::{AuthInfo, AuthOutcome, RefreshRejection, RejectionReason};

pub const GUARD_COMPONENT: &str = "JwtRefreshGuard";
pub const GUARD_OPERATION: &str = "handleRequest";

/// Detail for the no-credential rejection.
pub const USER_NOT_FOUND: &str = "User not found";

/// Detail used when a failed verification attached no info.
pub const MISSING_INFO_DETAIL: &str = "Invalid refresh token";

/// Logging capability the classifier writes to on the verification-failed path.
pub trait GuardLogger: Send + Sync {
    fn error(&self, message: &str, component: &str, operation: &str, context: Option<&AuthInfo>);
}

#[derive(Clone)]
pub struct RefreshOutcomeClassifier {
    logger: Arc<dyn GuardLogger>,
}

impl RefreshOutcomeClassifier {
    pub fn new(logger: Arc<dyn GuardLogger>) -> Self {
        Self { logger }
    }

    pub fn classify<U>(&self, outcome: AuthOutcome<U>) -> Result<U, RefreshRejection> {
        let AuthOutcome { error, user, info } = outcome;

        match (user, error, info) {
            (None, None, None) => Err(RefreshRejection::new(
                RejectionReason::NoCredential,
                USER_NOT_FOUND,
            )),
            (Some(user), None, _) => Ok(user),
            (_, _, info) => {
                let detail = info
                    .as_ref()
                    .map_or(MISSING_INFO_DETAIL, |i| i.message.as_str())
                    .to_string();
                self.logger
                    .error(&detail, GUARD_COMPONENT, GUARD_OPERATION, info.as_ref());
                Err(RefreshRejection::new(
                    RejectionReason::VerificationFailed,
                    detail,
                ))
            }
        }
    }
}
