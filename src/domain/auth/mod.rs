//! Refresh-token guard decision logic

pub mod classifier;
pub mod outcome;

pub use classifier::{GuardLogger, RefreshOutcomeClassifier, USER_NOT_FOUND};
pub use outcome::{
    AuthInfo, AuthOutcome, AuthStatusCode, OpaqueError, RefreshRejection, RejectionReason,
    UNAUTHORIZED_WITH_MESSAGE,
};

#[cfg(test)]
pub(crate) use classifier::test_support;
