//! Signals produced by token verification and the rejections derived from them.

use serde::Serialize;
use thiserror::Error;

/// Error value attached by a verification step. Never inspected, only carried.
pub type OpaqueError = Box<dyn std::error::Error + Send + Sync>;

/// Message key shared by every refresh-guard rejection.
pub const UNAUTHORIZED_WITH_MESSAGE: &str = "http.clientError.unauthorizedWithMessage";

/// Informational object a verification step attaches when it cannot produce a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthInfo {
    pub message: String,
}

impl AuthInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The `(error, user, info)` triple handed to a guard after verification.
pub struct AuthOutcome<U> {
    pub error: Option<OpaqueError>,
    pub user: Option<U>,
    pub info: Option<AuthInfo>,
}

impl<U> AuthOutcome<U> {
    /// Verification produced nothing at all.
    pub fn empty() -> Self {
        Self {
            error: None,
            user: None,
            info: None,
        }
    }

    pub fn authenticated(user: U) -> Self {
        Self {
            error: None,
            user: Some(user),
            info: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: None,
            user: None,
            info: Some(AuthInfo::new(message)),
        }
    }

    pub fn with_error(mut self, error: impl Into<OpaqueError>) -> Self {
        self.error = Some(error.into());
        self
    }
}

impl<U: std::fmt::Debug> std::fmt::Debug for AuthOutcome<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthOutcome")
            .field("error", &self.error.as_ref().map(|e| e.to_string()))
            .field("user", &self.user)
            .field("info", &self.info)
            .finish()
    }
}

/// Application status codes carried in guard error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum AuthStatusCode {
    AccessTokenError = 5000,
    RefreshTokenError = 5001,
    PermissionDenied = 5010,
}

impl AuthStatusCode {
    pub fn code(self) -> u16 {
        self as u16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// Verification returned no signal at all, typically no token was sent.
    NoCredential,
    /// Verification returned an error or no user.
    VerificationFailed,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoCredential => "no_credential",
            Self::VerificationFailed => "verification_failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("refresh token rejected ({}): {detail}", reason.as_str())]
pub struct RefreshRejection {
    pub reason: RejectionReason,
    pub detail: String,
}

impl RefreshRejection {
    pub fn new(reason: RejectionReason, detail: impl Into<String>) -> Self {
        Self {
            reason,
            detail: detail.into(),
        }
    }

    /// Both reasons share one code.
    pub fn status_code(&self) -> AuthStatusCode {
        AuthStatusCode::RefreshTokenError
    }

    pub fn message_key(&self) -> &'static str {
        UNAUTHORIZED_WITH_MESSAGE
    }
}
