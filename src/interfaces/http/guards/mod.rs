//! Request guards
//!
//! - `jwt_auth`: access token guard, loads the user into request extensions
//! - `jwt_refresh`: refresh token strategy plus the refresh guard decision
//! - `permission`: requires permissions on the already authenticated user

pub mod jwt_auth;
pub mod jwt_refresh;
pub mod permission;

use std::sync::Arc;

use axum::http::{header, HeaderMap};

use crate::domain::auth::RefreshOutcomeClassifier;
use crate::domain::{User, UserRepositoryInterface};
use crate::infrastructure::crypto::jwt::TokenKeys;

pub use jwt_auth::jwt_auth_middleware;
pub use jwt_refresh::{jwt_refresh_middleware, resolve_refresh_outcome, NO_AUTH_TOKEN};
pub use permission::{require_permissions, RequiredPermissions};

/// State shared by the token guards
#[derive(Clone)]
pub struct AuthState {
    pub keys: TokenKeys,
    pub users: Arc<dyn UserRepositoryInterface>,
    pub classifier: RefreshOutcomeClassifier,
}

/// The user a guard resolved for this request.
///
/// Extract in handlers: `Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>`
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub User);

/// What the `Authorization` header carries
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Credential<'a> {
    Missing,
    /// Present but not a `Bearer` token
    Unusable,
    Bearer(&'a str),
}

pub(crate) fn read_credential(headers: &HeaderMap) -> Credential<'_> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Credential::Missing;
    };
    match value.to_str().ok().and_then(|v| v.strip_prefix("Bearer ")) {
        Some(token) if !token.trim().is_empty() => Credential::Bearer(token.trim()),
        _ => Credential::Unusable,
    }
}
