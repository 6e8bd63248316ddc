//! Access token guard

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use tracing::debug;

use super::{read_credential, AuthState, AuthenticatedUser, Credential};
use crate::infrastructure::crypto::jwt::{describe_error, verify_token};
use crate::interfaces::http::common::ApiError;

/// Verifies the access token and loads its user into request extensions.
///
/// Any failure short of a repository error is a plain 401.
pub async fn jwt_auth_middleware(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Credential::Bearer(token) = read_credential(request.headers()) else {
        return Err(ApiError::Unauthorized);
    };

    let claims = verify_token(token, &state.keys.access).map_err(|e| {
        debug!(reason = describe_error(&e), "Access token rejected");
        ApiError::Unauthorized
    })?;

    let Some(user) = state.users.get_user_by_id(&claims.sub).await? else {
        debug!("Access token subject does not resolve to a user");
        return Err(ApiError::Unauthorized);
    };

    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}
