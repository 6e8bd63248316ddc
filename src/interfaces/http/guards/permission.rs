//! Permission guard, layered inside the access guard

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use tracing::warn;

use super::AuthenticatedUser;
use crate::application::identity::permissions;
use crate::domain::Permission;
use crate::interfaces::http::common::ApiError;

#[derive(Clone, Copy, Debug)]
pub struct RequiredPermissions(pub &'static [Permission]);

pub async fn require_permissions(
    State(RequiredPermissions(required)): State<RequiredPermissions>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(AuthenticatedUser(user)) = request.extensions().get::<AuthenticatedUser>() else {
        return Err(ApiError::Unauthorized);
    };

    let missing = permissions::missing(&user.permissions, required);
    if !missing.is_empty() {
        let missing: Vec<&str> = missing.iter().map(Permission::as_str).collect();
        warn!(user_id = %user.id, missing = ?missing, "Permission denied");
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(request).await)
}
