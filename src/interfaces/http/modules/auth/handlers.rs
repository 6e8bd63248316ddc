//! Authentication API handlers

use axum::{Extension, Json};

use crate::interfaces::http::common::{ApiResponse, GuardErrorBody};
use crate::interfaces::http::guards::AuthenticatedUser;
use crate::interfaces::http::modules::users::UserDto;

/// Returns the user the refresh token resolves to. Issuing new tokens is
/// left to the session service; this route only proves the token is usable.
#[utoipa::path(
    get,
    path = "/api/v1/auth/refresh",
    tag = "Authentication",
    security(("refresh_token" = [])),
    responses(
        (status = 200, description = "Refresh token is valid", body = ApiResponse<UserDto>),
        (status = 401, description = "Refresh token rejected", body = GuardErrorBody)
    )
)]
pub async fn refresh(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Json<ApiResponse<UserDto>> {
    Json(ApiResponse::success(UserDto::from(user)))
}
