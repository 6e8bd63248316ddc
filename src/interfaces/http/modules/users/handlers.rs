//! Current-user API handlers
//!
//! Every route runs behind the access guard, which puts the caller into
//! request extensions. Handlers delegate to `UserService`.

use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use super::dto::{OnboardUserRequest, UpdateUserRequest, UserDto};
use crate::application::identity::permissions;
use crate::application::{EmailTemplate, UserService};
use crate::domain::favorites::FavoriteAddressValidator;
use crate::domain::{
    DomainError, FavoriteWalletAddress, Permission, UpdateUserDto, UserRepositoryInterface,
};
use crate::interfaces::http::common::{
    ApiError, ApiResponse, BadRequestBody, EmptyData, GuardErrorBody, ValidatedJson,
};
use crate::interfaces::http::guards::AuthenticatedUser;

#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService<dyn UserRepositoryInterface>>,
}

#[utoipa::path(
    put,
    path = "/api/v1/user/onboard",
    tag = "User",
    security(("bearer_auth" = [])),
    request_body = OnboardUserRequest,
    responses(
        (status = 200, description = "User onboarded", body = ApiResponse<UserDto>),
        (status = 401, description = "Unauthorized", body = GuardErrorBody),
        (status = 422, description = "Validation error", body = BadRequestBody)
    )
)]
pub async fn onboard(
    State(state): State<UserHandlerState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<OnboardUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let service = &state.user_service;

    let updated = service.update(&user.id, request.into()).await?;
    if let Some(email) = updated.email.as_deref() {
        service
            .send_email(&updated.id, email, EmailTemplate::OnboardEmail)
            .await?;
    }
    let user = service
        .add_permission(&updated.id, Permission::Onboarded)
        .await?;

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    get,
    path = "/api/v1/user/is-onboarded",
    tag = "User",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Onboarding state", body = ApiResponse<bool>),
        (status = 401, description = "Unauthorized", body = GuardErrorBody)
    )
)]
pub async fn is_onboarded(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Json<ApiResponse<bool>> {
    Json(ApiResponse::success(permissions::is_onboarded(
        &user.permissions,
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/user/resend",
    tag = "User",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Verification e-mail sent", body = ApiResponse<EmptyData>),
        (status = 400, description = "User has no e-mail address"),
        (status = 401, description = "Unauthorized", body = GuardErrorBody)
    )
)]
pub async fn resend_verification(
    State(state): State<UserHandlerState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    let email = user
        .email
        .as_deref()
        .ok_or_else(|| DomainError::Validation("User has no e-mail address".to_string()))?;

    state
        .user_service
        .send_email(&user.id, email, EmailTemplate::VerifyEmail)
        .await?;

    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    put,
    path = "/api/v1/user",
    tag = "User",
    security(("bearer_auth" = [])),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Favorite addresses rejected", body = BadRequestBody),
        (status = 401, description = "Unauthorized", body = GuardErrorBody),
        (status = 422, description = "Validation error", body = BadRequestBody)
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let service = &state.user_service;

    let favorite_wallet_addresses = match request.favorite_wallet_addresses {
        Some(candidates) => {
            let owner = service.get_user_with_tags(&user.id).await?;
            let candidates: Vec<FavoriteWalletAddress> =
                candidates.into_iter().map(Into::into).collect();
            Some(FavoriteAddressValidator::for_user_tags(&owner.tags).validate(candidates)?)
        }
        None => None,
    };

    let dto = UpdateUserDto {
        email: None,
        first_name: request.first_name,
        last_name: request.last_name,
        favorite_wallet_addresses,
    };
    let updated = service.format_and_update(&user.id, dto).await?;

    Ok(Json(ApiResponse::success(UserDto::from(updated))))
}

#[utoipa::path(
    get,
    path = "/api/v1/user",
    tag = "User",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user with tags", body = ApiResponse<UserDto>),
        (status = 401, description = "Unauthorized", body = GuardErrorBody),
        (status = 403, description = "Missing permission", body = GuardErrorBody)
    )
)]
pub async fn find_one(
    State(state): State<UserHandlerState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state.user_service.get_user_with_tags(&user.id).await?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}
