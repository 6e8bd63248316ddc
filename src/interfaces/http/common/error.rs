//! HTTP error mapping
//!
//! Every handler and guard returns `Result<_, ApiError>`; this is the only
//! place where rejections become status codes and bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use super::ApiResponse;
use crate::domain::auth::{AuthStatusCode, RefreshRejection};
use crate::domain::favorites::FavoriteAddressRejection;
use crate::domain::DomainError;

pub const UNAUTHORIZED: &str = "http.clientError.unauthorized";
pub const FORBIDDEN: &str = "http.clientError.forbidden";

/// Guard rejection body: `{ statusCode, message, properties? }`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuardErrorBody {
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<GuardErrorProperties>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GuardErrorProperties {
    pub message: String,
}

/// Validation rejection body: `{ message: [...], error: "Bad Request" }`
#[derive(Debug, Serialize, ToSchema)]
pub struct BadRequestBody {
    pub message: Vec<String>,
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// Access token missing, invalid, or bound to an unknown user.
    Unauthorized,
    /// Authenticated user lacks a required permission.
    Forbidden,
    RefreshRejected(RefreshRejection),
    FavoriteAddresses(FavoriteAddressRejection),
    Domain(DomainError),
}

impl From<RefreshRejection> for ApiError {
    fn from(rejection: RefreshRejection) -> Self {
        Self::RefreshRejected(rejection)
    }
}

impl From<FavoriteAddressRejection> for ApiError {
    fn from(rejection: FavoriteAddressRejection) -> Self {
        Self::FavoriteAddresses(rejection)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::Domain(error)
    }
}

fn guard_response(
    status: StatusCode,
    code: AuthStatusCode,
    message: &str,
    detail: Option<String>,
) -> Response {
    let body = GuardErrorBody {
        status_code: code.code(),
        message: message.to_string(),
        properties: detail.map(|message| GuardErrorProperties { message }),
    };
    (status, Json(body)).into_response()
}

fn envelope(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => guard_response(
                StatusCode::UNAUTHORIZED,
                AuthStatusCode::AccessTokenError,
                UNAUTHORIZED,
                None,
            ),
            Self::Forbidden => guard_response(
                StatusCode::FORBIDDEN,
                AuthStatusCode::PermissionDenied,
                FORBIDDEN,
                None,
            ),
            Self::RefreshRejected(rejection) => {
                metrics::counter!(
                    "refresh_guard_rejections_total",
                    "reason" => rejection.reason.as_str()
                )
                .increment(1);
                guard_response(
                    StatusCode::UNAUTHORIZED,
                    rejection.status_code(),
                    rejection.message_key(),
                    Some(rejection.detail),
                )
            }
            Self::FavoriteAddresses(rejection) => {
                for violation in &rejection.violations {
                    metrics::counter!(
                        "favorite_address_rejections_total",
                        "kind" => violation.kind.as_str()
                    )
                    .increment(1);
                }
                let body = BadRequestBody {
                    message: rejection.messages(),
                    error: "Bad Request".to_string(),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::Domain(err) => match err {
                DomainError::NotFound { entity, .. } => {
                    envelope(StatusCode::NOT_FOUND, format!("{} not found", entity))
                }
                DomainError::Validation(msg) => envelope(StatusCode::BAD_REQUEST, msg),
                DomainError::Unauthorized(msg) => {
                    warn!(reason = %msg, "Unauthorized request");
                    Self::Unauthorized.into_response()
                }
                DomainError::Forbidden(msg) => {
                    warn!(reason = %msg, "Forbidden request");
                    Self::Forbidden.into_response()
                }
                DomainError::Storage(msg) => {
                    error!(error = %msg, "Storage failure");
                    envelope(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::RejectionReason;
    use crate::domain::favorites::FavoriteAddressValidator;
    use crate::domain::{FavoriteWalletAddress, TagId};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn refresh_rejection_has_guard_shape() {
        let rejection = RefreshRejection::new(RejectionReason::VerificationFailed, "jwt expired");

        let response = ApiError::from(rejection).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({
                "statusCode": 5001,
                "message": "http.clientError.unauthorizedWithMessage",
                "properties": { "message": "jwt expired" }
            })
        );
    }

    #[tokio::test]
    async fn access_rejection_has_no_properties() {
        let response = ApiError::Unauthorized.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({ "statusCode": 5000, "message": "http.clientError.unauthorized" })
        );
    }

    #[tokio::test]
    async fn forbidden_uses_permission_code() {
        let response = ApiError::Forbidden.into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["statusCode"], 5010);
    }

    #[tokio::test]
    async fn favorite_rejection_is_bad_request_with_messages() {
        let rejection = FavoriteAddressValidator::new([TagId::from("a")])
            .validate(vec![FavoriteWalletAddress::new("0x1", ["zz"])])
            .unwrap_err();

        let response = ApiError::from(rejection).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "message": ["favoriteWalletAddresses contains invalid tag: \"zz\""],
                "error": "Bad Request"
            })
        );
    }

    #[tokio::test]
    async fn not_found_does_not_echo_the_identifier() {
        let response = ApiError::from(DomainError::user_not_found("secret-id")).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert!(!body.to_string().contains("secret-id"));
        assert_eq!(body["error"], "User not found");
    }

    #[tokio::test]
    async fn storage_failure_is_internal_error() {
        let response =
            ApiError::from(DomainError::Storage("disk full".into())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body_json(response).await.to_string().contains("disk full"));
    }
}
