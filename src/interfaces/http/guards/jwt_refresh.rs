//! Refresh token guard
//!
//! [`resolve_refresh_outcome`] is the verification strategy: it turns the
//! request headers into the `(error, user, info)` triple. The middleware then
//! hands the triple to [`RefreshOutcomeClassifier`] and maps its rejection.
//!
//! [`RefreshOutcomeClassifier`]: crate::domain::auth::RefreshOutcomeClassifier

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use super::{read_credential, AuthState, AuthenticatedUser, Credential};
use crate::domain::auth::{AuthOutcome, USER_NOT_FOUND};
use crate::domain::{DomainResult, User};
use crate::infrastructure::crypto::jwt::{describe_error, verify_token};
use crate::interfaces::http::common::ApiError;

pub const NO_AUTH_TOKEN: &str = "No auth token";

/// Repository failures are returned as `Err`, not folded into the triple.
pub async fn resolve_refresh_outcome(
    headers: &HeaderMap,
    state: &AuthState,
) -> DomainResult<AuthOutcome<User>> {
    let token = match read_credential(headers) {
        Credential::Missing => return Ok(AuthOutcome::empty()),
        Credential::Unusable => return Ok(AuthOutcome::failed(NO_AUTH_TOKEN)),
        Credential::Bearer(token) => token,
    };

    let claims = match verify_token(token, &state.keys.refresh) {
        Ok(claims) => claims,
        Err(e) => return Ok(AuthOutcome::failed(describe_error(&e))),
    };

    Ok(match state.users.get_user_by_id(&claims.sub).await? {
        Some(user) => AuthOutcome::authenticated(user),
        None => AuthOutcome::failed(USER_NOT_FOUND),
    })
}

pub async fn jwt_refresh_middleware(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let outcome = resolve_refresh_outcome(request.headers(), &state).await?;
    let user = state.classifier.classify(outcome)?;

    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{header, HeaderValue};

    use super::*;
    use crate::domain::auth::test_support::CapturingLogger;
    use crate::domain::auth::RefreshOutcomeClassifier;
    use crate::domain::{CreateUserDto, UserRepositoryInterface};
    use crate::infrastructure::crypto::jwt::{create_token, JwtConfig, TokenKeys};
    use crate::infrastructure::storage::InMemoryUserRepository;

    fn jwt(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiration_minutes: 60,
            issuer: "account-service".to_string(),
        }
    }

    async fn setup() -> (AuthState, User) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = repo.create_user(CreateUserDto::default()).await.unwrap();
        let state = AuthState {
            keys: TokenKeys {
                access: jwt("access"),
                refresh: jwt("refresh"),
            },
            users: repo,
            classifier: RefreshOutcomeClassifier::new(Arc::new(CapturingLogger::default())),
        };
        (state, user)
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    fn info_message(outcome: &AuthOutcome<User>) -> Option<&str> {
        outcome.info.as_ref().map(|i| i.message.as_str())
    }

    #[tokio::test]
    async fn no_header_produces_empty_triple() {
        let (state, _) = setup().await;

        let outcome = resolve_refresh_outcome(&HeaderMap::new(), &state)
            .await
            .unwrap();

        assert!(outcome.user.is_none() && outcome.error.is_none() && outcome.info.is_none());
    }

    #[tokio::test]
    async fn non_bearer_header_reports_missing_token() {
        let (state, _) = setup().await;
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));

        let outcome = resolve_refresh_outcome(&headers, &state).await.unwrap();

        assert_eq!(info_message(&outcome), Some(NO_AUTH_TOKEN));
    }

    #[tokio::test]
    async fn access_token_is_not_a_refresh_token() {
        let (state, user) = setup().await;
        let token = create_token(&user.id, &state.keys.access).unwrap();

        let outcome = resolve_refresh_outcome(&bearer(&token), &state)
            .await
            .unwrap();

        assert!(outcome.user.is_none());
        assert_eq!(info_message(&outcome), Some("invalid signature"));
    }

    #[tokio::test]
    async fn expired_refresh_token_is_reported() {
        let (state, user) = setup().await;
        let mut expired = state.keys.refresh.clone();
        expired.expiration_minutes = -10;
        let token = create_token(&user.id, &expired).unwrap();

        let outcome = resolve_refresh_outcome(&bearer(&token), &state)
            .await
            .unwrap();

        assert_eq!(info_message(&outcome), Some("jwt expired"));
    }

    #[tokio::test]
    async fn unknown_subject_reports_user_not_found() {
        let (state, _) = setup().await;
        let token = create_token("ghost", &state.keys.refresh).unwrap();

        let outcome = resolve_refresh_outcome(&bearer(&token), &state)
            .await
            .unwrap();

        assert_eq!(info_message(&outcome), Some(USER_NOT_FOUND));
    }

    #[tokio::test]
    async fn valid_refresh_token_resolves_user() {
        let (state, user) = setup().await;
        let token = create_token(&user.id, &state.keys.refresh).unwrap();

        let outcome = resolve_refresh_outcome(&bearer(&token), &state)
            .await
            .unwrap();

        assert_eq!(outcome.user.map(|u| u.id), Some(user.id));
        assert!(outcome.info.is_none());
    }
}
