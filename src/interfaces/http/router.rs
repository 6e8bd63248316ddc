//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{EmailSender, UserService};
use crate::domain::auth::{GuardLogger, RefreshOutcomeClassifier};
use crate::domain::{Permission, UserRepositoryInterface};
use crate::infrastructure::crypto::jwt::TokenKeys;

use super::common::{BadRequestBody, EmptyData, GuardErrorBody, GuardErrorProperties};
use super::guards::{
    jwt_auth_middleware, jwt_refresh_middleware, require_permissions, AuthState,
    RequiredPermissions,
};
use super::modules::health::{self, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{auth, users};

/// Permissions required to read the full profile
const STUDIO_ACCESS: RequiredPermissions =
    RequiredPermissions(&[Permission::EmailVerified, Permission::AccessStudio]);

/// Everything the router needs from the outside
#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UserRepositoryInterface>,
    pub email_sender: Arc<dyn EmailSender>,
    pub guard_logger: Arc<dyn GuardLogger>,
    pub keys: TokenKeys,
    /// Pinged by `/health` when present
    pub db: Option<DatabaseConnection>,
    pub metrics: PrometheusHandle,
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "refresh_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Refresh token"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::refresh,
        users::onboard,
        users::is_onboarded,
        users::resend_verification,
        users::update_user,
        users::find_one,
    ),
    components(
        schemas(
            EmptyData,
            GuardErrorBody,
            GuardErrorProperties,
            BadRequestBody,
            health::HealthResponse,
            health::ComponentHealth,
            users::UserDto,
            users::UserTagDto,
            users::FavoriteWalletAddressDto,
            users::OnboardUserRequest,
            users::UpdateUserRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Refresh token resolution"),
        (name = "User", description = "Current user: onboarding, profile, favorite wallet addresses"),
    ),
    info(
        title = "Account Service API",
        version = "1.0.0",
        description = "User accounts, onboarding and favorite wallet addresses",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

pub fn create_api_router(ctx: AppContext) -> Router {
    let auth_state = AuthState {
        keys: ctx.keys,
        users: ctx.users.clone(),
        classifier: RefreshOutcomeClassifier::new(ctx.guard_logger),
    };

    let user_state = users::UserHandlerState {
        user_service: Arc::new(UserService::new(ctx.users, ctx.email_sender)),
    };

    // Refresh-token protected
    let auth_routes = Router::new()
        .route("/refresh", get(auth::refresh))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            jwt_refresh_middleware,
        ));

    // Access-token protected; reading the profile also needs studio access
    let user_routes = Router::new()
        .route(
            "/",
            get(users::find_one).route_layer(middleware::from_fn_with_state(
                STUDIO_ACCESS,
                require_permissions,
            )),
        )
        .route("/", put(users::update_user))
        .route("/onboard", put(users::onboard))
        .route("/is-onboarded", get(users::is_onboarded))
        .route("/resend", post(users::resend_verification))
        .route_layer(middleware::from_fn_with_state(
            auth_state,
            jwt_auth_middleware,
        ))
        .with_state(user_state);

    let api_routes = Router::new()
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/user", user_routes)
        .route_layer(middleware::from_fn(http_metrics_middleware));

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db: ctx.db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: ctx.metrics,
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .merge(metrics_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}
