//! Server runtime
//!
//! [`ServerHandle`] owns the full lifecycle: metrics recorder, database and
//! migrations, the REST API, and graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::LoggingEmailSender;
use crate::config::{AppConfig, LogFormat};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, TracingGuardLogger, UserRepository};
use crate::interfaces::{create_api_router, AppContext};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

/// The global recorder can be installed once per process; later starts reuse it.
fn prometheus_handle() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

pub struct ServerHandle {
    pub config: AppConfig,
    /// Address the API is bound to (resolved when the port is 0)
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let config = opts.config;
        info!("Starting account service");

        let metrics = prometheus_handle()?;

        let db = init_database(&config.database_config()).await?;
        if opts.auto_migrate {
            info!("Running database migrations");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        let keys = config.token_keys();
        info!(
            access_minutes = keys.access.expiration_minutes,
            refresh_minutes = keys.refresh.expiration_minutes,
            "Token verification configured"
        );

        let router = create_api_router(AppContext {
            users: Arc::new(UserRepository::new(db.clone())),
            email_sender: Arc::new(LoggingEmailSender),
            guard_logger: Arc::new(TracingGuardLogger),
            keys,
            db: Some(db.clone()),
            metrics,
        });

        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();

        let listener = tokio::net::TcpListener::bind(config.api_address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("REST API received shutdown signal");
            });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!(error = %e, "REST API server error");
            }
        });

        Ok(Self {
            config,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Trigger shutdown on SIGINT / SIGTERM.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }

    /// Wait for the API to drain, then close the database within the
    /// configured shutdown timeout.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        if let Err(e) = api_task.await {
            error!(error = %e, "REST API task panicked");
        }

        let closed = shutdown
            .cleanup_within_timeout(|| async move {
                match db.close().await {
                    Ok(()) => info!("Database connection closed"),
                    Err(e) => warn!(error = %e, "Error closing database connection"),
                }
            })
            .await;
        if !closed {
            warn!("Database did not close before the shutdown timeout");
        }

        info!("Account service stopped");
    }

    pub async fn shutdown(self) {
        info!("Shutting down account service");
        self.trigger_shutdown();
        self.wait().await;
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the configured level.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
