//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::auth::AuthManager;
use super::embedded;
use super::middleware::{self, AllowedOrigins};
use super::routes::{auth, dashboard, health, stats};
use crate::core::CoreApp;
use crate::core::constants::{AUTH_BODY_LIMIT, DEFAULT_BODY_LIMIT};
use crate::data::PgPool;
use crate::domain::AccountService;

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);
        Self {
            app,
            allowed_origins,
        }
    }

    /// Serve until shutdown; returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        let shutdown = app.shutdown.clone();
        let addr = SocketAddr::new(app.config.server.host.parse()?, app.config.server.port);

        let router = router(
            app.database.pool().clone(),
            app.auth.clone(),
            app.accounts.clone(),
            &allowed_origins,
        );

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "Listening");

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .await?;

        Ok(app)
    }
}

/// Build the full application router
pub fn router(
    pool: PgPool,
    auth_manager: Arc<AuthManager>,
    accounts: AccountService,
    allowed_origins: &AllowedOrigins,
) -> Router {
    let auth_routes =
        auth::routes(auth_manager.clone(), accounts).layer(DefaultBodyLimit::max(AUTH_BODY_LIMIT));

    let api_routes = health::routes(pool.clone()).merge(stats::routes(pool));

    Router::new()
        .route("/assets/{*path}", get(embedded::serve_asset))
        .nest("/api", api_routes)
        .merge(dashboard::routes(auth_manager))
        .merge(auth_routes)
        .fallback(middleware::handle_404)
        .layer(CompressionLayer::new())
        .layer(middleware::cors(allowed_origins))
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
}
