pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;

use crate::config::Config;
use crate::KnowledgeBacklog;
use axum::body::Body;
use axum::http::Request;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub struct AppState {
    pub backlog: KnowledgeBacklog,
    pub config: Config,
}

pub type SharedState = Arc<AppState>;

/// Random v4 ids for the `x-request-id` header.
#[derive(Clone, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route(
            "/api/knowledge",
            get(handlers::list_articles).post(handlers::create_article),
        )
        .route(
            "/api/knowledge/:id",
            patch(handlers::change_status)
                .put(handlers::replace_article)
                .delete(handlers::delete_article),
        )
        .route("/api/knowledge/:id/tags", get(handlers::article_tags))
        .route("/api/tags", get(handlers::list_tags))
        .route("/api/user/stats", get(handlers::own_stats))
        .route("/api/auth/user", get(handlers::auth_user))
        .route("/api/admin/stats", post(handlers::admin_stats))
        .route(
            "/api/admin/users",
            get(handlers::list_users).post(handlers::add_user),
        )
        .route("/api/admin/users/:username", delete(handlers::remove_user))
        .route("/api/admin/clear-database", post(handlers::clear_database))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        // The UI is served from another origin and sends the identity header.
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Serves until Ctrl-C.
pub async fn serve(listener: TcpListener, state: SharedState) -> std::io::Result<()> {
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
