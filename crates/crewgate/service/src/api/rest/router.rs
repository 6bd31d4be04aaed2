//! API router configuration.

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Registration
        .route("/signup", post(handlers::signup))
        // Admin review queue
        .route("/admin/pending", get(handlers::list_pending))
        .route("/admin/verified", get(handlers::list_verified))
        .route("/admin/users/:id/approve", post(handlers::approve_user))
        .route("/admin/users/:id/reject", post(handlers::reject_user))
        .route(
            "/admin/users/:id/documents",
            get(handlers::list_user_documents),
        )
        // Dashboards
        .route("/dashboard/:role", get(handlers::dashboard_access))
        .route("/dashboard/:role/status", post(handlers::dashboard_status))
        // System
        .route("/system/shutdown", post(handlers::shutdown_daemon));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
