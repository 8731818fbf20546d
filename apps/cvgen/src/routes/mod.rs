pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/versions", get(handlers::handle_list_versions))
        // Documents, derived on demand per request
        .route(
            "/api/v1/documents/:version/markdown",
            get(handlers::handle_get_markdown),
        )
        .route(
            "/api/v1/documents/:version/html",
            get(handlers::handle_get_html),
        )
        .route("/api/v1/documents/:version/pdf", get(handlers::handle_get_pdf))
        .route(
            "/api/v1/documents/:version/summary",
            get(handlers::handle_get_summary),
        )
        .route("/api/v1/enrich", post(handlers::handle_enrich))
        .with_state(state)
}
