pub mod config;
pub mod handlers;
pub mod page;
pub mod query_payload;
pub mod rag_response;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use kb_assist::QueryService;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Large enough that the 5 MiB image check, not the transport, rejects big uploads.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub query_service: Arc<QueryService>,
}

impl AppState {
    pub fn new(query_service: QueryService) -> Self {
        Self {
            query_service: Arc::new(query_service),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/health", get(handlers::health))
        .route("/api/query", post(handlers::handle_query))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
