//! Router assembly
//!
//! Builds the axum application from an injected book repository so the same
//! router serves the binary and the integration tests.

use crate::api;
use crate::config::{Config, StoreKind};
use crate::store::{BookRepository, MemoryStore, SqliteStore, StoreError};
use axum::{
    extract::Request,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Greeting served at the service root
pub const GREETING: &str = "Welcome to Book List!";

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Repository serving all book operations
    pub books: Arc<dyn BookRepository>,
}

impl AppState {
    /// Wrap a repository
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Open the configured book store
pub async fn build_store(config: &Config) -> Result<Arc<dyn BookRepository>, StoreError> {
    if let Some(raw) = &config.store.unrecognized_kind {
        warn!("Unrecognized BOOK_STORE value {:?}, using sqlite", raw);
    }

    match config.store.kind {
        StoreKind::Memory => {
            info!("Using in-memory book store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreKind::Sqlite => {
            let store = SqliteStore::open(&config.store.database_path).await?;
            Ok(Arc::new(store))
        }
    }
}

/// Build the application router with all routes and middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello_world))
        .route("/health", get(health_check))
        .route(
            "/books",
            get(api::books::list_books).post(api::books::create_book),
        )
        .route(
            "/books/:id",
            get(api::books::get_book)
                .put(api::books::update_book)
                .delete(api::books::delete_book),
        )
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Request ID middleware - adds unique ID to each request for tracing
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    response
}

async fn hello_world() -> &'static str {
    GREETING
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
