//! HTTP front end of the todo service.
//!
//! # Overview
//! An axum router over a [`TodoStore`]: list, create, update and delete under
//! `/todo`, plus a static homepage at `/`.
//!
//! # Design
//! - The store is built once at startup and injected through [`AppState`];
//!   handlers hold no other shared state.
//! - Handlers validate input before touching the store and turn every
//!   failure into an [`ApiError`] response, so one failing request never
//!   affects another.
//! - Unknown ids are not errors: update and delete answer with zero counts.

pub mod config;
pub mod error;
mod handlers;
pub mod store;
pub mod telemetry;

use std::{sync::Arc, time::Duration};

use axum::{
    http::StatusCode,
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub use config::Config;
pub use error::ApiError;
pub use store::{MemoryStore, MongoStore, StoreError, StoreSettings, TodoStore};

/// Per-request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }
}

pub fn app(store: Arc<dyn TodoStore>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/todo", get(handlers::list_todos).post(handlers::create_todo))
        .route("/todo/", get(handlers::list_todos).post(handlers::create_todo))
        .route(
            "/todo/{id}",
            put(handlers::update_todo).delete(handlers::delete_todo),
        )
        .with_state(AppState::new(store))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}
