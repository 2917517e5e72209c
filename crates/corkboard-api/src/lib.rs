pub mod error;
pub mod form;
pub mod messages;
pub mod page;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use corkboard_db::Database;

use crate::page::Pages;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub pages: Pages,
}

impl AppStateInner {
    pub fn new(db: Database) -> anyhow::Result<AppState> {
        let pages = Pages::new()?;
        Ok(Arc::new(Self { db, pages }))
    }
}

/// All board routes. Uploads are buffered whole, with no size cap.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(messages::list_messages))
        .route("/message", post(messages::create_message))
        .route("/download/{id}", get(messages::download_attachment))
        .route("/delete/{id}", post(messages::delete_message))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

/// GET /health: liveness check, no storage access.
pub async fn health() -> &'static str {
    "ok"
}
