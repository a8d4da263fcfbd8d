use axum::Router;
use tower_http::services::ServeDir;

use crate::state::SharedState;

pub mod docs;
pub mod game;
pub mod health;
pub mod questions;
pub mod websocket;

/// Compose all route trees, wiring in shared state, documentation routes, and the static frontend.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(questions::router())
        .merge(game::router())
        .merge(websocket::router())
        .merge(docs::router());

    // Anything not matched by the API is looked up in the static root.
    let static_files = ServeDir::new(state.config().static_dir());

    api_router
        .fallback_service(static_files)
        .with_state(state)
}
