use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{create_set_handler, health_handler, member_handler, random_member_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    /// Set links look like `/~abc123` and `/~abc123/b`; the handlers strip the `~`.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/", post(create_set_handler))
            .route("/{set_ref}", get(random_member_handler))
            .route("/{set_ref}/{member}", get(member_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
