use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    batch_create_handler, create_url_handler, get_url_handler, health_handler, list_urls_handler,
    redirect_handler, stats_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/v1/health", get(health_handler))
            .route("/v1/urls", post(create_url_handler).get(list_urls_handler))
            .route("/v1/urls/batch", post(batch_create_handler))
            .route("/v1/urls/{code}", get(get_url_handler))
            .route("/v1/stats", get(stats_handler))
            .route("/{code}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
