use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use calendar_cell::router::calendar_routes;
use favorites_cell::router::favorites_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Therapy booking API is running!" }))
        .nest("/favorites", favorites_routes(state.clone()))
        .nest("/calendar", calendar_routes(state))
}
