use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn favorites_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/{user_id}",
            get(handlers::list_favorites)
                .post(handlers::add_favorite)
                .delete(handlers::remove_favorite),
        )
        .route("/{user_id}/{provider_id}", get(handlers::check_favorite))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
