use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_models::ApiResponse;

use crate::models::{FavoriteRequest, FavoriteStatus};
use crate::services::FavoritesService;

fn ensure_access(user: &User, user_id: &str) -> Result<(), AppError> {
    if !user.can_access(user_id.trim()) {
        return Err(AppError::Forbidden(
            "Not authorized to access favorites for this user".to_string(),
        ));
    }
    Ok(())
}

/// Pulls `providerId` out of the body; an unreadable or incomplete body is a
/// validation failure rather than an extractor rejection.
fn provider_id_from(body: Result<Json<FavoriteRequest>, JsonRejection>) -> Result<String, AppError> {
    let Json(request) = body.map_err(|rejection| {
        debug!("Unreadable favorites request body: {}", rejection);
        AppError::ValidationError("providerId is required".to_string())
    })?;

    request
        .provider_id
        .ok_or_else(|| AppError::ValidationError("providerId is required".to_string()))
}

#[axum::debug_handler]
pub async fn list_favorites(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    ensure_access(&user, &user_id)?;

    let service = FavoritesService::new(&config, auth.token());
    let favorites = service.list_favorites(&user_id).await?;

    Ok(Json(ApiResponse::ok(favorites)))
}

#[axum::debug_handler]
pub async fn add_favorite(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(user_id): Path<String>,
    body: Result<Json<FavoriteRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    ensure_access(&user, &user_id)?;
    let provider_id = provider_id_from(body)?;

    let service = FavoritesService::new(&config, auth.token());
    let list = service.add_favorite(&user_id, &provider_id).await?;

    Ok(Json(ApiResponse::ok_with_message(
        list.provider_ids,
        "Provider added to favorites",
    )))
}

#[axum::debug_handler]
pub async fn remove_favorite(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(user_id): Path<String>,
    body: Result<Json<FavoriteRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    ensure_access(&user, &user_id)?;
    let provider_id = provider_id_from(body)?;

    let service = FavoritesService::new(&config, auth.token());
    let list = service.remove_favorite(&user_id, &provider_id).await?;

    Ok(Json(ApiResponse::ok_with_message(
        list.provider_ids,
        "Provider removed from favorites",
    )))
}

#[axum::debug_handler]
pub async fn check_favorite(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path((user_id, provider_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<FavoriteStatus>>, AppError> {
    ensure_access(&user, &user_id)?;

    let service = FavoritesService::new(&config, auth.token());
    let is_favorite = service.is_favorite(&user_id, &provider_id).await?;

    Ok(Json(ApiResponse::ok(FavoriteStatus {
        provider_id: provider_id.trim().to_string(),
        is_favorite,
    })))
}
