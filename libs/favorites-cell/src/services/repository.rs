use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{header::{HeaderMap, HeaderValue}, Method};
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{FavoriteError, FavoriteList};

const FAVORITES_TABLE: &str = "/rest/v1/favorites";

/// Storage for favorite lists, keyed by user id. `save` always writes the
/// whole record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn find(&self, user_id: &str) -> Result<Option<FavoriteList>, FavoriteError>;

    async fn save(&self, list: &FavoriteList) -> Result<FavoriteList, FavoriteError>;
}

/// Favorites stored in the document store, accessed with the caller's token.
pub struct SupabaseFavoriteRepository {
    supabase: SupabaseClient,
    auth_token: String,
}

impl SupabaseFavoriteRepository {
    pub fn new(config: &AppConfig, auth_token: &str) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.to_string(),
        }
    }
}

#[async_trait]
impl FavoriteRepository for SupabaseFavoriteRepository {
    async fn find(&self, user_id: &str) -> Result<Option<FavoriteList>, FavoriteError> {
        let path = format!(
            "{}?user_id=eq.{}&limit=1",
            FAVORITES_TABLE,
            urlencoding::encode(user_id)
        );

        let rows: Vec<FavoriteList> = self.supabase.request(
            Method::GET,
            &path,
            Some(&self.auth_token),
            None,
        ).await
        .map_err(|e| FavoriteError::Storage(e.to_string()))?;

        Ok(rows.into_iter().next())
    }

    async fn save(&self, list: &FavoriteList) -> Result<FavoriteList, FavoriteError> {
        debug!("Persisting {} favorites for user {}", list.provider_ids.len(), list.user_id);

        let mut headers = HeaderMap::new();
        headers.insert(
            "Prefer",
            HeaderValue::from_static("resolution=merge-duplicates,return=representation"),
        );

        let path = format!("{}?on_conflict=user_id", FAVORITES_TABLE);
        let rows: Vec<FavoriteList> = self.supabase.request_with_headers(
            Method::POST,
            &path,
            Some(&self.auth_token),
            Some(json!(list)),
            Some(headers),
        ).await
        .map_err(|e| FavoriteError::Storage(e.to_string()))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| FavoriteError::Storage("Failed to persist favorites".to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryFavoriteRepository {
    records: RwLock<HashMap<String, FavoriteList>>,
}

impl InMemoryFavoriteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn find(&self, user_id: &str) -> Result<Option<FavoriteList>, FavoriteError> {
        Ok(self.records.read().await.get(user_id).cloned())
    }

    async fn save(&self, list: &FavoriteList) -> Result<FavoriteList, FavoriteError> {
        self.records
            .write()
            .await
            .insert(list.user_id.clone(), list.clone());
        Ok(list.clone())
    }
}
