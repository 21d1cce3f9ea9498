use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

/// One record per user: the providers they favorited, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteList {
    pub user_id: String,
    #[serde(default)]
    pub provider_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl FavoriteList {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            provider_ids: Vec::new(),
            updated_at: None,
        }
    }

    pub fn contains(&self, provider_id: &str) -> bool {
        self.provider_ids.iter().any(|id| id == provider_id)
    }

    /// Appends `provider_id`, keeping the list free of duplicates.
    pub fn add(&mut self, provider_id: &str) -> Result<(), FavoriteError> {
        if self.contains(provider_id) {
            return Err(FavoriteError::DuplicateEntry {
                provider_id: provider_id.to_string(),
            });
        }
        self.provider_ids.push(provider_id.to_string());
        Ok(())
    }

    /// Drops every occurrence of `provider_id` and returns how many were removed.
    pub fn remove(&mut self, provider_id: &str) -> usize {
        let before = self.provider_ids.len();
        self.provider_ids.retain(|id| id != provider_id);
        before - self.provider_ids.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    #[serde(default, alias = "provider_id")]
    pub provider_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub provider_id: String,
    pub is_favorite: bool,
}

#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("{0}")]
    Validation(String),

    #[error("Provider {provider_id} is already in favorites")]
    DuplicateEntry { provider_id: String },

    #[error("No favorites found for user {user_id}")]
    NotFound { user_id: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<FavoriteError> for AppError {
    fn from(err: FavoriteError) -> Self {
        match err {
            FavoriteError::Validation(msg) => AppError::ValidationError(msg),
            e @ FavoriteError::DuplicateEntry { .. } => AppError::BadRequest(e.to_string()),
            e @ FavoriteError::NotFound { .. } => AppError::NotFound(e.to_string()),
            FavoriteError::Storage(msg) => AppError::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_add_rejects_duplicates() {
        let mut list = FavoriteList::new("u1");
        list.add("p1").unwrap();
        list.add("p2").unwrap();

        assert_matches!(
            list.add("p1"),
            Err(FavoriteError::DuplicateEntry { provider_id }) if provider_id == "p1"
        );
        assert_eq!(list.provider_ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_remove_drops_every_occurrence() {
        // Rows written by older clients may already hold duplicates.
        let mut list = FavoriteList {
            user_id: "u1".to_string(),
            provider_ids: vec!["p1".into(), "p2".into(), "p1".into()],
            updated_at: None,
        };

        assert_eq!(list.remove("p1"), 2);
        assert_eq!(list.provider_ids, vec!["p2"]);
        assert_eq!(list.remove("p9"), 0);
    }

    #[test]
    fn test_request_accepts_both_spellings() {
        let camel: FavoriteRequest = serde_json::from_str(r#"{"providerId":"p1"}"#).unwrap();
        let snake: FavoriteRequest = serde_json::from_str(r#"{"provider_id":"p1"}"#).unwrap();
        let empty: FavoriteRequest = serde_json::from_str("{}").unwrap();

        assert_eq!(camel.provider_id.as_deref(), Some("p1"));
        assert_eq!(snake.provider_id.as_deref(), Some("p1"));
        assert!(empty.provider_id.is_none());
    }

    #[test]
    fn test_row_without_provider_ids_deserializes() {
        let list: FavoriteList = serde_json::from_str(r#"{"user_id":"u1"}"#).unwrap();
        assert!(list.provider_ids.is_empty());
    }

    #[test]
    fn test_error_mapping() {
        assert_matches!(AppError::from(FavoriteError::Validation("x".into())), AppError::ValidationError(_));
        assert_matches!(
            AppError::from(FavoriteError::DuplicateEntry { provider_id: "p1".into() }),
            AppError::BadRequest(msg) if msg == "Provider p1 is already in favorites"
        );
        assert_matches!(
            AppError::from(FavoriteError::NotFound { user_id: "u1".into() }),
            AppError::NotFound(_)
        );
        assert_matches!(AppError::from(FavoriteError::Storage("down".into())), AppError::Database(_));
    }
}
