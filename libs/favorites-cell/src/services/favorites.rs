use tracing::{debug, warn};

use shared_config::AppConfig;

use crate::models::{FavoriteError, FavoriteList};
use crate::services::repository::{FavoriteRepository, SupabaseFavoriteRepository};

pub struct FavoritesService<R: FavoriteRepository> {
    repository: R,
}

impl FavoritesService<SupabaseFavoriteRepository> {
    pub fn new(config: &AppConfig, auth_token: &str) -> Self {
        Self::with_repository(SupabaseFavoriteRepository::new(config, auth_token))
    }
}

impl<R: FavoriteRepository> FavoritesService<R> {
    pub fn with_repository(repository: R) -> Self {
        Self { repository }
    }

    /// Adds `provider_id` to the user's favorites, creating the record on first
    /// use. Fails with `DuplicateEntry` if the provider is already present.
    pub async fn add_favorite(
        &self,
        user_id: &str,
        provider_id: &str,
    ) -> Result<FavoriteList, FavoriteError> {
        let user_id = required(user_id, "userId")?;
        let provider_id = required(provider_id, "providerId")?;
        debug!("Adding provider {} to favorites of user {}", provider_id, user_id);

        let mut list = self
            .repository
            .find(user_id)
            .await?
            .unwrap_or_else(|| FavoriteList::new(user_id));

        if let Err(e) = list.add(provider_id) {
            warn!("Rejected favorite for user {}: {}", user_id, e);
            return Err(e);
        }
        list.touch();

        self.repository.save(&list).await
    }

    /// Removes every occurrence of `provider_id`. Removing a provider that is
    /// not in the list leaves it unchanged; a user with no record at all is
    /// `NotFound`.
    pub async fn remove_favorite(
        &self,
        user_id: &str,
        provider_id: &str,
    ) -> Result<FavoriteList, FavoriteError> {
        let user_id = required(user_id, "userId")?;
        let provider_id = required(provider_id, "providerId")?;
        debug!("Removing provider {} from favorites of user {}", provider_id, user_id);

        let mut list = self
            .repository
            .find(user_id)
            .await?
            .ok_or_else(|| FavoriteError::NotFound {
                user_id: user_id.to_string(),
            })?;

        if list.remove(provider_id) == 0 {
            debug!("Provider {} was not a favorite of user {}", provider_id, user_id);
            return Ok(list);
        }
        list.touch();

        self.repository.save(&list).await
    }

    pub async fn list_favorites(&self, user_id: &str) -> Result<Vec<String>, FavoriteError> {
        let user_id = required(user_id, "userId")?;
        debug!("Listing favorites for user {}", user_id);

        Ok(self
            .repository
            .find(user_id)
            .await?
            .map(|list| list.provider_ids)
            .unwrap_or_default())
    }

    pub async fn is_favorite(&self, user_id: &str, provider_id: &str) -> Result<bool, FavoriteError> {
        let user_id = required(user_id, "userId")?;
        let provider_id = required(provider_id, "providerId")?;

        Ok(self
            .repository
            .find(user_id)
            .await?
            .is_some_and(|list| list.contains(provider_id)))
    }
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, FavoriteError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FavoriteError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed)
}
