//! Favorites feed
use std::sync::Arc;

use futures::{stream::BoxStream, StreamExt};

use crate::{
    errors::GitScoutError, favorites::FavoriteAccountRepository, model::GitHubAccount,
};

/// Saved repositories for a front end
#[derive(Clone)]
pub struct FavoritesFeed {
    /// Favorites repository
    repository: Arc<dyn FavoriteAccountRepository>,
}

impl FavoritesFeed {
    /// Create a feed
    pub fn new(repository: Arc<dyn FavoriteAccountRepository>) -> Self {
        Self { repository }
    }

    /// Live list of favorites
    pub fn favorites(&self) -> BoxStream<'static, Vec<GitHubAccount>> {
        self.repository.get_favorite_repositories()
    }

    /// Favorites as they are now
    pub async fn snapshot(&self) -> Vec<GitHubAccount> {
        self.favorites().next().await.unwrap_or_default()
    }

    /// Saved favorite with this identifier
    pub async fn find(&self, id: i64) -> Option<GitHubAccount> {
        self.snapshot()
            .await
            .into_iter()
            .find(|account| account.id == Some(id))
    }

    /// Save a repository.
    /// # Errors
    /// Storage error if the write fails
    pub async fn save_favorite(&self, account: GitHubAccount) -> Result<(), GitScoutError> {
        self.repository.insert_favorite_account(account).await
    }

    /// Delete a favorite, handing it back so the deletion can be undone.
    /// # Errors
    /// Storage error if the write fails
    pub async fn delete_favorite(
        &self,
        account: GitHubAccount,
    ) -> Result<GitHubAccount, GitScoutError> {
        self.repository
            .delete_favorite_account(account.clone())
            .await?;
        Ok(account)
    }

    /// Put back a favorite returned by [`FavoritesFeed::delete_favorite`], under the same identifier.
    /// # Errors
    /// Storage error if the write fails
    pub async fn undo_delete(&self, account: GitHubAccount) -> Result<(), GitScoutError> {
        self.save_favorite(account).await
    }
}
