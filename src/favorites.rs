//! Favorite repositories
use std::{future::Future, pin::Pin, sync::Arc};

use futures::{stream::BoxStream, StreamExt};
use log::error;

use crate::{db::FavoritesStore, errors::GitScoutError, model::GitHubAccount};

/// Log target of favorites read failures
pub const FAVORITES_LOG_TARGET: &str = "git_scout::favorites";

/// Saved repositories.
pub trait FavoriteAccountRepository: Sync + Send {
    /// Save `account`.
    ///
    /// # Errors
    /// A storage error (see [`GitScoutError::is_storage`]) if the write fails.
    fn insert_favorite_account(
        &self,
        account: GitHubAccount,
    ) -> Pin<Box<dyn Future<Output = Result<(), GitScoutError>> + Send + '_>>;

    /// Saved repositories, re-emitted on every change.
    ///
    /// Read failures never reach the caller: they are logged and an empty
    /// list is emitted instead.
    fn get_favorite_repositories(&self) -> BoxStream<'static, Vec<GitHubAccount>>;

    /// Remove `account`. Removing something that isn't saved succeeds.
    ///
    /// # Errors
    /// A storage error if the write fails.
    fn delete_favorite_account(
        &self,
        account: GitHubAccount,
    ) -> Pin<Box<dyn Future<Output = Result<(), GitScoutError>> + Send + '_>>;
}

/// [`FavoriteAccountRepository`] over a [`FavoritesStore`]
#[derive(Clone)]
pub struct FavoriteAccountRepositoryImpl {
    /// Backing store
    store: Arc<dyn FavoritesStore>,
}

impl FavoriteAccountRepositoryImpl {
    /// Create a new repository over `store`
    pub fn new(store: Arc<dyn FavoritesStore>) -> Self {
        Self { store }
    }
}

impl FavoriteAccountRepository for FavoriteAccountRepositoryImpl {
    fn insert_favorite_account(
        &self,
        account: GitHubAccount,
    ) -> Pin<Box<dyn Future<Output = Result<(), GitScoutError>> + Send + '_>> {
        Box::pin(async move {
            self.store
                .insert_favorite(account)
                .await
                .map(|_| ())
                .map_err(|e| {
                    GitScoutError::storage("Failed to insert favorite account", e.detail())
                })
        })
    }

    fn get_favorite_repositories(&self) -> BoxStream<'static, Vec<GitHubAccount>> {
        self.store
            .get_all_favorites()
            .map(|favorites| match favorites {
                Ok(favorites) => favorites,
                Err(e) => {
                    error!(
                        target: FAVORITES_LOG_TARGET,
                        "Failed to fetch favorite repositories: {e}"
                    );
                    vec![]
                }
            })
            .boxed()
    }

    fn delete_favorite_account(
        &self,
        account: GitHubAccount,
    ) -> Pin<Box<dyn Future<Output = Result<(), GitScoutError>> + Send + '_>> {
        Box::pin(async move {
            self.store
                .delete_favorite(account)
                .await
                .map_err(|e| {
                    GitScoutError::storage("Failed to delete favorite account", e.detail())
                })
        })
    }
}
