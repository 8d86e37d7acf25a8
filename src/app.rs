//! Wiring of the search and favorites feeds
use std::sync::Arc;

use log::debug;

use crate::{
    config::GitScoutConfig,
    connectivity::{AssumeOnline, Connectivity, TcpConnectivity},
    db::{FavoritesStore, SqliteFavoritesStore},
    errors::GitScoutError,
    favorites::FavoriteAccountRepositoryImpl,
    feed::{FavoritesFeed, SearchFeed},
    github::{
        client::{GithubApiService, GithubClient},
        repository::GithubRepositoryImpl,
    },
};

/// Both feeds, ready to use
pub struct GitScout {
    /// Search results
    pub search: SearchFeed,

    /// Saved favorites
    pub favorites: FavoritesFeed,
}

impl GitScout {
    /// Assemble the feeds from their lowest-level parts.
    pub fn new(
        github_api_service: Arc<dyn GithubApiService>,
        store: Arc<dyn FavoritesStore>,
        connectivity: Arc<dyn Connectivity>,
    ) -> Self {
        let repository = GithubRepositoryImpl::new(github_api_service);
        let favorites = FavoriteAccountRepositoryImpl::new(store);
        Self {
            search: SearchFeed::new(Arc::new(repository), connectivity),
            favorites: FavoritesFeed::new(Arc::new(favorites)),
        }
    }

    /// Build everything from the configuration: HTTP client, database, connectivity probe.
    /// # Errors
    /// Error if the settings are invalid or the database can't be opened
    pub async fn from_config(config: &GitScoutConfig) -> Result<Self, GitScoutError> {
        let settings = config.github_settings()?;
        let connectivity: Arc<dyn Connectivity> = if settings.check_connectivity {
            Arc::new(TcpConnectivity::from_url(&settings.api_url, settings.timeout)?)
        } else {
            Arc::new(AssumeOnline)
        };
        let client = GithubClient::new(settings)?;
        debug!("Using API at {}", client.settings().api_url);
        let database_url = config.database_url();
        debug!("Using database {database_url}");
        let store = SqliteFavoritesStore::open(&database_url).await?;
        Ok(Self::new(Arc::new(client), Arc::new(store), connectivity))
    }
}
