//! Search feed
//!
//! Every accepted search gets a generation number. Only the latest
//! generation may publish, so a slow earlier search can't overwrite the
//! result of a later one.
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use futures::StreamExt;
use log::{debug, info};
use tokio::sync::watch;

use crate::{
    connectivity::Connectivity,
    errors::{GitScoutError, GitScoutErrorKind},
    github::repository::GithubRepository,
    model::GitHubAccount,
    status::DataStatus,
};

/// What the search feed currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Generation that produced this state, 0 before any search
    pub generation: u64,

    /// Query of that generation
    pub query: Option<String>,

    /// Last status of that generation
    pub status: Option<DataStatus<Vec<GitHubAccount>>>,
}

/// Tri-state search results for a front end
pub struct SearchFeed {
    /// Where results come from
    repository: Arc<dyn GithubRepository>,

    /// Checked before each search
    connectivity: Arc<dyn Connectivity>,

    /// Latest generation handed out
    latest: Arc<AtomicU64>,

    /// Published state
    state: Arc<watch::Sender<SearchState>>,
}

/// Replace the published state, unless `generation` has been superseded.
fn publish(
    state: &watch::Sender<SearchState>,
    latest: &AtomicU64,
    generation: u64,
    query: &str,
    status: Option<DataStatus<Vec<GitHubAccount>>>,
) -> bool {
    state.send_if_modified(|current| {
        if latest.load(Ordering::SeqCst) != generation {
            return false;
        }
        *current = SearchState {
            generation,
            query: Some(query.to_string()),
            status,
        };
        true
    })
}

impl SearchFeed {
    /// Create a feed
    pub fn new(repository: Arc<dyn GithubRepository>, connectivity: Arc<dyn Connectivity>) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            repository,
            connectivity,
            latest: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
        }
    }

    /// Observe the feed.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Current state
    pub fn current(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Query of the latest published search
    pub fn current_query(&self) -> Option<String> {
        self.state.borrow().query.clone()
    }

    /// Start a search and return its generation.
    ///
    /// The search runs in the background; its statuses show up in the feed
    /// for as long as no newer search has been started.
    ///
    /// # Errors
    /// `InvalidInput` for a blank query, `NoConnection` when offline.
    pub async fn search(&self, query: &str) -> Result<u64, GitScoutError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GitScoutError::new(GitScoutErrorKind::InvalidInput)
                .with_text("Please enter a valid search query"));
        }
        if !self.connectivity.is_network_available().await {
            return Err(GitScoutError::new(GitScoutErrorKind::NoConnection)
                .with_text("No internet connection"));
        }
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.to_string();
        info!("Search #{generation}: '{query}'");
        publish(&self.state, &self.latest, generation, &query, None);

        let mut emissions = self.repository.get_github_accounts(&query);
        let state = Arc::clone(&self.state);
        let latest = Arc::clone(&self.latest);
        tokio::spawn(async move {
            while let Some(status) = emissions.next().await {
                if !publish(&state, &latest, generation, &query, Some(status)) {
                    debug!("Dropped stale status of search #{generation}");
                }
            }
        });
        Ok(generation)
    }

    /// Wait until `generation` has a terminal status or a newer search started.
    pub async fn wait_until_settled(&self, generation: u64) -> SearchState {
        let mut receiver = self.subscribe();
        let latest = Arc::clone(&self.latest);
        let settled = receiver
            .wait_for(|state| {
                latest.load(Ordering::SeqCst) != generation
                    || (state.generation == generation
                        && state.status.as_ref().is_some_and(DataStatus::is_terminal))
            })
            .await
            .map(|state| SearchState::clone(&state));
        match settled {
            Ok(state) => state,
            Err(_) => self.current(),
        }
    }
}

#[cfg(test)]
mod test {
    use std::{future::Future, pin::Pin, time::Duration};

    use futures::stream::{self, BoxStream};

    use super::*;
    use crate::connectivity::AssumeOnline;

    struct Offline;

    impl Connectivity for Offline {
        fn is_network_available(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
            Box::pin(async { false })
        }
    }

    /// Answers each query with one item named after it, after a query-specific delay
    struct SlowRepository;

    impl GithubRepository for SlowRepository {
        fn get_github_accounts(
            &self,
            search_query: &str,
        ) -> BoxStream<'static, DataStatus<Vec<GitHubAccount>>> {
            let delay = if search_query == "slow" { 200 } else { 10 };
            let account = GitHubAccount {
                name: Some(search_query.to_string()),
                ..Default::default()
            };
            stream::once(async { DataStatus::Loading })
                .chain(stream::once(async move {
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    DataStatus::success(vec![account])
                }))
                .boxed()
        }
    }

    fn feed() -> SearchFeed {
        SearchFeed::new(Arc::new(SlowRepository), Arc::new(AssumeOnline))
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let err = feed().search("   ").await.unwrap_err();
        assert_eq!(err.kind(), &GitScoutErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn offline_search_is_rejected() {
        let feed = SearchFeed::new(Arc::new(SlowRepository), Arc::new(Offline));
        let err = feed.search("kotlin").await.unwrap_err();
        assert_eq!(err.kind(), &GitScoutErrorKind::NoConnection);
        assert_eq!(feed.current(), SearchState::default());
    }

    #[tokio::test]
    async fn search_settles_with_its_result() {
        let feed = feed();
        let generation = feed.search("  kotlin ").await.unwrap();
        let state = feed.wait_until_settled(generation).await;
        assert_eq!(state.generation, generation);
        assert_eq!(state.query.as_deref(), Some("kotlin"));
        let items = state.status.as_ref().and_then(DataStatus::data).unwrap();
        assert_eq!(items[0].display_name(), "kotlin");
        assert_eq!(feed.current_query().as_deref(), Some("kotlin"));
    }

    #[tokio::test]
    async fn stale_search_does_not_overwrite_newer_one() {
        let feed = feed();
        let slow = feed.search("slow").await.unwrap();
        let fast = feed.search("fast").await.unwrap();
        assert!(fast > slow);

        let state = feed.wait_until_settled(fast).await;
        assert_eq!(state.query.as_deref(), Some("fast"));

        // give the slow search time to finish
        tokio::time::sleep(Duration::from_millis(300)).await;
        let state = feed.current();
        assert_eq!(state.generation, fast);
        let items = state.status.as_ref().and_then(DataStatus::data).unwrap();
        assert_eq!(items[0].display_name(), "fast");
    }

    #[tokio::test]
    async fn superseded_generation_settles_immediately() {
        let feed = feed();
        let slow = feed.search("slow").await.unwrap();
        feed.search("fast").await.unwrap();
        let state = tokio::time::timeout(Duration::from_millis(100), feed.wait_until_settled(slow))
            .await
            .unwrap();
        assert_ne!(state.generation, slow);
    }
}
