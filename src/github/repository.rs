//! Search repository: one remote call per query, reported as a status stream
use std::sync::Arc;

use futures::{
    future,
    stream::{self, BoxStream},
    StreamExt,
};
use log::debug;

use super::client::GithubApiService;
use crate::{model::GitHubAccount, status::DataStatus};

/// Source of repository search results.
pub trait GithubRepository: Sync + Send {
    /// Search repositories matching `search_query`.
    ///
    /// The stream yields [`DataStatus::Loading`] followed by exactly one
    /// terminal state, then ends.
    fn get_github_accounts(
        &self,
        search_query: &str,
    ) -> BoxStream<'static, DataStatus<Vec<GitHubAccount>>>;
}

/// [`GithubRepository`] backed by a [`GithubApiService`]
#[derive(Clone)]
pub struct GithubRepositoryImpl {
    /// Service doing the HTTP call
    github_api_service: Arc<dyn GithubApiService>,
}

impl GithubRepositoryImpl {
    /// Create a new repository over `github_api_service`
    pub fn new(github_api_service: Arc<dyn GithubApiService>) -> Self {
        Self { github_api_service }
    }
}

/// Run the search and map its outcome to a terminal status.
async fn fetch_accounts(
    service: Arc<dyn GithubApiService>,
    search_query: String,
) -> DataStatus<Vec<GitHubAccount>> {
    match service.fetch_repository_information(&search_query).await {
        Ok(response) if response.is_successful() => {
            let items = response.into_body().map(|body| body.items).unwrap_or_default();
            debug!("Search '{search_query}' returned {} items", items.len());
            DataStatus::success(items)
        }
        Ok(response) => {
            debug!("Search '{search_query}' rejected with {}", response.status());
            DataStatus::error(format!("Failed to fetch repositories: {}", response.message()))
        }
        Err(e) => DataStatus::error(format!("Error fetching repositories: {}", e.detail())),
    }
}

impl GithubRepository for GithubRepositoryImpl {
    fn get_github_accounts(
        &self,
        search_query: &str,
    ) -> BoxStream<'static, DataStatus<Vec<GitHubAccount>>> {
        let service = Arc::clone(&self.github_api_service);
        let search_query = search_query.to_string();
        stream::once(future::ready(DataStatus::loading()))
            .chain(stream::once(fetch_accounts(service, search_query)))
            .boxed()
    }
}

#[cfg(test)]
mod test {
    use std::{future::Future, pin::Pin, sync::Mutex};

    use reqwest::StatusCode;

    use super::*;
    use crate::{
        errors::{GitScoutError, GitScoutErrorKind},
        github::{client::ApiResponse, repo::GitHubServerResponse},
        model::Owner,
    };

    /// Canned outcome for the mock service
    enum Canned {
        Ok(StatusCode, Option<GitHubServerResponse>),
        Fail(&'static str),
    }

    struct MockService {
        canned: Canned,
        queries: Mutex<Vec<String>>,
    }

    impl MockService {
        fn new(canned: Canned) -> Arc<Self> {
            Arc::new(Self {
                canned,
                queries: Mutex::new(vec![]),
            })
        }
    }

    impl GithubApiService for MockService {
        fn fetch_repository_information(
            &self,
            q: &str,
        ) -> Pin<
            Box<
                dyn Future<Output = Result<ApiResponse<GitHubServerResponse>, GitScoutError>>
                    + Send
                    + '_,
            >,
        > {
            self.queries.lock().unwrap().push(q.to_string());
            let result = match &self.canned {
                Canned::Ok(status, body) => Ok(ApiResponse::new(*status, body.clone())),
                Canned::Fail(text) => {
                    Err(GitScoutError::new(GitScoutErrorKind::Reqwest).with_text(text))
                }
            };
            Box::pin(async move { result })
        }
    }

    fn sample_account() -> GitHubAccount {
        GitHubAccount {
            id: None,
            name: Some("Repository Name".to_string()),
            owner: Some(Owner {
                avatar_url: "https://a".to_string(),
                html_url: Some("https://b".to_string()),
            }),
            repository_language: Some("Kotlin".to_string()),
            stargazers_count: Some(100),
            watchers_count: Some(200),
            forks_count: Some(50),
            open_issues_count: Some(10),
        }
    }

    #[tokio::test]
    async fn success_emits_loading_then_items() {
        let service = MockService::new(Canned::Ok(
            StatusCode::OK,
            Some(GitHubServerResponse {
                items: vec![sample_account()],
            }),
        ));
        let repository = GithubRepositoryImpl::new(service.clone());
        let emissions: Vec<_> = repository.get_github_accounts("kotlin").collect().await;
        assert_eq!(
            emissions,
            vec![
                DataStatus::Loading,
                DataStatus::Success(vec![sample_account()])
            ]
        );
        assert_eq!(*service.queries.lock().unwrap(), vec!["kotlin".to_string()]);
    }

    #[tokio::test]
    async fn missing_body_is_an_empty_success() {
        let service = MockService::new(Canned::Ok(StatusCode::OK, None));
        let repository = GithubRepositoryImpl::new(service);
        let emissions: Vec<_> = repository.get_github_accounts("kotlin").collect().await;
        assert_eq!(emissions, vec![DataStatus::Loading, DataStatus::Success(vec![])]);
    }

    #[tokio::test]
    async fn http_error_uses_the_status_text() {
        let service = MockService::new(Canned::Ok(StatusCode::NOT_FOUND, None));
        let repository = GithubRepositoryImpl::new(service);
        let emissions: Vec<_> = repository.get_github_accounts("kotlin").collect().await;
        assert_eq!(
            emissions,
            vec![
                DataStatus::Loading,
                DataStatus::error("Failed to fetch repositories: Not Found")
            ]
        );
    }

    #[tokio::test]
    async fn transport_failure_uses_the_error_description() {
        let service = MockService::new(Canned::Fail("connection reset"));
        let repository = GithubRepositoryImpl::new(service);
        let emissions: Vec<_> = repository.get_github_accounts("kotlin").collect().await;
        assert_eq!(
            emissions,
            vec![
                DataStatus::Loading,
                DataStatus::error("Error fetching repositories: connection reset")
            ]
        );
    }

    #[tokio::test]
    async fn loading_comes_before_the_call() {
        let service = MockService::new(Canned::Ok(StatusCode::OK, None));
        let repository = GithubRepositoryImpl::new(service.clone());
        let mut stream = repository.get_github_accounts("rust");
        assert_eq!(stream.next().await, Some(DataStatus::Loading));
        assert!(service.queries.lock().unwrap().is_empty());
        assert!(stream.next().await.is_some_and(|s| s.is_terminal()));
        assert_eq!(stream.next().await, None);
    }
}
