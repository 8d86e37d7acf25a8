//! Github search client
use std::{future::Future, pin::Pin};

use log::{debug, warn};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    StatusCode,
};
use url::Url;

use super::{config::GithubSettings, repo::GitHubServerResponse, END_POINT_REPOSITORIES};
use crate::errors::GitScoutError;

/// Raw outcome of one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    /// HTTP status
    status: StatusCode,

    /// Decoded body, only read on success
    body: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Build a response.
    pub fn new(status: StatusCode, body: Option<T>) -> Self {
        Self { status, body }
    }

    /// Whether the status is 2xx.
    pub fn is_successful(&self) -> bool {
        self.status.is_success()
    }

    /// HTTP status
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Status description, e.g. `Not Found`.
    pub fn message(&self) -> String {
        match self.status.canonical_reason() {
            Some(reason) => reason.to_string(),
            None => self.status.as_str().to_string(),
        }
    }

    /// Take the body.
    pub fn into_body(self) -> Option<T> {
        self.body
    }
}

/// Anything able to run a repository search.
pub trait GithubApiService: Sync + Send {
    /// Search repositories matching `q`.
    ///
    /// An `Err` means the exchange itself failed (connection, timeout,
    /// undecodable body). HTTP error statuses come back as `Ok`.
    fn fetch_repository_information(
        &self,
        q: &str,
    ) -> Pin<
        Box<
            dyn Future<Output = Result<ApiResponse<GitHubServerResponse>, GitScoutError>>
                + Send
                + '_,
        >,
    >;
}

/// Github client over reqwest
#[derive(Debug, Clone)]
pub struct GithubClient {
    /// Resolved settings
    settings: GithubSettings,

    /// Reqwest client
    client: reqwest::Client,
}

impl GithubClient {
    /// Build the client: default `Accept` header, user agent and timeouts.
    /// # Errors
    /// Error if the header value is invalid or the TLS backend fails to load
    pub fn new(settings: GithubSettings) -> Result<Self, GitScoutError> {
        let mut headers = HeaderMap::new();
        let accept = HeaderValue::from_str(&settings.accept)
            .map_err(|e| GitScoutError::new_with_source("Invalid accept header", e))?;
        headers.insert(ACCEPT, accept);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .connect_timeout(settings.timeout)
            .read_timeout(settings.timeout)
            .build()?;
        Ok(Self { settings, client })
    }

    /// Settings this client was built with
    pub fn settings(&self) -> &GithubSettings {
        &self.settings
    }

    /// Send the search request, retrying once if the connection could not be made.
    async fn send_search(&self, q: &str) -> Result<reqwest::Response, GitScoutError> {
        let url = self.settings.api_url.join(END_POINT_REPOSITORIES)?;
        let response =
            retry_on_connect(&url, || self.client.get(url.clone()).query(&[("q", q)]).send())
                .await?;
        debug!("GET {} -> {}", response.url(), response.status());
        Ok(response)
    }
}

/// Run `send`, and run it once more if the connection could not be made.
/// HTTP error statuses are returned as they are.
async fn retry_on_connect<F, Fut>(
    url: &Url,
    mut send: F,
) -> Result<reqwest::Response, GitScoutError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    match send().await {
        Ok(response) => Ok(response),
        Err(e) if e.is_connect() => {
            warn!("Connection to {url} failed, retrying once: {e}");
            Ok(send().await?)
        }
        Err(e) => Err(e.into()),
    }
}

impl GithubApiService for GithubClient {
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
        let q = q.to_string();
        Box::pin(async move {
            let response = self.send_search(&q).await?;
            let status = response.status();
            if !status.is_success() {
                return Ok(ApiResponse::new(status, None));
            }
            let text = response.text().await?;
            if text.trim().is_empty() {
                return Ok(ApiResponse::new(status, None));
            }
            let body: GitHubServerResponse = serde_json::from_str(&text)?;
            Ok(ApiResponse::new(status, Some(body)))
        })
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{http::StatusCode as AxumStatus, routing::get, Router};
    use tokio::net::TcpListener;

    use super::*;
    use crate::errors::GitScoutErrorKind;

    /// Serve `/` with 200 and `/missing` with 404
    async fn stub() -> String {
        let app = Router::new()
            .route("/", get(|| async { AxumStatus::OK }))
            .route("/missing", get(|| async { AxumStatus::NOT_FOUND }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/")
    }

    /// Address nothing listens on
    async fn closed() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn connect_failure_is_retried_once() {
        let live = stub().await;
        let closed = closed().await;
        let client = reqwest::Client::new();
        let attempts = AtomicUsize::new(0);
        let url = Url::parse(&live).unwrap();

        let response = retry_on_connect(&url, || {
            let target = if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                &closed
            } else {
                &live
            };
            client.get(target.as_str()).send()
        })
        .await
        .unwrap();

        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert!(response.status().is_success());
    }

    #[tokio::test]
    async fn second_connect_failure_is_returned() {
        let closed = closed().await;
        let client = reqwest::Client::new();
        let attempts = AtomicUsize::new(0);
        let url = Url::parse(&closed).unwrap();

        let err = retry_on_connect(&url, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            client.get(closed.as_str()).send()
        })
        .await
        .unwrap_err();

        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert_eq!(err.kind(), &GitScoutErrorKind::Reqwest);
    }

    #[tokio::test]
    async fn http_error_status_is_not_retried() {
        let live = stub().await;
        let client = reqwest::Client::new();
        let attempts = AtomicUsize::new(0);
        let url = Url::parse(&live).unwrap().join("missing").unwrap();

        let response = retry_on_connect(&url, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            client.get(url.clone()).send()
        })
        .await
        .unwrap();

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn message_is_the_reason_phrase() {
        let response: ApiResponse<()> = ApiResponse::new(StatusCode::NOT_FOUND, None);
        assert!(!response.is_successful());
        assert_eq!(response.message(), "Not Found");
    }

    #[test]
    fn message_falls_back_to_the_code() {
        let status = StatusCode::from_u16(599).unwrap();
        let response: ApiResponse<()> = ApiResponse::new(status, None);
        assert_eq!(response.message(), "599");
    }

    #[test]
    fn client_builds_from_default_settings() {
        let settings = GithubSettings::new("https://api.github.com").unwrap();
        let client = GithubClient::new(settings.clone()).unwrap();
        assert_eq!(client.settings(), &settings);
    }
}
