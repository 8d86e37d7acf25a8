//! GitHub search API module.
pub(crate) mod client;
pub(crate) mod config;
pub(crate) mod repo;
pub(crate) mod repository;

/// GitHub API URL
const GITHUB_API_URL: &str = "https://api.github.com/";

/// Search endpoint, relative to the API URL
const END_POINT_REPOSITORIES: &str = "search/repositories";

/// `Accept` header sent with every request
const GITHUB_ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Network timeout, in seconds
const NETWORK_TIMEOUT_SECS: u64 = 5;
