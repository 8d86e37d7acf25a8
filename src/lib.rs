//! # git-scout
//!
//! Search GitHub repositories and keep favorites offline
//!
//! ## Usage
//!
//! ```txt
//! Usage: git-scout [OPTIONS] [COMMAND]
//!
//! Commands:
//!   search     Search repositories by keyword
//!   favorites  List saved favorites
//!   show       Show the details of a favorite
//!   remove     Remove a favorite
//!   config     Change the configuration file
//!   help       Print this message or the help of the given subcommand(s)
//!
//! Options:
//!   -c, --config <CONFIG>  Custom configuration file path
//!       --show-config-path Show the current config path
//!   -v, --verbose...       Verbose mode (-v, -vv, -vvv)
//!   -h, --help             Print help
//!   -V, --version          Print version
//! ```

#![warn(clippy::all, rust_2018_idioms, missing_docs)]
#![deny(
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unwrap_used,
    clippy::expect_used
)]

pub(crate) mod app;
pub(crate) mod cli;
pub(crate) mod config;
pub(crate) mod connectivity;
pub(crate) mod db;
pub(crate) mod errors;
pub(crate) mod favorites;
pub(crate) mod feed;
pub(crate) mod github;
pub(crate) mod model;
pub(crate) mod status;
pub(crate) mod utils;

pub use app::GitScout;
pub use cli::{git_scout_main, Command, GitScoutCli};
pub use config::{ConfigData, GitScoutConfig};
pub use connectivity::{AssumeOnline, Connectivity, TcpConnectivity};
pub use db::config::StorageConfig;
pub use db::{FavoritesStore, SqliteFavoritesStore, SQLITE_INIT};
pub use errors::{GitScoutError, GitScoutErrorKind};
pub use favorites::{
    FavoriteAccountRepository, FavoriteAccountRepositoryImpl, FAVORITES_LOG_TARGET,
};
pub use feed::{FavoritesFeed, SearchFeed, SearchState};
pub use github::client::{ApiResponse, GithubApiService, GithubClient};
pub use github::config::{GithubConfig, GithubSettings};
pub use github::repo::GitHubServerResponse;
pub use github::repository::{GithubRepository, GithubRepositoryImpl};
pub use model::{GitHubAccount, Owner, NO_LANGUAGE};
pub use status::DataStatus;
