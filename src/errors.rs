//! Error handling for the git-scout crate.
use std::{error::Error as StdError, fmt};

/// Error type for the git-scout crate.
#[derive(Debug)]
pub struct GitScoutError {
    /// Inner error.
    inner: Box<Inner>,
}

impl GitScoutError {
    /// Create a new error.
    pub(crate) fn new(kind: GitScoutErrorKind) -> Self {
        Self {
            inner: Box::new(Inner { kind, source: None }),
        }
    }

    /// Create a new error with a source.
    pub(crate) fn with_text(mut self, text: &str) -> Self {
        self.inner.source = Some(Box::new(std::io::Error::other(text)));
        self
    }

    /// Create a new config error with a context message and the underlying error.
    pub(crate) fn new_with_source<E: fmt::Display>(text: &str, e: E) -> Self {
        Self::new(GitScoutErrorKind::Config).with_text(&format!("{text}: {e}"))
    }

    /// Build a storage error, keeping the description of the failure that caused it.
    pub(crate) fn storage<E: fmt::Display>(text: &str, e: E) -> Self {
        Self::new(GitScoutErrorKind::Storage).with_text(&format!("{text}: {e}"))
    }

    /// Kind of the error.
    pub fn kind(&self) -> &GitScoutErrorKind {
        &self.inner.kind
    }

    /// Whether this error was raised by a favorites write.
    pub fn is_storage(&self) -> bool {
        matches!(self.inner.kind, GitScoutErrorKind::Storage)
    }

    /// Description of the underlying failure, without the kind prefix.
    pub fn detail(&self) -> String {
        match &self.inner.source {
            Some(source) => source.to_string(),
            None => format!("{:?}", self.inner.kind),
        }
    }
}

/// Type alias for a boxed error.
pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Inner error type for the git-scout crate.
#[derive(Debug)]
struct Inner {
    /// Error kind.
    kind: GitScoutErrorKind,

    /// Source error.
    source: Option<BoxError>,
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitScoutErrorKind {
    /// Error related to the reqwest crate.
    Reqwest,

    /// Error related to serde.
    Serde,

    /// Error related to the toml config file.
    Toml,

    /// Filesystem error.
    Io,

    /// Error related to sqlx.
    Sqlx,

    /// Configuration error.
    Config,

    /// A favorites write failed.
    Storage,

    /// The search query was empty.
    InvalidInput,

    /// The remote host is unreachable.
    NoConnection,

    /// A search ended with an error status.
    Search,
}

impl fmt::Display for GitScoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.source {
            Some(source) => write!(f, "{:?}: {}", self.inner.kind, source),
            None => write!(f, "{:?}", self.inner.kind),
        }
    }
}

impl StdError for GitScoutError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| &**e as _)
    }
}

impl GitScoutError {
    /// Wrap a foreign error under the given kind.
    fn wrap<E: StdError + Send + Sync + 'static>(kind: GitScoutErrorKind, e: E) -> Self {
        Self {
            inner: Box::new(Inner {
                kind,
                source: Some(Box::new(e)),
            }),
        }
    }
}

impl From<reqwest::Error> for GitScoutError {
    fn from(e: reqwest::Error) -> Self {
        Self::wrap(GitScoutErrorKind::Reqwest, e)
    }
}

impl From<serde_json::Error> for GitScoutError {
    fn from(e: serde_json::Error) -> Self {
        Self::wrap(GitScoutErrorKind::Serde, e)
    }
}

impl From<toml::de::Error> for GitScoutError {
    fn from(e: toml::de::Error) -> Self {
        Self::wrap(GitScoutErrorKind::Toml, e)
    }
}

impl From<toml::ser::Error> for GitScoutError {
    fn from(e: toml::ser::Error) -> Self {
        Self::wrap(GitScoutErrorKind::Toml, e)
    }
}

impl From<std::io::Error> for GitScoutError {
    fn from(e: std::io::Error) -> Self {
        Self::wrap(GitScoutErrorKind::Io, e)
    }
}

impl From<sqlx::Error> for GitScoutError {
    fn from(e: sqlx::Error) -> Self {
        Self::wrap(GitScoutErrorKind::Sqlx, e)
    }
}

impl From<url::ParseError> for GitScoutError {
    fn from(e: url::ParseError) -> Self {
        Self::wrap(GitScoutErrorKind::Config, e)
    }
}

impl From<&str> for GitScoutError {
    fn from(text: &str) -> Self {
        Self::new(GitScoutErrorKind::Config).with_text(text)
    }
}

impl From<String> for GitScoutError {
    fn from(text: String) -> Self {
        Self::new(GitScoutErrorKind::Config).with_text(&text)
    }
}
