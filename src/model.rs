//! Repository records as surfaced to the user
use serde::{Deserialize, Serialize};

/// Shown when a repository has no primary language.
pub const NO_LANGUAGE: &str = "No data";

/// One GitHub repository.
///
/// `id` is only set once the record has been saved as a favorite; search
/// results never carry one, even if the remote payload has an `id` field.
#[derive(Deserialize, Serialize, Default, Debug, PartialEq, Eq, Clone)]
pub struct GitHubAccount {
    /// Local identifier, assigned by the favorites store
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Full name (`owner/name`)
    #[serde(rename = "full_name")]
    pub name: Option<String>,

    /// Owner of the repository
    pub owner: Option<Owner>,

    /// Primary language
    #[serde(rename = "language")]
    pub repository_language: Option<String>,

    /// Stars
    pub stargazers_count: Option<i64>,

    /// Watchers
    pub watchers_count: Option<i64>,

    /// Forks
    pub forks_count: Option<i64>,

    /// Open issues
    pub open_issues_count: Option<i64>,
}

impl GitHubAccount {
    /// Primary language, or [`NO_LANGUAGE`] when unknown.
    pub fn language(&self) -> &str {
        self.repository_language.as_deref().unwrap_or(NO_LANGUAGE)
    }

    /// Full name, or an empty string.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Same record, tagged with a store identifier.
    pub fn with_id(self, id: i64) -> Self {
        Self { id: Some(id), ..self }
    }
}

/// Owner of a repository
#[derive(Deserialize, Serialize, Default, Debug, PartialEq, Eq, Clone)]
pub struct Owner {
    /// Avatar image URL
    pub avatar_url: String,

    /// Profile page URL
    #[serde(default)]
    pub html_url: Option<String>,
}
