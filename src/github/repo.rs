//! Github search response
use serde::{Deserialize, Deserializer};

use crate::model::GitHubAccount;

/// Body of a successful search response
#[derive(Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct GitHubServerResponse {
    /// Matching repositories; missing or `null` means none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<GitHubAccount>,
}

/// Decode `null` like an empty list
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<GitHubAccount>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<GitHubAccount>>::deserialize(deserializer)?.unwrap_or_default())
}
