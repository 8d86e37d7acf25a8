//! Storage configuration
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment variable overriding `storage.database_url`
pub(crate) const DATABASE_URL_ENV: &str = "GIT_SCOUT_DATABASE_URL";

/// File name of the default database, next to the config file
const DATABASE_FILE_NAME: &str = "favorites.sqlite";

/// `[storage]` section of the config file
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct StorageConfig {
    /// sqlx database URL, e.g. `sqlite:///home/me/favorites.sqlite`
    pub database_url: Option<String>,
}

impl StorageConfig {
    /// Database URL to open; falls back to a file inside `config_dir`.
    pub fn database_url(&self, config_dir: &Path) -> String {
        match std::env::var(DATABASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.database_url.clone().unwrap_or_else(|| {
                format!("sqlite://{}", config_dir.join(DATABASE_FILE_NAME).display())
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_next_to_the_config() {
        if std::env::var(DATABASE_URL_ENV).is_ok() {
            return;
        }
        let config = StorageConfig::default();
        assert_eq!(
            config.database_url(Path::new("/tmp/.git-scout")),
            "sqlite:///tmp/.git-scout/favorites.sqlite"
        );
        let config = StorageConfig {
            database_url: Some("sqlite::memory:".to_string()),
        };
        assert_eq!(config.database_url(Path::new("/tmp")), "sqlite::memory:");
    }
}
