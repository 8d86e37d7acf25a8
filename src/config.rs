//! Configuration handling
use std::{
    fs::{create_dir_all, read_to_string, File},
    io::Write,
    path::{Path, PathBuf},
};

use home::home_dir;
use serde::{Deserialize, Serialize};

use crate::{
    db::config::StorageConfig,
    errors::GitScoutError,
    github::config::{GithubConfig, GithubSettings},
};

/// Configuration data
#[derive(Default, Clone, Debug)]
pub struct GitScoutConfig {
    /// path to the configuration file
    pub config_path: PathBuf,

    /// actual configuration data
    pub config_data: ConfigData,
}

/// Content of the config file
#[derive(Deserialize, Serialize, Default, Clone, Debug)]
pub struct ConfigData {
    /// Github configuration
    pub github: Option<GithubConfig>,

    /// Storage configuration
    pub storage: Option<StorageConfig>,
}

impl GitScoutConfig {
    /// Load the config file, from `config_path` or the default location
    /// # Errors
    /// Error if the config file can't be opened or parsed
    pub fn try_new(config_path: Option<PathBuf>) -> Result<Self, GitScoutError> {
        let config_path = match config_path {
            Some(p) => p,
            None => Self::get_config_path()?,
        };
        let contents = read_to_string(&config_path)
            .map_err(|e| GitScoutError::new_with_source("Unable to open", e))?;
        let config_data = toml::from_str(&contents)?;
        Ok(GitScoutConfig {
            config_path,
            config_data,
        })
    }

    /// Save the config data to the config file
    /// # Errors
    /// Error if the config file can't be created or written to
    pub fn save(&self) -> Result<(), GitScoutError> {
        let config_str = toml::to_string(&self.config_data)?;
        let mut file = File::create(&self.config_path)
            .map_err(|e| GitScoutError::new_with_source("Unable to create config file", e))?;
        file.write_all(config_str.as_bytes())
            .map_err(|e| GitScoutError::new_with_source("Unable to write to config file", e))
    }

    /// Get the path to the config file, creating an empty one if needed
    /// # Errors
    /// Error if the home directory can't be found
    pub fn get_config_path() -> Result<PathBuf, GitScoutError> {
        let home_dir = match home_dir() {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => return Err("Unable to get your home dir! home::home_dir() isn't working".into()),
        };
        let config_directory = home_dir.join(".config").join(".git-scout");
        let config_path = config_directory.join("config.toml");
        create_dir_all(config_directory)
            .map_err(|e| GitScoutError::new_with_source("Unable to create config dir", e))?;
        if !config_path.exists() {
            let mut file = File::create(&config_path)
                .map_err(|e| GitScoutError::new_with_source("Unable to create config file", e))?;
            file.write_all(b"")
                .map_err(|e| GitScoutError::new_with_source("Unable to write to config file", e))?;
        }
        Ok(config_path)
    }

    /// Update the config data and save it to the config file
    /// # Errors
    /// Error if fail to save config
    pub fn update(
        &mut self,
        updater_fn: impl FnOnce(&mut ConfigData),
    ) -> Result<(), GitScoutError> {
        updater_fn(&mut self.config_data);
        self.save()?;
        Ok(())
    }

    /// Directory holding the config file
    pub fn config_dir(&self) -> &Path {
        self.config_path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Github settings, defaults applied
    /// # Errors
    /// Error if the configured API URL is invalid
    pub fn github_settings(&self) -> Result<GithubSettings, GitScoutError> {
        self.config_data
            .github
            .clone()
            .unwrap_or_default()
            .settings()
    }

    /// Database URL of the favorites store
    pub fn database_url(&self) -> String {
        self.config_data
            .storage
            .clone()
            .unwrap_or_default()
            .database_url(self.config_dir())
    }
}
