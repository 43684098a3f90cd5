//! Configuration handling
use std::{
    fmt,
    fs::read_to_string,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Deserializer};

use crate::errors::{GroupCloneError, GroupCloneErrorKind};

/// Default configuration path, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// Configuration data, loaded once at startup
#[derive(Deserialize, Clone, PartialEq, Eq)]
pub struct GroupCloneConfig {
    /// Base URL of the GitLab instance (`https://gitlab.example.com`)
    pub gitlab_url: String,

    /// Root group, numeric id or full path
    #[serde(deserialize_with = "deserialize_group_id")]
    pub group_id: String,

    /// Personal access token
    pub token: String,

    /// Directory receiving the clones
    pub clone_dir: PathBuf,

    /// Page size used when listing projects
    pub per_page: u32,
}

impl GroupCloneConfig {
    /// Load the configuration from a YAML file
    /// # Errors
    /// Error if the file doesn't exist, can't be read or doesn't parse
    pub fn try_from_path(config_path: &Path) -> Result<Self, GroupCloneError> {
        if !config_path.exists() {
            return Err(GroupCloneError::new(GroupCloneErrorKind::Config).with_text(&format!(
                "config file does not exist: {}",
                config_path.display()
            )));
        }
        let contents = read_to_string(config_path)
            .map_err(|e| GroupCloneError::new(GroupCloneErrorKind::Config).with_source(e))?;
        let config = Self::from_yaml(&contents)?;
        log::debug!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Parse the configuration from YAML text
    /// # Errors
    /// Error if a key is missing, the text is malformed or `per_page` is 0
    pub fn from_yaml(contents: &str) -> Result<Self, GroupCloneError> {
        let config: Self = serde_yaml::from_str(contents)
            .map_err(|e| GroupCloneError::new(GroupCloneErrorKind::Config).with_source(e))?;
        if config.per_page == 0 {
            return Err(GroupCloneError::new(GroupCloneErrorKind::Config)
                .with_text("per_page must be at least 1"));
        }
        Ok(config)
    }
}

impl fmt::Debug for GroupCloneConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupCloneConfig")
            .field("gitlab_url", &self.gitlab_url)
            .field("group_id", &self.group_id)
            .field("token", &"***")
            .field("clone_dir", &self.clone_dir)
            .field("per_page", &self.per_page)
            .finish()
    }
}

/// A group id as written in YAML: `42` or `"parent/child"`
#[derive(Deserialize)]
#[serde(untagged)]
enum RawGroupId {
    /// Numeric group id
    Numeric(u64),
    /// Group id or path given as a string
    Text(String),
}

/// Accept both integer and string group ids
fn deserialize_group_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawGroupId::deserialize(deserializer)? {
        RawGroupId::Numeric(id) => id.to_string(),
        RawGroupId::Text(path) => path,
    })
}
