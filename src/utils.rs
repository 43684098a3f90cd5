//! Utility functions
use std::path::{Path, PathBuf};

use crate::clone::{clone_all, CloneReport};
use crate::config::GroupCloneConfig;
use crate::errors::GroupCloneError;
use crate::git::{GitClient, GitCommand};
use crate::gitlab::platform::GitlabPlatform;

/// Project to clone
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct Project {
    /// Name of the project
    pub name: String,

    /// Path including every parent group (`group/sub/repo`)
    pub path_with_namespace: String,

    /// HTTP(S) clone URL, without credentials
    pub http_url_to_repo: String,
}

impl Project {
    /// Where the project is cloned under `clone_dir`
    pub fn destination(&self, clone_dir: &Path) -> PathBuf {
        clone_dir.join(&self.path_with_namespace)
    }
}

/// Discover the projects of the configured group and clone them with git
/// # Errors
/// Error if the discovery fails, clone failures only show in the report
pub async fn main_clone(config: &GroupCloneConfig) -> Result<CloneReport, GroupCloneError> {
    main_clone_with(config, &GitCommand::default()).await
}

/// [`main_clone`] with a chosen git client
pub(crate) async fn main_clone_with(
    config: &GroupCloneConfig,
    git: &dyn GitClient,
) -> Result<CloneReport, GroupCloneError> {
    let platform = GitlabPlatform::from_config(config);
    log::info!("Fetching all projects...");
    let projects = platform.list_all_projects(&config.group_id).await?;
    log::info!("Found {} projects.", projects.len());

    let report = clone_all(&projects, &config.clone_dir, &config.token, git).await;
    if report.failed.is_empty() {
        log::info!("All projects cloned successfully.");
    } else {
        log::warn!(
            "Cloned {} of {} projects, failed:",
            report.cloned.len(),
            report.total()
        );
        for (name, e) in &report.failed {
            log::warn!("- {name}: {e}");
        }
    }
    Ok(report)
}
