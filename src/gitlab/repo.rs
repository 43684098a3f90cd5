//! Gitlab API objects
use crate::utils::Project;
use serde::Deserialize;

/// Gitlab project, as listed by `/groups/:id/projects`
#[derive(Deserialize, Default, Debug, Clone)]
pub struct GitlabProject {
    /// Project name
    pub name: String,

    /// Full path, including every parent group
    pub path_with_namespace: String,

    /// HTTP(S) clone URL, without credentials
    pub http_url_to_repo: String,
}

/// Gitlab subgroup, as listed by `/groups/:id/subgroups`
#[derive(Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct GitlabSubgroup {
    /// Group id
    pub id: u64,

    /// Path segment of the group
    pub path: String,
}

impl From<GitlabProject> for Project {
    fn from(project: GitlabProject) -> Self {
        Project {
            name: project.name,
            path_with_namespace: project.path_with_namespace,
            http_url_to_repo: project.http_url_to_repo,
        }
    }
}
