//! Gitlab Platform
use super::repo::{GitlabProject, GitlabSubgroup};
use super::{API_PREFIX, MAX_GROUP_DEPTH, PRIVATE_TOKEN_HEADER, SUBGROUP_PAGE_SIZE};
use crate::config::GroupCloneConfig;
use crate::errors::{GroupCloneError, GroupCloneErrorKind};
use crate::utils::Project;
use std::{fmt, future::Future, pin::Pin};

use reqwest::header::ACCEPT;
use urlencoding::encode;

/// Read-only client for the group listing endpoints
#[derive(Clone)]
pub struct GitlabPlatform {
    /// Base URL, without trailing slash
    base_url: String,

    /// Gitlab token
    token: String,

    /// Page size of the project listing
    per_page: u32,

    /// Reqwest client
    client: reqwest::Client,
}

/// Boxed future returned by the recursive group walk
type ProjectsFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<Project>, GroupCloneError>> + Send + 'a>>;

impl GitlabPlatform {
    /// Create a new GitlabPlatform
    pub fn new(base_url: &str, token: String, per_page: u32) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            per_page,
            client: reqwest::Client::new(),
        }
    }

    /// Create a GitlabPlatform from the loaded configuration
    pub fn from_config(config: &GroupCloneConfig) -> Self {
        Self::new(&config.gitlab_url, config.token.clone(), config.per_page)
    }

    /// URL of a group endpoint (`projects`, `subgroups`)
    fn group_url(&self, group_id: &str, endpoint: &str) -> String {
        format!(
            "{}/{API_PREFIX}/groups/{}/{endpoint}",
            self.base_url,
            encode(group_id)
        )
    }

    /// GET a URL with the token header, returning the body of a 2xx response
    async fn send_request(
        &self,
        url: &str,
        query: &[(&str, String)],
        kind: GroupCloneErrorKind,
    ) -> Result<String, GroupCloneError> {
        let request = self
            .client
            .get(url)
            .header(PRIVATE_TOKEN_HEADER, &self.token)
            .header(ACCEPT, "application/json")
            .query(query)
            .send();

        let response = request.await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(
                GroupCloneError::new(kind).with_text(&format!("{status} from {url}: {text}"))
            );
        }
        Ok(response.text().await?)
    }

    /// List the direct projects of a group, page after page until an empty one
    /// # Errors
    /// Error on the first failing page, earlier pages are discarded
    pub async fn get_projects(&self, group_id: &str) -> Result<Vec<Project>, GroupCloneError> {
        let url = self.group_url(group_id, "projects");
        let mut page: usize = 1;
        let mut all_projects = vec![];
        loop {
            let query = [
                ("per_page", self.per_page.to_string()),
                ("page", page.to_string()),
            ];
            let text = self
                .send_request(&url, &query, GroupCloneErrorKind::GetProjects)
                .await?;
            let projects: Vec<GitlabProject> = serde_json::from_str(&text)?;
            log::debug!(
                "Requested group {group_id} (page {page}): {} projects",
                projects.len()
            );
            if projects.is_empty() {
                break;
            }
            all_projects.extend(projects.into_iter().map(Project::from));
            page += 1;
        }
        Ok(all_projects)
    }

    /// List the direct subgroups of a group, in a single request
    /// # Errors
    /// Error if the request fails or the response doesn't parse
    pub async fn get_subgroups(
        &self,
        group_id: &str,
    ) -> Result<Vec<GitlabSubgroup>, GroupCloneError> {
        let url = self.group_url(group_id, "subgroups");
        let query = [("per_page", SUBGROUP_PAGE_SIZE.to_string())];
        let text = self
            .send_request(&url, &query, GroupCloneErrorKind::GetSubgroups)
            .await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// List every project of a group and of its subgroups, depth first
    ///
    /// The direct projects of a group come before those of its subgroups,
    /// subgroups are visited in listing order.
    /// # Errors
    /// Error on any failing request, no partial list is returned
    pub async fn list_all_projects(&self, group_id: &str) -> Result<Vec<Project>, GroupCloneError> {
        self.walk_group(group_id.to_string(), 0).await
    }

    /// Recursive step of [`GitlabPlatform::list_all_projects`]
    fn walk_group(&self, group_id: String, depth: usize) -> ProjectsFuture<'_> {
        Box::pin(async move {
            if depth > MAX_GROUP_DEPTH {
                return Err(GroupCloneError::new(GroupCloneErrorKind::GroupDepth)
                    .with_text(&format!("group {group_id} is nested {depth} levels deep")));
            }
            let mut projects = self.get_projects(&group_id).await?;
            let subgroups = self.get_subgroups(&group_id).await?;
            for subgroup in subgroups {
                log::debug!("Entering subgroup {} ({})", subgroup.path, subgroup.id);
                let sub_projects = self.walk_group(subgroup.id.to_string(), depth + 1).await?;
                projects.extend(sub_projects);
            }
            Ok(projects)
        })
    }
}

impl fmt::Debug for GitlabPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitlabPlatform")
            .field("base_url", &self.base_url)
            .field("per_page", &self.per_page)
            .finish_non_exhaustive()
    }
}
