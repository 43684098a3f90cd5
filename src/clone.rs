//! Clone a list of projects, one after the other
use std::path::{Path, PathBuf};

use crate::errors::GroupCloneError;
use crate::git::{AuthenticatedUrl, GitClient};
use crate::utils::Project;

/// Outcome of [`clone_all`]
#[derive(Debug, Default)]
pub struct CloneReport {
    /// Names of the cloned projects
    pub cloned: Vec<String>,

    /// Names of the projects that failed, with the reason
    pub failed: Vec<(String, GroupCloneError)>,
}

impl CloneReport {
    /// Number of processed projects
    pub fn total(&self) -> usize {
        self.cloned.len() + self.failed.len()
    }
}

/// Clone every project under `clone_dir`, in order
///
/// A failing project is logged and recorded, the next one is still cloned.
pub async fn clone_all(
    projects: &[Project],
    clone_dir: &Path,
    token: &str,
    git: &dyn GitClient,
) -> CloneReport {
    let mut report = CloneReport::default();
    let total = projects.len();
    for (idx, project) in projects.iter().enumerate() {
        log::info!(
            "[{}/{}] Cloning {} into {}...",
            idx + 1,
            total,
            project.name,
            project.destination(clone_dir).display()
        );
        match clone_one(project, clone_dir, token, git).await {
            Ok(path) => {
                log::debug!("Cloned {} into {}", project.name, path.display());
                report.cloned.push(project.name.clone());
            }
            Err(e) => {
                log::error!("Failed to clone {}: {e}", project.name);
                report.failed.push((project.name.clone(), e));
            }
        }
    }
    report
}

/// Clone a single project, creating its parent directories first
async fn clone_one(
    project: &Project,
    clone_dir: &Path,
    token: &str,
    git: &dyn GitClient,
) -> Result<PathBuf, GroupCloneError> {
    let destination = project.destination(clone_dir);
    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let url = AuthenticatedUrl::new(&project.http_url_to_repo, token)?;
    log::debug!("git clone {url} {}", destination.display());
    git.clone_repo(&url, &destination).await?;
    Ok(destination)
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::errors::GroupCloneErrorKind;
    use std::{future::Future, pin::Pin, sync::Mutex};

    /// Records every clone, failing for URLs containing `broken`
    #[derive(Default)]
    pub(crate) struct FakeGit {
        pub(crate) calls: Mutex<Vec<(String, PathBuf)>>,
    }

    impl FakeGit {
        pub(crate) fn calls(&self) -> Vec<(String, PathBuf)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl GitClient for FakeGit {
        fn clone_repo<'a>(
            &'a self,
            url: &'a AuthenticatedUrl,
            destination: &'a Path,
        ) -> Pin<Box<dyn Future<Output = Result<(), GroupCloneError>> + Send + 'a>> {
            Box::pin(async move {
                self.calls
                    .lock()
                    .unwrap()
                    .push((url.expose().to_string(), destination.to_path_buf()));
                if url.expose().contains("broken") {
                    return Err(GroupCloneError::new(GroupCloneErrorKind::Clone)
                        .with_text("exit status: 128"));
                }
                Ok(())
            })
        }
    }

    fn project(path_with_namespace: &str, url: &str) -> Project {
        Project {
            name: path_with_namespace.rsplit('/').next().unwrap().to_string(),
            path_with_namespace: path_with_namespace.to_string(),
            http_url_to_repo: url.to_string(),
        }
    }

    #[tokio::test]
    async fn clones_into_namespace_tree() {
        let dir = tempfile::tempdir().unwrap();
        let projects = vec![
            project("group/app", "https://gitlab.example.com/group/app.git"),
            project("group/sub/lib", "https://gitlab.example.com/group/sub/lib.git"),
        ];
        let git = FakeGit::default();

        let report = clone_all(&projects, dir.path(), "abc123", &git).await;

        assert_eq!(report.cloned, vec!["app", "lib"]);
        assert!(report.failed.is_empty());
        assert_eq!(
            git.calls(),
            vec![
                (
                    "https://abc123@gitlab.example.com/group/app.git".to_string(),
                    dir.path().join("group/app")
                ),
                (
                    "https://abc123@gitlab.example.com/group/sub/lib.git".to_string(),
                    dir.path().join("group/sub/lib")
                ),
            ]
        );
        assert!(dir.path().join("group/sub").is_dir());
    }

    #[tokio::test]
    async fn failure_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let projects = vec![
            project("group/first", "https://gitlab.example.com/group/first.git"),
            project("group/broken", "https://gitlab.example.com/group/broken.git"),
            project("group/last", "https://gitlab.example.com/group/last.git"),
        ];
        let git = FakeGit::default();

        let report = clone_all(&projects, dir.path(), "abc123", &git).await;

        assert_eq!(git.calls().len(), 3);
        assert_eq!(report.cloned, vec!["first", "last"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "broken");
        assert_eq!(report.failed[0].1.kind(), &GroupCloneErrorKind::Clone);
        assert_eq!(report.total(), 3);
    }

    #[tokio::test]
    async fn invalid_url_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let projects = vec![
            project("group/ssh", "git@gitlab.example.com:group/ssh.git"),
            project("group/ok", "https://gitlab.example.com/group/ok.git"),
        ];
        let git = FakeGit::default();

        let report = clone_all(&projects, dir.path(), "abc123", &git).await;

        assert_eq!(git.calls().len(), 1);
        assert_eq!(report.cloned, vec!["ok"]);
        assert_eq!(report.failed[0].1.kind(), &GroupCloneErrorKind::InvalidUrl);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unwritable_parent_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("group"), b"not a directory").unwrap();
        let projects = vec![
            project("group/app", "https://gitlab.example.com/group/app.git"),
            project("other/app", "https://gitlab.example.com/other/app.git"),
        ];
        let git = FakeGit::default();

        let report = clone_all(&projects, dir.path(), "abc123", &git).await;

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].1.kind(), &GroupCloneErrorKind::Io);
        assert_eq!(report.cloned, vec!["app"]);
    }
}
