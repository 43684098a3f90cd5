//! Error handling for the gitlab-group-clone crate.
use std::{error::Error as StdError, fmt};

/// Error type for the gitlab-group-clone crate.
#[derive(Debug)]
pub struct GroupCloneError {
    /// Inner error.
    inner: Box<Inner>,
}

impl GroupCloneError {
    /// Create a new error.
    pub(crate) fn new(kind: GroupCloneErrorKind) -> Self {
        Self {
            inner: Box::new(Inner { kind, source: None }),
        }
    }

    /// Attach a text message as the source.
    pub(crate) fn with_text(mut self, text: &str) -> Self {
        self.inner.source = Some(Box::new(std::io::Error::other(text)));
        self
    }

    /// Attach an underlying error as the source.
    pub(crate) fn with_source<E: Into<BoxError>>(mut self, source: E) -> Self {
        self.inner.source = Some(source.into());
        self
    }

    /// Kind of the error
    pub fn kind(&self) -> &GroupCloneErrorKind {
        &self.inner.kind
    }
}

/// Type alias for a boxed error.
pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Inner error type for the gitlab-group-clone crate.
#[derive(Debug)]
struct Inner {
    /// Error kind.
    kind: GroupCloneErrorKind,

    /// Source error.
    source: Option<BoxError>,
}

/// Category of a [`GroupCloneError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupCloneErrorKind {
    /// Configuration file missing or malformed.
    Config,

    /// Error related to the reqwest crate.
    Reqwest,

    /// Error related to serde.
    Serde,

    /// Filesystem error.
    Io,

    /// Listing the projects of a group failed.
    GetProjects,

    /// Listing the subgroups of a group failed.
    GetSubgroups,

    /// Group nesting deeper than GitLab allows.
    GroupDepth,

    /// Clone URL that can't carry a token.
    InvalidUrl,

    /// The git client failed.
    Clone,
}

impl fmt::Display for GroupCloneErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GroupCloneErrorKind::Config => "configuration error",
            GroupCloneErrorKind::Reqwest => "http error",
            GroupCloneErrorKind::Serde => "unable to parse response",
            GroupCloneErrorKind::Io => "filesystem error",
            GroupCloneErrorKind::GetProjects => "unable to list group projects",
            GroupCloneErrorKind::GetSubgroups => "unable to list subgroups",
            GroupCloneErrorKind::GroupDepth => "group nesting too deep",
            GroupCloneErrorKind::InvalidUrl => "invalid clone url",
            GroupCloneErrorKind::Clone => "git clone failed",
        };
        f.write_str(text)
    }
}

impl fmt::Display for GroupCloneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.source {
            Some(source) => write!(f, "{}: {}", self.inner.kind, source),
            None => write!(f, "{}", self.inner.kind),
        }
    }
}

impl StdError for GroupCloneError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| &**e as _)
    }
}

impl From<reqwest::Error> for GroupCloneError {
    fn from(e: reqwest::Error) -> Self {
        GroupCloneError::new(GroupCloneErrorKind::Reqwest).with_source(e)
    }
}

impl From<serde_json::Error> for GroupCloneError {
    fn from(e: serde_json::Error) -> Self {
        GroupCloneError::new(GroupCloneErrorKind::Serde).with_source(e)
    }
}

impl From<std::io::Error> for GroupCloneError {
    fn from(e: std::io::Error) -> Self {
        GroupCloneError::new(GroupCloneErrorKind::Io).with_source(e)
    }
}
