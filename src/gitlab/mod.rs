//! GitLab API module.
pub(crate) mod platform;
pub(crate) mod repo;

/// Header carrying the access token
const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Prefix of every REST endpoint
const API_PREFIX: &str = "api/v4";

/// GitLab refuses to nest groups deeper than this
const MAX_GROUP_DEPTH: usize = 20;

/// Page size of the single subgroup request, GitLab's maximum
const SUBGROUP_PAGE_SIZE: u32 = 100;
