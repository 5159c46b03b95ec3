//! Response shapes for the REST endpoints the report reads

use serde::Deserialize;

/// `GET user`
#[derive(Debug, Deserialize)]
pub(crate) struct User {
    pub login: String,
}

/// `GET repos/{owner}/{repo}/commits/{sha}`
#[derive(Debug, Deserialize)]
pub(crate) struct Commit {
    pub commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitDetail {
    pub message: String,
}

/// `GET repos/{owner}/{repo}`
#[derive(Debug, Deserialize)]
pub(crate) struct Repository {
    pub default_branch: String,
}
