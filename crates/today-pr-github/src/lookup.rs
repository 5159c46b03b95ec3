//! Pull request lookup by head branch

use today_pr_core::{split_full_name, PullRequest, Result};
use tracing::{debug, info};

use crate::{get_json, BranchMap, RestClient};

/// Path listing pull requests in any state whose head is `owner:branch`.
///
/// The branch is percent-encoded: git allows `#`, `&`, `+` and `%` in branch
/// names, and each of them would otherwise change the query.
pub fn head_query_path(full_name: &str, branch: &str) -> Result<String> {
    let (owner, repo) = split_full_name(full_name)?;
    Ok(format!(
        "repos/{}/{}/pulls?state=all&head={}:{}",
        owner,
        repo,
        owner,
        urlencoding::encode(branch)
    ))
}

/// Pull requests for every resolved branch, concatenated in map order
pub async fn lookup_pull_requests<C: RestClient + ?Sized>(
    client: &C,
    branches: &BranchMap,
) -> Result<Vec<PullRequest>> {
    let mut pulls = Vec::new();

    for (branch, event) in branches {
        let path = head_query_path(event.repository_full_name(), branch)?;
        let found: Vec<PullRequest> = get_json(client, &path).await?;
        debug!(%branch, repo = %event.repo.name, count = found.len(), "Looked up pull requests");
        pulls.extend(found);
    }

    info!(count = pulls.len(), "Found pull requests");
    Ok(pulls)
}
