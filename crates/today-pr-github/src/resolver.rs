//! Branch resolution
//!
//! Turns activity events into the set of branches the user worked on.
//! Pushes to the default branch and pull request merges are dropped, as are
//! tags and newly created repositories.

use std::collections::BTreeMap;
use today_pr_core::{event::MERGE_COMMIT_MARKER, ActivityEvent, EventPayload, PushPayload, Result};
use tracing::{debug, info};

use crate::{
    api::{Commit, Repository},
    get_json, RestClient,
};

/// Branch name -> the event that produced it. Later inserts overwrite earlier ones.
pub type BranchMap = BTreeMap<String, ActivityEvent>;

/// Map events to the branches they touched
pub async fn resolve_branches<C: RestClient + ?Sized>(
    client: &C,
    events: Vec<ActivityEvent>,
) -> Result<BranchMap> {
    let mut branches = BranchMap::new();

    for event in events {
        let branch = match event.decode_payload()? {
            Some(EventPayload::Push(payload)) => push_branch(client, &event, &payload).await?,
            Some(EventPayload::Create(payload)) => {
                if payload.is_default_branch() {
                    debug!(repo = %event.repo.name, "Skipping default branch creation");
                    None
                } else {
                    payload.branch().map(str::to_string)
                }
            }
            None => None,
        };

        if let Some(branch) = branch {
            debug!(%branch, repo = %event.repo.name, kind = event.event_kind().as_str(), "Resolved branch");
            branches.insert(branch, event);
        }
    }

    info!(count = branches.len(), "Resolved branches");
    Ok(branches)
}

/// Branch of a push, unless it was a tag, a merge or the default branch
async fn push_branch<C: RestClient + ?Sized>(
    client: &C,
    event: &ActivityEvent,
    payload: &PushPayload,
) -> Result<Option<String>> {
    let Some(branch) = payload.branch()? else {
        debug!(git_ref = %payload.git_ref, "Skipping tag push");
        return Ok(None);
    };
    let repo = event.repository_full_name();

    let commit: Commit = get_json(client, &format!("repos/{}/commits/{}", repo, payload.head)).await?;
    if commit.commit.message.contains(MERGE_COMMIT_MARKER) {
        debug!(%repo, %branch, head = %payload.head, "Skipping merge commit");
        return Ok(None);
    }

    let repository: Repository = get_json(client, &format!("repos/{}", repo)).await?;
    if branch == repository.default_branch {
        debug!(%repo, %branch, "Skipping push to default branch");
        return Ok(None);
    }

    Ok(Some(branch.to_string()))
}
