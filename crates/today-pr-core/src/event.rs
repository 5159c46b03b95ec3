//! Activity events from the user events feed
//!
//! Events arrive with an opaque `payload` whose shape depends on the event
//! type. The payload is only decoded on demand, and only into the variant that
//! matches the event kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const BRANCH_REF_PREFIX: &str = "refs/heads/";
const TAG_REF_PREFIX: &str = "refs/tags/";

/// Marker GitHub puts in the message of a pull request merge commit
pub const MERGE_COMMIT_MARKER: &str = "Merge pull request";

/// Event kinds the report cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Commits pushed to a ref
    Push,
    /// Branch, tag or repository created
    Create,
    /// Anything else in the feed
    Other,
}

impl EventKind {
    /// Map the API `type` field to a kind
    pub fn from_api(kind: &str) -> Self {
        match kind {
            "PushEvent" => EventKind::Push,
            "CreateEvent" => EventKind::Create,
            _ => EventKind::Other,
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Push => "push",
            EventKind::Create => "create",
            EventKind::Other => "other",
        }
    }
}

/// Repository reference embedded in an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRepo {
    /// Full name, `owner/repo`
    pub name: String,
}

/// A single entry of `users/{login}/events`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    #[serde(default)]
    pub id: String,
    /// Raw API event type, e.g. `PushEvent`
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: EventRepo,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl ActivityEvent {
    pub fn event_kind(&self) -> EventKind {
        EventKind::from_api(&self.kind)
    }

    /// Whether the event can name a branch at all
    pub fn is_branch_activity(&self) -> bool {
        self.event_kind() != EventKind::Other
    }

    pub fn repository_full_name(&self) -> &str {
        &self.repo.name
    }

    /// Decode the payload for this event's kind.
    ///
    /// Returns `Ok(None)` for kinds without a known payload shape.
    pub fn decode_payload(&self) -> Result<Option<EventPayload>> {
        let payload = match self.event_kind() {
            EventKind::Push => {
                EventPayload::Push(serde_json::from_value(self.payload.clone())?)
            }
            EventKind::Create => {
                EventPayload::Create(serde_json::from_value(self.payload.clone())?)
            }
            EventKind::Other => return Ok(None),
        };
        Ok(Some(payload))
    }
}

/// Kind-specific event payload
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    Push(PushPayload),
    Create(CreatePayload),
}

/// Payload of a `PushEvent`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushPayload {
    /// Full ref, e.g. `refs/heads/feature/x`
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// SHA of the most recent commit after the push
    pub head: String,
}

impl PushPayload {
    /// Branch the push went to.
    ///
    /// Tag pushes yield `Ok(None)`. Any ref outside `refs/heads/` and
    /// `refs/tags/` is rejected.
    pub fn branch(&self) -> Result<Option<&str>> {
        if let Some(branch) = self.git_ref.strip_prefix(BRANCH_REF_PREFIX) {
            if branch.is_empty() {
                return Err(Error::MalformedRef(self.git_ref.clone()));
            }
            return Ok(Some(branch));
        }
        if self.git_ref.starts_with(TAG_REF_PREFIX) {
            return Ok(None);
        }
        Err(Error::MalformedRef(self.git_ref.clone()))
    }
}

/// Payload of a `CreateEvent`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePayload {
    /// Bare branch or tag name; null when a repository was created
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    /// `branch`, `tag` or `repository`
    pub ref_type: String,
    /// Default branch of the repository when the ref was created
    #[serde(default)]
    pub master_branch: Option<String>,
}

impl CreatePayload {
    /// Created branch name, if a branch was created
    pub fn branch(&self) -> Option<&str> {
        if self.ref_type != "branch" {
            return None;
        }
        self.git_ref.as_deref()
    }

    /// Whether the created ref is the repository's default branch
    pub fn is_default_branch(&self) -> bool {
        match (self.git_ref.as_deref(), self.master_branch.as_deref()) {
            (Some(git_ref), Some(master)) => git_ref == master,
            _ => false,
        }
    }
}

/// Split a repository full name into `(owner, repo)`
pub fn split_full_name(full_name: &str) -> Result<(&str, &str)> {
    let parts: Vec<&str> = full_name.split('/').collect();
    match parts.as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok((*owner, *repo)),
        _ => Err(Error::MalformedRepoName(full_name.to_string())),
    }
}
