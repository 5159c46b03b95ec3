//! The full report pipeline

use chrono::{DateTime, TimeZone};
use today_pr_core::{sort_pull_requests, Config, PullRequest, Result};
use tracing::info;

use crate::{fetch_events, lookup_pull_requests, resolve_branches, FetchOptions, RestClient};

/// Fetch events, resolve branches, look up their pull requests and sort them
/// oldest first. Every request is awaited before the next one is sent.
pub async fn collect_pull_requests<C, Tz>(
    client: &C,
    now: &DateTime<Tz>,
    config: &Config,
) -> Result<Vec<PullRequest>>
where
    C: RestClient + ?Sized,
    Tz: TimeZone,
{
    let cutoff = config.window().cutoff(now);
    info!(%cutoff, lookback_days = config.lookback_days, "Collecting pull requests");

    let events = fetch_events(client, cutoff, FetchOptions::from(config)).await?;
    let branches = resolve_branches(client, events).await?;
    let mut pulls = lookup_pull_requests(client, &branches).await?;
    sort_pull_requests(&mut pulls);

    Ok(pulls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeClient;
    use chrono::{FixedOffset, Utc};
    use serde_json::{json, Value};

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2023-01-01T14:00:00+00:00").unwrap()
    }

    fn push(repo: &str, branch: &str, head: &str, created_at: &str) -> Value {
        json!({
            "id": head,
            "type": "PushEvent",
            "repo": { "name": repo },
            "created_at": created_at,
            "payload": { "ref": format!("refs/heads/{}", branch), "head": head },
        })
    }

    fn pull(title: &str, created_at: &str) -> Value {
        json!({
            "number": 1,
            "title": title,
            "html_url": format!("https://github.com/org/repo/pull/{}", title),
            "state": "open",
            "created_at": created_at,
        })
    }

    fn base_client(events: Value) -> FakeClient {
        FakeClient::new()
            .with("user", json!({"login": "octo"}))
            .with("users/octo/events?per_page=100&page=1", events)
            .with("repos/org/repo1", json!({"default_branch": "main"}))
    }

    #[tokio::test]
    async fn test_single_feature_push() {
        let client = base_client(json!([push("org/repo1", "feat-a", "c1", "2023-01-01T12:00:00Z")]))
            .with("repos/org/repo1/commits/c1", json!({"commit": {"message": "Work"}}))
            .with(
                "repos/org/repo1/pulls?state=all&head=org:feat-a",
                json!([pull("a", "2023-01-01T12:30:00Z")]),
            );

        let pulls = collect_pull_requests(&client, &now(), &Config::default())
            .await
            .unwrap();

        assert_eq!(pulls.len(), 1);
        assert_eq!(pulls[0].title, "a");
        assert_eq!(
            client.count("repos/org/repo1/pulls?state=all&head=org:feat-a"),
            1
        );
    }

    #[tokio::test]
    async fn test_repeated_branch_is_looked_up_once() {
        let client = base_client(json!([
            push("org/repo1", "feat-b", "c2", "2023-01-01T13:00:00Z"),
            push("org/repo1", "feat-b", "c1", "2023-01-01T12:00:00Z"),
        ]))
        .with("repos/org/repo1/commits/c1", json!({"commit": {"message": "One"}}))
        .with("repos/org/repo1/commits/c2", json!({"commit": {"message": "Two"}}))
        .with(
            "repos/org/repo1/pulls?state=all&head=org:feat-b",
            json!([pull("b", "2023-01-01T12:30:00Z")]),
        );

        let pulls = collect_pull_requests(&client, &now(), &Config::default())
            .await
            .unwrap();

        assert_eq!(pulls.len(), 1);
        assert_eq!(
            client.count("repos/org/repo1/pulls?state=all&head=org:feat-b"),
            1
        );
    }

    #[tokio::test]
    async fn test_results_sorted_by_creation() {
        let client = base_client(json!([
            push("org/repo1", "feat-c", "c1", "2023-01-01T12:00:00Z"),
        ]))
        .with("repos/org/repo1/commits/c1", json!({"commit": {"message": "Work"}}))
        .with(
            "repos/org/repo1/pulls?state=all&head=org:feat-c",
            json!([
                pull("late", "2023-01-01T09:30:00Z"),
                pull("early", "2023-01-01T09:00:00Z"),
            ]),
        );

        let pulls = collect_pull_requests(&client, &now(), &Config::default())
            .await
            .unwrap();

        let titles: Vec<&str> = pulls.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["early", "late"]);
    }

    #[tokio::test]
    async fn test_no_events_in_window() {
        let client = base_client(json!([
            push("org/repo1", "feat-d", "c1", "2022-12-31T23:00:00Z"),
        ]));

        let pulls = collect_pull_requests(&client, &now(), &Config::default())
            .await
            .unwrap();

        assert!(pulls.is_empty());
        assert_eq!(client.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_lookback_days_widens_window() {
        let client = base_client(json!([
            push("org/repo1", "feat-e", "c1", "2022-12-31T23:00:00Z"),
        ]))
        .with("repos/org/repo1/commits/c1", json!({"commit": {"message": "Work"}}))
        .with(
            "repos/org/repo1/pulls?state=all&head=org:feat-e",
            json!([pull("e", "2022-12-31T23:30:00Z")]),
        );
        let config = Config {
            lookback_days: 1,
            ..Config::default()
        };

        let pulls = collect_pull_requests(&client, &now().with_timezone(&Utc), &config)
            .await
            .unwrap();

        assert_eq!(pulls.len(), 1);
    }
}
