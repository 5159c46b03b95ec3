//! Event fetching
//!
//! Walks `users/{login}/events` newest first and stops as soon as an event
//! predates the cutoff. The API returns events in descending time order, so
//! nothing past that point can be inside the window.

use chrono::{DateTime, Utc};
use today_pr_core::{ActivityEvent, Config, Result};
use tracing::{debug, info};

use crate::{api::User, get_json, RestClient};

/// Paging limits for the events feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub page_size: u32,
    pub max_pages: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for FetchOptions {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            max_pages: config.max_pages,
        }
    }
}

/// Login of the authenticated user
pub async fn fetch_login<C: RestClient + ?Sized>(client: &C) -> Result<String> {
    let user: User = get_json(client, "user").await?;
    Ok(user.login)
}

/// Push and create events of the authenticated user created at or after `cutoff`
pub async fn fetch_events<C: RestClient + ?Sized>(
    client: &C,
    cutoff: DateTime<Utc>,
    options: FetchOptions,
) -> Result<Vec<ActivityEvent>> {
    let login = fetch_login(client).await?;
    info!(%login, %cutoff, "Fetching activity events");

    let mut events = Vec::new();

    for page in 1..=options.max_pages {
        let path = format!(
            "users/{}/events?per_page={}&page={}",
            login, options.page_size, page
        );
        let batch: Vec<ActivityEvent> = get_json(client, &path).await?;
        let received = batch.len();
        debug!(page, received, "Fetched events page");

        for event in batch {
            if event.created_at < cutoff {
                debug!(created_at = %event.created_at, "Reached lookback cutoff");
                info!(count = events.len(), "Collected activity events");
                return Ok(events);
            }
            if event.is_branch_activity() {
                events.push(event);
            }
        }

        if received < options.page_size as usize {
            break;
        }
    }

    info!(count = events.len(), "Collected activity events");
    Ok(events)
}
