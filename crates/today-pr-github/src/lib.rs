//! Today PR GitHub - GitHub API integration
//!
//! This crate provides the network side of the report:
//! - The `RestClient` seam with HTTP and `gh` CLI backends
//! - Event fetching, branch resolution and pull request lookup
//! - `collect_pull_requests`, which runs the stages in order

mod api;
pub mod client;
pub mod fetcher;
pub mod gh_cli;
pub mod lookup;
pub mod report;
pub mod resolver;

#[cfg(test)]
mod fake;

pub use client::{get_json, HttpClient, HttpClientConfig, RestClient};
pub use fetcher::{fetch_events, FetchOptions};
pub use gh_cli::GhCliClient;
pub use lookup::{head_query_path, lookup_pull_requests};
pub use report::collect_pull_requests;
pub use resolver::{resolve_branches, BranchMap};
