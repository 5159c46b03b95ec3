//! Today PR Core - Domain types for the daily pull request report
//!
//! This crate provides the pieces that do not talk to the network:
//! - Activity events and their kind-specific payloads
//! - The lookback window policy
//! - Pull request sorting and rendering
//! - Configuration

pub mod config;
pub mod error;
pub mod event;
pub mod present;
pub mod pr;
pub mod window;

pub use config::Config;
pub use error::{Error, Result};
pub use event::{
    split_full_name, ActivityEvent, CreatePayload, EventKind, EventPayload, EventRepo,
    PushPayload,
};
pub use present::{render, DisplayMode};
pub use pr::{sort_pull_requests, PullRequest};
pub use window::LookbackWindow;
