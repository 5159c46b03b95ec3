//! Report rendering

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{PullRequest, Result};

/// How each pull request is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Title followed by the URL
    #[default]
    Full,
    /// URL only, one per line
    UrlOnly,
    /// JSON array, no header
    Json,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Full => "full",
            DisplayMode::UrlOnly => "url_only",
            DisplayMode::Json => "json",
        }
    }
}

/// Write the report for `date`. Pull requests are printed in the given order.
pub fn render<W: Write>(
    out: &mut W,
    date: NaiveDate,
    pulls: &[PullRequest],
    mode: DisplayMode,
) -> Result<()> {
    if mode == DisplayMode::Json {
        serde_json::to_writer_pretty(&mut *out, pulls)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "[{}/{}/{}]", date.year(), date.month(), date.day())?;

    if pulls.is_empty() {
        writeln!(out, "No Pull Requests")?;
        return Ok(());
    }

    for pr in pulls {
        match mode {
            DisplayMode::UrlOnly => writeln!(out, "{}", pr.html_url)?,
            _ => writeln!(out, "{}\n |- {}\n", pr.title, pr.html_url)?,
        }
    }

    Ok(())
}
