//! gh-today-pr CLI

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use today_pr_core::{render, Config, DisplayMode};
use today_pr_github::{
    collect_pull_requests, GhCliClient, HttpClient, HttpClientConfig, RestClient,
};
use tracing::{debug, warn, Level};
use tracing_subscriber::EnvFilter;

/// Initialize logging with the specified verbosity level.
///
/// Logs go to stderr; stdout only carries the report.
fn init_logging(verbose: u8, quiet: bool, json: bool) -> Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["gh_today_pr", "today_pr_core", "today_pr_github"] {
        filter = filter.add_directive(format!("{}={}", target, level).parse()?);
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2) // Show module path at debug+
        .with_file(verbose >= 3) // Show file:line at trace
        .with_line_number(verbose >= 3);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "gh-today-pr")]
#[command(about = "List the pull requests you pushed to or opened today")]
#[command(version)]
struct Cli {
    /// Print only pull request URLs
    #[arg(long, conflicts_with = "json")]
    no_title: bool,

    /// Print pull requests as JSON
    #[arg(long)]
    json: bool,

    /// Also include this many calendar days before today
    #[arg(short, long, env = "GH_TODAY_PR_DAYS")]
    days: Option<u32>,

    /// GitHub token (falls back to GITHUB_TOKEN); without one the gh CLI is used
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Config file path
    #[arg(long, env = "GH_TODAY_PR_CONFIG")]
    config: Option<String>,

    /// Increase verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error logs)
    #[arg(short, long)]
    quiet: bool,

    /// Output logs as JSON (for machine parsing)
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    /// Config file values with flags and environment applied on top
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(days) = self.days {
            config.lookback_days = days;
        }
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if self.json {
            config.display = DisplayMode::Json;
        } else if self.no_title {
            config.display = DisplayMode::UrlOnly;
        }

        config.validate()?;
        debug!(
            display = config.display.as_str(),
            lookback_days = config.lookback_days,
            api_url = %config.api_url,
            "Resolved configuration"
        );
        Ok(config)
    }

    fn resolve_token(&self) -> Option<String> {
        pick_token(self.token.clone(), std::env::var("GITHUB_TOKEN").ok())
    }
}

/// First non-blank of the explicit token and the `GITHUB_TOKEN` fallback
fn pick_token(explicit: Option<String>, fallback: Option<String>) -> Option<String> {
    let usable = |t: &String| !t.trim().is_empty();
    explicit.filter(usable).or_else(|| fallback.filter(usable))
}

fn build_client(token: Option<String>, config: &Config) -> Result<Box<dyn RestClient>> {
    match token {
        Some(token) => {
            debug!(api_url = %config.api_url, "Using HTTP client");
            Ok(Box::new(HttpClient::new(
                token,
                HttpClientConfig::from(config),
            )?))
        }
        None => {
            let client = GhCliClient::for_api_url(&config.api_url)?;
            debug!(api_url = %config.api_url, "No token configured, using gh CLI");
            if config.timeout_secs != Config::default().timeout_secs {
                warn!(
                    timeout_secs = config.timeout_secs,
                    "timeout_secs only applies to the HTTP client; gh uses its own timeouts"
                );
            }
            Ok(Box::new(client))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with CLI options
    init_logging(cli.verbose, cli.quiet, cli.log_json)?;

    let config = cli.resolve_config()?;
    let client = build_client(cli.resolve_token(), &config)?;

    let now = Local::now();
    let pulls = collect_pull_requests(client.as_ref(), &now, &config).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(&mut out, now.date_naive(), &pulls, config.display)?;

    Ok(())
}
