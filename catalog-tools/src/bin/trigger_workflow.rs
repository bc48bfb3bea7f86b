use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use phishing_catalog::trigger::{DEFAULT_API_VERSION, DEFAULT_REF};
use phishing_catalog::{trigger_capture, TriggerConfig};

/// Ask the capture workflow to archive a page
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Page to capture
    url: String,

    /// Slug for the capture directory
    output_filename: String,

    /// Workflow dispatch URL
    #[arg(long, env = "CATALOG_DISPATCH_URL")]
    endpoint: String,

    /// API token sent as a bearer token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Git ref the workflow runs on
    #[arg(long = "ref", default_value = DEFAULT_REF)]
    git_ref: String,

    #[arg(long, default_value = DEFAULT_API_VERSION)]
    api_version: String,

    /// Request timeout in seconds (waits indefinitely when unset)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = TriggerConfig::new(cli.endpoint, cli.token)
        .with_ref(cli.git_ref)
        .with_timeout(cli.timeout_secs.map(Duration::from_secs));
    config.api_version = cli.api_version;

    let status = trigger_capture(&config, &cli.url, &cli.output_filename)
        .context("Failed to dispatch capture workflow")?;

    println!("Status: {}", status.as_u16());
    if !status.is_success() {
        warn!("Workflow dispatch was not accepted: {}", status);
    }

    Ok(())
}
