use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions};
use phishing_catalog::screenshot::{ensure_scheme, CHROME_FLAGS, NAVIGATION_TIMEOUT, VIEWPORT};

/// Save a PNG screenshot of a page using headless Chromium
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Page to capture; `https://` is assumed when no scheme is given
    url: String,

    /// PNG file to write
    output: PathBuf,

    /// Chromium executable (auto-detected when unset)
    #[arg(long, env = "CHROME_PATH")]
    chrome_path: Option<PathBuf>,

    /// Navigation timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let url = ensure_scheme(&cli.url);
    if url != cli.url.as_str() {
        println!("Protocol not found, using: {}", url);
    }

    println!("Taking screenshot of: {}", url);
    println!("Output: {}", cli.output.display());

    let options = LaunchOptions::default_builder()
        .headless(true)
        .sandbox(false)
        .window_size(Some(VIEWPORT))
        .path(cli.chrome_path.clone())
        .args(CHROME_FLAGS.iter().map(OsStr::new).collect())
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid browser options: {}", e))?;

    let browser = Browser::new(options).context("Failed to launch browser")?;
    let tab = browser.new_tab().context("Failed to open browser tab")?;
    tab.set_default_timeout(
        cli.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(NAVIGATION_TIMEOUT),
    );

    tab.navigate_to(&url)
        .with_context(|| format!("Failed to navigate to {}", url))?;
    tab.wait_until_navigated()
        .with_context(|| format!("Page did not finish loading: {}", url))?;

    let png = tab
        .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
        .context("Failed to capture screenshot")?;
    fs::write(&cli.output, png)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    println!("Screenshot saved to: {}", cli.output.display());
    Ok(())
}
