use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use phishing_catalog::{CatalogRepository, JsonFileRepository, NewCapture};

/// Add a captured page to the catalog index
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog index JSON file to update in place
    index_path: PathBuf,

    /// Year the page was captured
    year: i64,

    /// Source URL of the phishing page
    url: String,

    /// Hostname the page was served from
    domain: String,

    /// Slug of the capture directory
    filename: String,

    /// ISO-8601 capture timestamp
    timestamp: String,
}

impl Cli {
    fn capture(&self) -> NewCapture {
        NewCapture {
            year: self.year,
            url: self.url.clone(),
            domain: self.domain.clone(),
            filename: self.filename.clone(),
            captured_at: self.timestamp.clone(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut repo = JsonFileRepository::new(&cli.index_path);
    let entries = repo
        .append(cli.capture())
        .with_context(|| format!("Failed to update {}", cli.index_path.display()))?;

    println!(
        "Added entry for {} to {} ({} entries)",
        cli.domain,
        cli.index_path.display(),
        entries.len()
    );

    Ok(())
}
