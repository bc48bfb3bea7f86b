use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use phishing_catalog::{write_page, CatalogPage, CatalogRepository, JsonFileRepository};

/// Render the catalog index into a static HTML listing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog index JSON file
    #[arg(long, default_value = "catalog/index.json")]
    index: PathBuf,

    /// Where to write the rendered page
    #[arg(long, default_value = "catalog/index.html")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("Reading catalog data from: {}", cli.index.display());
    let entries = JsonFileRepository::new(&cli.index)
        .load()
        .with_context(|| format!("Failed to read catalog data from {}", cli.index.display()))?;

    let page = CatalogPage::new(entries);
    let stats = page.stats();
    println!("Found {} catalog entries", stats.total);

    println!("Generating HTML page...");
    let html = page.render_html(Utc::now());

    println!("Writing HTML to: {}", cli.output.display());
    write_page(&cli.output, &html)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    println!(
        "Years: {}, unique domains: {}",
        stats.years, stats.domains
    );
    println!("✅ Catalog page generated successfully!");
    println!("   Open: {}", cli.output.display());

    Ok(())
}
