use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;

use crate::date::{format_captured_at, DISPLAY_FORMAT};
use crate::entry::{field_text, filter_placeholders, CatalogEntry};
use crate::error::Result;
use crate::repository::{write_atomically, CatalogRepository, JsonFileRepository};

/// Summary counters shown at the top of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub total: usize,
    pub years: usize,
    pub domains: usize,
}

/// The renderable view of an index: placeholders removed, entries grouped by
/// year. Within a year the index order is kept as-is.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    by_year: BTreeMap<i64, Vec<CatalogEntry>>,
    stats: CatalogStats,
}

impl CatalogPage {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let entries = filter_placeholders(entries);

        let domains: HashSet<Cow<'_, str>> = entries
            .iter()
            .map(|entry| field_text(&entry.domain).unwrap_or_default())
            .collect();
        let domain_count = domains.len();
        let total = entries.len();

        let mut by_year: BTreeMap<i64, Vec<CatalogEntry>> = BTreeMap::new();
        for entry in entries {
            by_year.entry(entry.year).or_default().push(entry);
        }

        let stats = CatalogStats {
            total,
            years: by_year.len(),
            domains: domain_count,
        };

        Self { by_year, stats }
    }

    pub fn stats(&self) -> CatalogStats {
        self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }

    /// Year groups, newest year first.
    pub fn years(&self) -> impl Iterator<Item = (i64, &[CatalogEntry])> + '_ {
        self.by_year
            .iter()
            .rev()
            .map(|(year, entries)| (*year, entries.as_slice()))
    }

    pub fn render_html(&self, generated_at: DateTime<Utc>) -> String {
        let mut html = String::from(PAGE_HEAD);

        html.push_str(&format!(
            r#"
    <div class="container">
        <div class="row mb-4">
{}{}{}        </div>
"#,
            stats_card(self.stats.total, "Total Captures"),
            stats_card(self.stats.years, "Years"),
            stats_card(self.stats.domains, "Unique Domains"),
        ));

        if self.is_empty() {
            html.push_str(NO_DATA);
        } else {
            for (year, entries) in self.years() {
                html.push_str(&format!(
                    r#"
        <div class="year-section" id="year-{year}">
            <div class="year-header">
                <h2><i class="bi bi-calendar3"></i> {year}</h2>
            </div>
            <div class="row">
"#
                ));
                for entry in entries {
                    html.push_str(&entry_card(entry));
                }
                html.push_str(
                    r#"
            </div>
        </div>
"#,
                );
            }
        }

        html.push_str(&format!(
            r#"
    </div>

    <div class="footer">
        <div class="container">
            <p><i class="bi bi-info-circle"></i> This catalog contains archived phishing pages for educational and research purposes only.</p>
            <p>⚠️ <strong>Warning:</strong> These are real phishing pages. Do not enter any personal information.</p>
            <p class="mt-3">Generated on {}</p>
        </div>
    </div>

    <script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/js/bootstrap.bundle.min.js"></script>
</body>
</html>
"#,
            generated_at.format(DISPLAY_FORMAT)
        ));

        html
    }
}

/// Reads the index at `index_path` and writes the rendered page to
/// `output_path`, returning the counters that were rendered.
pub fn generate_catalog(index_path: &Path, output_path: &Path) -> Result<CatalogStats> {
    let entries = JsonFileRepository::new(index_path).load()?;
    let page = CatalogPage::new(entries);
    let html = page.render_html(Utc::now());
    write_page(output_path, &html)?;
    Ok(page.stats())
}

pub fn write_page(output_path: &Path, html: &str) -> Result<()> {
    write_atomically(output_path, html.as_bytes())?;
    info!("Wrote catalog page to {}", output_path.display());
    Ok(())
}

fn stats_card(value: usize, label: &str) -> String {
    format!(
        r#"            <div class="col-md-4">
                <div class="stats-card">
                    <div class="stats-number">{value}</div>
                    <div class="stats-label">{label}</div>
                </div>
            </div>
"#
    )
}

fn entry_card(entry: &CatalogEntry) -> String {
    let path = escape_html(&entry.display_path());
    let url = entry.url_or_default();

    format!(
        r#"
                <div class="col-lg-6">
                    <a class="phishing-card" href="{path}" target="_blank" rel="noopener noreferrer">
                        <div class="warning-badge">
                            <i class="bi bi-exclamation-triangle-fill"></i> PHISHING SITE
                        </div>
                        <h3 class="card-title">{title}</h3>
                        <div class="card-domain">
                            <i class="bi bi-globe"></i>Domain: {domain}
                        </div>
                        <p class="card-description">{description}</p>
                        <div class="card-meta">
                            <div class="meta-item">
                                <i class="bi bi-clock"></i>
                                <span class="card-date">{captured_at}</span>
                            </div>
                            <div class="meta-item">
                                <i class="bi bi-link-45deg"></i>
                                <span class="card-url" title="{full_url}">{short_url}</span>
                            </div>
                        </div>
                        <div class="btn-view">
                            <i class="bi bi-eye"></i> View Captured Page
                        </div>
                    </a>
                </div>
"#,
        title = escape_html(&entry.title()),
        domain = escape_html(&entry.domain_or_default()),
        description = escape_html(&entry.description_or_default()),
        captured_at = escape_html(&format_captured_at(&entry.captured_at_or_default())),
        full_url = escape_html(&url),
        short_url = escape_html(&entry.truncated_url()),
    )
}

pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const NO_DATA: &str = r#"
        <div class="no-data">
            <i class="bi bi-inbox" style="font-size: 4rem; margin-bottom: 1rem; display: block;"></i>
            <h3>No phishing pages captured yet</h3>
            <p>Captured pages will appear here once added to the catalog.</p>
        </div>
"#;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Phishing Catalog - Captured Pages</title>
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css" rel="stylesheet">
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.1/font/bootstrap-icons.css">
    <style>
        :root {
            --primary-color: #00a8e8;
            --secondary-color: #003459;
            --dark-bg: #0a0e27;
            --card-bg: #1a1e3e;
        }

        body {
            background: linear-gradient(135deg, var(--dark-bg) 0%, #1a1e3e 100%);
            min-height: 100vh;
            color: #ffffff;
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
        }

        .header {
            background: rgba(0, 52, 89, 0.5);
            backdrop-filter: blur(10px);
            border-bottom: 2px solid var(--primary-color);
            padding: 2rem 0;
            margin-bottom: 3rem;
        }

        .header h1 {
            color: var(--primary-color);
            font-weight: 700;
            text-shadow: 0 0 20px rgba(0, 168, 232, 0.5);
        }

        .header .subtitle {
            color: #adb5bd;
            font-size: 1.1rem;
        }

        .year-section {
            margin-bottom: 3rem;
        }

        .year-header {
            background: linear-gradient(90deg, var(--primary-color), transparent);
            padding: 1rem 1.5rem;
            border-radius: 10px;
            margin-bottom: 1.5rem;
            border-left: 4px solid var(--primary-color);
        }

        .year-header h2 {
            margin: 0;
            font-size: 1.8rem;
            font-weight: 600;
        }

        .phishing-card {
            background: var(--card-bg);
            border: 1px solid rgba(0, 168, 232, 0.2);
            border-radius: 12px;
            padding: 1.5rem;
            margin-bottom: 1.5rem;
            transition: all 0.3s ease;
            position: relative;
            overflow: hidden;
            display: block;
            text-decoration: none;
        }

        .phishing-card:hover {
            transform: translateY(-5px);
            border-color: var(--primary-color);
            box-shadow: 0 10px 30px rgba(0, 168, 232, 0.3);
        }

        .card-title {
            color: var(--primary-color);
            font-size: 1.3rem;
            font-weight: 600;
            margin-bottom: 0.5rem;
        }

        .card-domain {
            color: #adb5bd;
            font-size: 0.9rem;
            margin-bottom: 1rem;
        }

        .card-description {
            color: #dee2e6;
            margin-bottom: 1rem;
        }

        .card-meta {
            display: flex;
            gap: 1.5rem;
            flex-wrap: wrap;
            margin-bottom: 1rem;
            font-size: 0.9rem;
        }

        .meta-item {
            display: flex;
            align-items: center;
            gap: 0.5rem;
            color: #adb5bd;
        }

        .meta-item i {
            color: var(--primary-color);
        }

        .btn-view {
            background: var(--primary-color);
            color: white;
            padding: 0.6rem 1.5rem;
            border-radius: 8px;
            display: inline-flex;
            align-items: center;
            gap: 0.5rem;
            font-weight: 500;
        }

        .stats-card {
            background: var(--card-bg);
            border: 1px solid rgba(0, 168, 232, 0.2);
            border-radius: 12px;
            padding: 1.5rem;
            text-align: center;
            margin-bottom: 2rem;
        }

        .stats-number {
            font-size: 2.5rem;
            font-weight: 700;
            color: var(--primary-color);
            margin-bottom: 0.5rem;
        }

        .stats-label {
            color: #adb5bd;
            font-size: 1rem;
        }

        .footer {
            background: rgba(0, 52, 89, 0.3);
            border-top: 1px solid rgba(0, 168, 232, 0.2);
            padding: 2rem 0;
            margin-top: 4rem;
            text-align: center;
            color: #adb5bd;
        }

        .warning-badge {
            background: #dc3545;
            color: white;
            padding: 0.3rem 0.8rem;
            border-radius: 20px;
            font-size: 0.8rem;
            font-weight: 600;
            display: inline-block;
            margin-bottom: 1rem;
        }

        .no-data {
            text-align: center;
            padding: 3rem;
            color: #adb5bd;
        }

        @media (max-width: 768px) {
            .card-meta {
                flex-direction: column;
                gap: 0.5rem;
            }
        }
    </style>
</head>
<body>
    <div class="header">
        <div class="container">
            <h1><i class="bi bi-shield-exclamation"></i> Phishing Catalog</h1>
            <p class="subtitle">Archived phishing pages for research and awareness</p>
        </div>
    </div>
"#;
