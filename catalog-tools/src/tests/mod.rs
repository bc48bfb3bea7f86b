use scraper::{Html, Selector};

use crate::update::NewCapture;

pub mod date_tests;
pub mod fixtures;
pub mod trigger_tests;

/// Trimmed text of every element matching `selector`
pub fn select_texts(document: &Html, selector: &str) -> Vec<String> {
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect()
}

pub fn sample_capture(year: i64, filename: &str, captured_at: &str) -> NewCapture {
    NewCapture {
        year,
        url: format!("https://{}.example/login", filename),
        domain: format!("{}.example", filename),
        filename: filename.to_string(),
        captured_at: captured_at.to_string(),
    }
}
