use std::borrow::Cow;
use std::time::Duration;

/// Browser window size used for captures.
pub const VIEWPORT: (u32, u32) = (1920, 1080);

pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);

// Phishing kits often sit behind broken TLS and hostile CSP
pub const CHROME_FLAGS: &[&str] = &[
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--ignore-certificate-errors",
    "--disable-web-security",
    "--disable-gpu",
];

/// Prefixes `https://` unless the URL already starts with `http://` or
/// `https://` (any case).
pub fn ensure_scheme(url: &str) -> Cow<'_, str> {
    if has_http_scheme(url) {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("https://{}", url))
    }
}

fn has_http_scheme(url: &str) -> bool {
    let starts_with = |prefix: &str| {
        url.get(..prefix.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
    };
    starts_with("http://") || starts_with("https://")
}
