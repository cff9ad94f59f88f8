//! Rewrites storage links into viewable and downloadable forms.

use regex::Regex;
use std::sync::LazyLock;
use url::{Url, form_urlencoded};

use crate::domain::share::DEEP_LINK_PARAM;

static DRIVE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"drive\.google\.com/file/d/([a-zA-Z0-9_-]+)/").expect("valid regex")
});

const GVIEW_BASE: &str = "https://docs.google.com/gview?embedded=true&url=";

/// Extracts the file id from a Drive share link.
pub fn drive_file_id(url: &str) -> Option<&str> {
    DRIVE_FILE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Returns a URL that can be embedded in a viewer frame.
///
/// Drive links become their `/preview` form; anything else goes through the
/// generic document viewer. An empty link stays empty.
pub fn embeddable_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    match drive_file_id(url) {
        Some(id) => format!("https://drive.google.com/file/d/{}/preview", id),
        None => {
            let encoded: String = form_urlencoded::byte_serialize(url.as_bytes()).collect();
            format!("{}{}", GVIEW_BASE, encoded)
        }
    }
}

/// How a download is started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadLink {
    /// Drive hosts the file; the user finishes the download there.
    Drive(String),
    /// Direct link.
    Direct(String),
}

impl DownloadLink {
    pub fn url(&self) -> &str {
        match self {
            DownloadLink::Drive(u) | DownloadLink::Direct(u) => u,
        }
    }
}

/// Returns the download link for a storage URL.
pub fn download_url(url: &str) -> DownloadLink {
    match drive_file_id(url) {
        Some(id) => DownloadLink::Drive(format!(
            "https://drive.google.com/uc?id={}&export=download",
            id
        )),
        None => DownloadLink::Direct(url.to_string()),
    }
}

/// Extracts the deep-link record id from a page URL or a bare query string.
///
/// Accepts `https://site/?pdf=ID`, `?pdf=ID` and `pdf=ID`. Returns `None`
/// when the parameter is absent or empty.
pub fn deep_link_id(input: &str) -> Option<String> {
    let input = input.trim();
    let query = match Url::parse(input) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => input.trim_start_matches('?').to_string(),
    };

    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == DEEP_LINK_PARAM)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}
