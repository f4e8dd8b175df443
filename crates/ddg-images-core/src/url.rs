//! URL helpers for the DuckDuckGo image endpoints
//!
//! Provides functions for building the search request URL and deriving
//! download filenames from image URLs.

use reqwest::Url;

use crate::error::{DdgImageError, Result};
use crate::types::SafeSearch;

/// Root endpoint of the search provider
pub const DEFAULT_BASE_URL: &str = "https://duckduckgo.com";

/// Path of the image search JSON endpoint, relative to the base URL
pub const SEARCH_PATH: &str = "/i.js";

/// Filename used when nothing can be derived from a download URL
pub const DEFAULT_DOWNLOAD_FILENAME: &str = "downloaded_image";

/// Builds the image search URL with the full query parameter set
///
/// Parameters are `l` (region), `o` (output format marker, always
/// `json`), `q` (keywords), `s` (pagination offset), `p` (safe-search
/// code), `f` (comma-joined filter string) and `vqd` (session token).
///
/// # Arguments
/// * `base_url` - Root endpoint of the search provider
/// * `keywords` - Search keywords
/// * `offset` - Pagination offset (number of results already seen)
/// * `region` - Region code, e.g. `wt-wt`
/// * `safe_search` - Safe-search level
/// * `filters` - Comma-joined filter string, may be empty
/// * `vqd` - Session token
///
/// # Returns
/// The fully-encoded search URL
///
/// # Errors
/// Returns `InvalidUrl` if the base URL is not parseable.
///
/// # Example
/// ```
/// use ddg_images_core::url::build_search_url;
/// use ddg_images_core::SafeSearch;
///
/// let url = build_search_url(
///     "https://duckduckgo.com",
///     "red panda",
///     0,
///     "wt-wt",
///     SafeSearch::Moderate,
///     "",
///     "4-123456",
/// )
/// .unwrap();
/// assert!(url.as_str().starts_with("https://duckduckgo.com/i.js?"));
/// assert!(url.as_str().contains("vqd=4-123456"));
/// ```
#[allow(clippy::too_many_arguments)]
pub fn build_search_url(
    base_url: &str,
    keywords: &str,
    offset: u64,
    region: &str,
    safe_search: SafeSearch,
    filters: &str,
    vqd: &str,
) -> Result<Url> {
    let endpoint = format!("{}{}", base_url.trim_end_matches('/'), SEARCH_PATH);
    let offset = offset.to_string();

    Url::parse_with_params(
        &endpoint,
        &[
            ("l", region),
            ("o", "json"),
            ("q", keywords),
            ("s", offset.as_str()),
            ("p", safe_search.as_param()),
            ("f", filters),
            ("vqd", vqd),
        ],
    )
    .map_err(|e| DdgImageError::InvalidUrl(format!("{}: {}", endpoint, e)))
}

/// Derives a download filename from a URL
///
/// Takes the last path segment with any query string or fragment
/// stripped, percent-decoded, and sanitized so the result is always a
/// single path component. Falls back to [`DEFAULT_DOWNLOAD_FILENAME`]
/// when the derivation yields an empty or unusable name.
///
/// # Arguments
/// * `url` - The URL the file will be fetched from
///
/// # Returns
/// A filename safe to join onto an output directory
///
/// # Example
/// ```
/// use ddg_images_core::url::filename_from_url;
///
/// assert_eq!(
///     filename_from_url("https://img.example.com/cats/pic.jpg?size=large"),
///     "pic.jpg"
/// );
/// assert_eq!(filename_from_url("https://img.example.com/"), "downloaded_image");
/// ```
pub fn filename_from_url(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let segment = without_query.rsplit('/').next().unwrap_or("");

    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());

    sanitize_filename(&decoded)
}

/// Forces a decoded path segment into a single safe path component
///
/// Percent-decoding can reintroduce separators (`%2F`, `%5C`), so any
/// separator or control character becomes `_`. A name that is empty or
/// reduces to `.`/`..` gets the fallback.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|ch| match ch {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => DEFAULT_DOWNLOAD_FILENAME.to_string(),
        _ => cleaned,
    }
}
