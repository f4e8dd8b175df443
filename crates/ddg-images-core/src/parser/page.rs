//! Image URL extraction from arbitrary pages
//!
//! Collects every `<img>` source in document order and resolves each
//! against the page's own URL.

use scraper::{Html, Selector};
use url::Url;

use crate::error::{DdgImageError, Result};

/// Extracts all image URLs from a page's markup
///
/// Every `img` element with a non-empty `src` attribute contributes one
/// entry, in document order, duplicates included. Relative sources are
/// resolved against `page_url`; sources that cannot be resolved are
/// skipped.
///
/// # Arguments
/// * `html` - The page markup
/// * `page_url` - URL the page was fetched from, used to resolve
///   relative sources
///
/// # Returns
/// Absolute image URLs in document order
///
/// # Errors
/// Returns `Parsing` if the selector cannot be constructed.
pub fn extract_image_urls(html: &str, page_url: &Url) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("img[src]")
        .map_err(|e| DdgImageError::Parsing(format!("invalid selector: {:?}", e)))?;

    let mut urls = Vec::new();

    for element in document.select(&selector) {
        let Some(src) = element.value().attr("src") else {
            continue;
        };
        if src.is_empty() {
            continue;
        }
        if let Ok(absolute) = page_url.join(src) {
            urls.push(absolute.to_string());
        }
    }

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://example.com/gallery/index.html").unwrap()
    }

    #[test]
    fn test_extract_empty_page() {
        let urls = extract_image_urls("<html><body></body></html>", &page_url()).unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn test_extract_absolute_urls() {
        let html = r#"
        <html><body>
            <img src="https://cdn.example.com/a.jpg">
            <img src="https://cdn.example.com/b.png" alt="b">
        </body></html>
        "#;
        let urls = extract_image_urls(html, &page_url()).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://cdn.example.com/a.jpg".to_string(),
                "https://cdn.example.com/b.png".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_resolves_relative_urls() {
        let html = r#"
        <html><body>
            <img src="thumbs/a.jpg">
            <img src="/static/b.jpg">
            <img src="//cdn.example.com/c.jpg">
        </body></html>
        "#;
        let urls = extract_image_urls(html, &page_url()).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://example.com/gallery/thumbs/a.jpg".to_string(),
                "https://example.com/static/b.jpg".to_string(),
                "https://cdn.example.com/c.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_preserves_document_order_and_duplicates() {
        let html = r#"
        <html><body>
            <img src="z.jpg">
            <img src="a.jpg">
            <img src="z.jpg">
        </body></html>
        "#;
        let urls = extract_image_urls(html, &page_url()).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://example.com/gallery/z.jpg".to_string(),
                "https://example.com/gallery/a.jpg".to_string(),
                "https://example.com/gallery/z.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_skips_missing_and_empty_src() {
        let html = r#"
        <html><body>
            <img alt="no source">
            <img src="">
            <img src="real.jpg">
        </body></html>
        "#;
        let urls = extract_image_urls(html, &page_url()).unwrap();
        assert_eq!(urls, vec!["https://example.com/gallery/real.jpg".to_string()]);
    }
}
