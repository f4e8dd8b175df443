//! High-level API for DuckDuckGo image search
//!
//! Combines the HTTP client, parsers, and downloader behind one struct.

use std::path::{Path, PathBuf};

use url::Url;

use crate::client::{ClientConfig, DdgImageClient};
use crate::download::download_to_dir;
use crate::error::{DdgImageError, Result};
use crate::parser::extract_image_urls;
use crate::search::ImageSearch;

/// Main entry point for searching, scraping, and downloading images
///
/// Holds one connection pool; a single instance is safe to share across
/// concurrent downloads.
pub struct DdgImageScraper {
    client: DdgImageClient,
}

impl DdgImageScraper {
    /// Creates a scraper with default configuration
    ///
    /// # Returns
    /// A new `DdgImageScraper` instance
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: DdgImageClient::new()?,
        })
    }

    /// Creates a scraper with custom client configuration
    ///
    /// # Arguments
    /// * `config` - Custom client configuration
    ///
    /// # Returns
    /// A new `DdgImageScraper` instance
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: DdgImageClient::with_config(config)?,
        })
    }

    /// Starts an image search for the given keywords
    ///
    /// No request is issued until the first call to
    /// [`ImageSearch::next`]. Options (region, safe search, filters,
    /// result cap) are set on the returned value.
    ///
    /// # Arguments
    /// * `keywords` - Search keywords
    ///
    /// # Returns
    /// A lazy sequence of image results
    ///
    /// # Errors
    /// Returns `InvalidQuery` if the keywords are empty or whitespace
    /// only.
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> ddg_images_core::Result<()> {
    /// use ddg_images_core::{DdgImageScraper, SafeSearch};
    ///
    /// let scraper = DdgImageScraper::new()?;
    /// let mut search = scraper
    ///     .search("red panda")?
    ///     .safe_search(SafeSearch::Off)
    ///     .max_results(10);
    ///
    /// while let Some(image) = search.next().await {
    ///     let image = image?;
    ///     println!("{} ({}x{})", image.title, image.width, image.height);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn search(&self, keywords: &str) -> Result<ImageSearch<'_>> {
        let trimmed = keywords.trim();
        if trimmed.is_empty() {
            return Err(DdgImageError::InvalidQuery(
                "keywords cannot be empty".to_string(),
            ));
        }
        Ok(ImageSearch::new(&self.client, trimmed))
    }

    /// Fetches a page and returns every embedded image URL
    ///
    /// # Arguments
    /// * `page_url` - Absolute URL of the page to scan
    ///
    /// # Returns
    /// Image URLs, absolute, in document order, duplicates included
    ///
    /// # Errors
    /// - `InvalidUrl` if `page_url` is not a valid absolute URL
    /// - `Network` if the request fails or returns a non-success status
    /// - `Parsing` if the markup cannot be processed
    pub async fn images_from_page(&self, page_url: &str) -> Result<Vec<String>> {
        let parsed =
            Url::parse(page_url).map_err(|_| DdgImageError::InvalidUrl(page_url.to_string()))?;
        let html = self.client.get_text(page_url).await?;
        extract_image_urls(&html, &parsed)
    }

    /// Downloads a file to `output_dir`, streaming it to disk
    ///
    /// The directory is created if absent.
    ///
    /// # Arguments
    /// * `url` - The URL to download
    /// * `output_dir` - Directory the file is written into
    /// * `filename` - Explicit filename; when `None` the name is
    ///   derived from the URL (query string stripped, sanitized)
    ///
    /// # Returns
    /// Path of the written file
    ///
    /// # Errors
    /// - `Network` if the request fails or returns a non-success status
    /// - `Io` if the directory or file cannot be written
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> ddg_images_core::Result<()> {
    /// use std::path::Path;
    /// use ddg_images_core::DdgImageScraper;
    ///
    /// let scraper = DdgImageScraper::new()?;
    /// let path = scraper
    ///     .download("https://img.example.com/pic.jpg", Path::new("images"), None)
    ///     .await?;
    /// println!("saved to {}", path.display());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn download(
        &self,
        url: &str,
        output_dir: &Path,
        filename: Option<&str>,
    ) -> Result<PathBuf> {
        download_to_dir(&self.client, url, output_dir, filename).await
    }

    /// Access to the underlying HTTP client
    pub fn client(&self) -> &DdgImageClient {
        &self.client
    }
}
