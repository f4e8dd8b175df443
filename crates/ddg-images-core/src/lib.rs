//! DuckDuckGo Image Search Core Library
//!
//! Async client for searching and downloading images via DuckDuckGo's
//! image endpoint.
//!
//! # Overview
//!
//! This crate provides:
//! - Session token negotiation against the provider's front page
//! - A lazy paginated search over the image JSON endpoint, with
//!   safe-search levels and a comma-joined filter bundle
//! - Streaming downloads of result images to disk
//! - A page scraper that collects embedded image URLs from any page
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ddg_images_core::{DdgImageScraper, Result, SafeSearch};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = DdgImageScraper::new()?;
//!
//!     let mut search = scraper
//!         .search("red panda")?
//!         .safe_search(SafeSearch::Moderate)
//!         .max_results(10);
//!
//!     while let Some(image) = search.next().await {
//!         let image = image?;
//!         println!("{} ({}x{})", image.title, image.width, image.height);
//!         scraper
//!             .download(&image.image_url, Path::new("images"), None)
//!             .await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Session tokens
//!
//! The search endpoint requires a short-lived `vqd` token scraped from
//! the provider's front page. [`ImageSearch`] negotiates it on the
//! first call to `next()` and reuses it for the rest of the sequence;
//! tokens are never cached across searches.
//!
//! # Failure model
//!
//! Every operation is a single attempt — no retries, no backoff. A
//! failed page request terminates the whole search sequence. The only
//! silently swallowed failures are individual result records that do
//! not validate; those are skipped.

mod client;
mod download;
mod error;
pub mod parser;
mod scraper;
mod search;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, DdgImageClient};

// Re-export error types
pub use error::{DdgImageError, Result};

// Re-export parser functions
pub use parser::{extract_image_urls, extract_vqd_token};

// Re-export main scraper API
pub use scraper::DdgImageScraper;

// Re-export the search sequence and data types
pub use search::ImageSearch;
pub use types::{ImageResult, SafeSearch, SearchFilters};

// Re-export URL helper functions for convenience
pub use crate::url::{build_search_url, filename_from_url};
