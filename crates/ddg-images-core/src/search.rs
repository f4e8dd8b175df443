//! Paginated image search
//!
//! [`ImageSearch`] is a lazy, finite, non-restartable sequence of
//! [`ImageResult`]. Constructing it issues no I/O; the vqd token and the
//! first page are fetched on the first call to [`ImageSearch::next`].
//! Dropping the value mid-iteration simply stops further requests.

use std::collections::VecDeque;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::client::DdgImageClient;
use crate::error::{DdgImageError, Result};
use crate::types::{ImageResult, SafeSearch, SearchFilters};
use crate::url::build_search_url;

/// One page of the image search JSON endpoint
#[derive(Debug, Deserialize)]
struct SearchPage {
    /// Raw result entries; each is validated individually
    #[serde(default)]
    results: Vec<Value>,
    /// Present when another page can be requested
    next: Option<String>,
}

/// Lazy paginated search over the image endpoint results
///
/// Built via [`DdgImageScraper::search`](crate::DdgImageScraper::search).
/// Options are set with the chainable methods before the first call to
/// [`next`](Self::next).
///
/// A failed page request terminates the sequence: the error is returned
/// once and every later call yields `None`. Entries that fail record
/// validation are skipped silently.
pub struct ImageSearch<'a> {
    client: &'a DdgImageClient,
    keywords: String,
    region: String,
    safe_search: SafeSearch,
    filters: String,
    max_results: Option<usize>,
    vqd: Option<String>,
    offset: u64,
    yielded: usize,
    buffer: VecDeque<ImageResult>,
    done: bool,
}

impl<'a> ImageSearch<'a> {
    pub(crate) fn new(client: &'a DdgImageClient, keywords: &str) -> Self {
        Self {
            client,
            keywords: keywords.to_string(),
            region: "wt-wt".to_string(),
            safe_search: SafeSearch::default(),
            filters: String::new(),
            max_results: None,
            vqd: None,
            offset: 0,
            yielded: 0,
            buffer: VecDeque::new(),
            done: false,
        }
    }

    /// Sets the region code
    ///
    /// # Arguments
    /// * `region` - Region code, e.g. `us-en` (default: `wt-wt`, no
    ///   region)
    pub fn region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    /// Sets the safe-search level
    ///
    /// # Arguments
    /// * `level` - Safe-search level (default: moderate)
    pub fn safe_search(mut self, level: SafeSearch) -> Self {
        self.safe_search = level;
        self
    }

    /// Applies a filter bundle
    ///
    /// # Arguments
    /// * `filters` - Filter bundle, rendered onto the `f` query
    ///   parameter
    pub fn filters(mut self, filters: &SearchFilters) -> Self {
        self.filters = filters.to_param();
        self
    }

    /// Caps the number of yielded results
    ///
    /// Once the cap is reached the sequence terminates without issuing
    /// further page requests.
    ///
    /// # Arguments
    /// * `max` - Maximum number of results to yield
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Produces the next result
    ///
    /// The first call negotiates the vqd token. Errors terminate the
    /// sequence; they are yielded once and followed by `None`.
    ///
    /// # Returns
    /// The next result, or `None` when the sequence is over
    pub async fn next(&mut self) -> Option<Result<ImageResult>> {
        loop {
            if self.reached_max() {
                self.done = true;
                self.buffer.clear();
                return None;
            }

            if let Some(result) = self.buffer.pop_front() {
                self.yielded += 1;
                return Some(Ok(result));
            }

            if self.done {
                return None;
            }

            match self.fetch_next_page().await {
                Ok(true) => {}
                Ok(false) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }

    /// Drains the remaining results into a vector
    ///
    /// # Returns
    /// Every remaining result, stopping early at the first error
    ///
    /// # Errors
    /// Returns the first error the sequence produces.
    pub async fn collect(mut self) -> Result<Vec<ImageResult>> {
        let mut results = Vec::new();
        while let Some(item) = self.next().await {
            results.push(item?);
        }
        Ok(results)
    }

    fn reached_max(&self) -> bool {
        self.max_results.is_some_and(|max| self.yielded >= max)
    }

    /// Requests one page and buffers its valid records
    ///
    /// Returns `false` when the result set is exhausted.
    async fn fetch_next_page(&mut self) -> Result<bool> {
        let vqd = match &self.vqd {
            Some(vqd) => vqd.clone(),
            None => {
                let vqd = self.client.fetch_token(&self.keywords).await?;
                self.vqd = Some(vqd.clone());
                vqd
            }
        };

        let url = build_search_url(
            self.client.base_url(),
            &self.keywords,
            self.offset,
            &self.region,
            self.safe_search,
            &self.filters,
            &vqd,
        )?;

        debug!(offset = self.offset, "requesting search page");
        let body = self.client.get_json(url).await?;
        let page: SearchPage = serde_json::from_value(body)
            .map_err(|e| DdgImageError::Parsing(format!("unexpected response shape: {}", e)))?;

        if page.results.is_empty() {
            return Ok(false);
        }

        let page_len = page.results.len();
        self.buffer.extend(
            page.results
                .into_iter()
                .filter_map(|raw| serde_json::from_value::<ImageResult>(raw).ok()),
        );

        self.offset += page_len as u64;
        if page.next.is_none() {
            // Final page: drain the buffer, then terminate.
            self.done = true;
        }

        Ok(true)
    }
}
