//! Core data types for the DuckDuckGo image client
//!
//! Contains the result record plus the safe-search and filter option
//! bundles that are rendered into query parameters.

use serde::{Deserialize, Serialize};

/// A single validated image search result
///
/// Deserialized straight from one entry of the search endpoint's
/// `results` array. Dimensions are `u32`, so records with missing or
/// negative width/height fail deserialization; the search generator
/// drops such records instead of surfacing an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Result title
    pub title: String,

    /// URL of the full-size image
    #[serde(rename = "image")]
    pub image_url: String,

    /// URL of the thumbnail
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: String,

    /// URL of the page the image was found on
    #[serde(rename = "url")]
    pub source_url: String,

    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,
}

impl ImageResult {
    /// Total pixel count, for resolution pre-filtering before download
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Safe-search strictness level
///
/// Mapped to the provider's `p` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SafeSearch {
    /// Strict filtering (`p=1`)
    On,
    /// Moderate filtering (`p=-1`), the provider default
    #[default]
    Moderate,
    /// No filtering (`p=-2`)
    Off,
}

impl SafeSearch {
    /// Provider code for the `p` query parameter
    pub fn as_param(self) -> &'static str {
        match self {
            SafeSearch::On => "1",
            SafeSearch::Moderate => "-1",
            SafeSearch::Off => "-2",
        }
    }

    /// Parses a user-facing level string, case-insensitively
    ///
    /// # Arguments
    /// * `value` - Level name, `on`/`moderate`/`off` in any case
    ///
    /// # Returns
    /// The matching level; unrecognized values fall back to
    /// [`SafeSearch::Moderate`]
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "on" => SafeSearch::On,
            "off" => SafeSearch::Off,
            _ => SafeSearch::Moderate,
        }
    }
}

/// Optional search filter bundle
///
/// Rendered into the single comma-joined `f` query parameter. Absent
/// fields contribute nothing to the rendered string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Time range ("Day", "Week", "Month", "Year")
    pub time: Option<String>,
    /// Size class ("Small", "Medium", "Large", "Wallpaper")
    pub size: Option<String>,
    /// Color filter (e.g. "Monochrome", "Red")
    pub color: Option<String>,
    /// Image type ("photo", "clipart", "gif", "transparent", "line")
    pub image_type: Option<String>,
    /// Layout ("Square", "Tall", "Wide")
    pub layout: Option<String>,
    /// License class (e.g. "Public", "Share")
    pub license: Option<String>,
}

impl SearchFilters {
    /// Renders the filter string for the `f` query parameter
    ///
    /// # Returns
    /// Present fields as `key:value`, joined with commas in the fixed
    /// order time, size, color, type, layout, license; empty when no
    /// field is set
    pub fn to_param(&self) -> String {
        let fields = [
            ("time", &self.time),
            ("size", &self.size),
            ("color", &self.color),
            ("type", &self.image_type),
            ("layout", &self.layout),
            ("license", &self.license),
        ];

        fields
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| format!("{}:{}", key, v)))
            .collect::<Vec<_>>()
            .join(",")
    }
}
