//! Response parsers for duckduckgo.com
//!
//! Contains modules for extracting the vqd session token and for
//! scraping image URLs out of arbitrary pages.

pub mod page;
pub mod token;

pub use page::extract_image_urls;
pub use token::extract_vqd_token;
