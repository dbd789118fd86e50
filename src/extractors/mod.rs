//! Extractors for each export format.
//!
//! Each extractor implements the [`Extractor`](crate::extractor::Extractor) trait.
//!
//! - [`HtmlExtractor`] - HTML pages, post containers found by class name
//! - [`JsonExtractor`] - JSON files with a post list under a known key
//!
//! # Example
//!
//! ```rust,no_run
//! use postpack::extractor::Extractor;
//! use postpack::extractors::JsonExtractor;
//! use std::path::Path;
//!
//! let extraction = JsonExtractor::new().extract_dir(Path::new("fb_archive/posts"));
//! println!("{} posts", extraction.posts.len());
//! ```

#[cfg(feature = "html")]
mod html;
mod json;

#[cfg(feature = "html")]
pub use html::HtmlExtractor;
pub use json::JsonExtractor;
