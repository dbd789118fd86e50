//! # postpack
//!
//! A Rust library for loading the posts of a Facebook "Download your
//! information" archive, filtering them by keyword and date, and exporting
//! them as CSV.
//!
//! ## Overview
//!
//! Two export formats are understood:
//! - **HTML** - the `*.html` pages, one `div.pam` container per post
//! - **JSON** - the `*.json` files, with the posts under `posts` or `status_updates`
//!
//! Every file in the posts directory is parsed independently. Broken files
//! and entries are logged and skipped, so a partial archive still loads.
//! The resulting [`Archive`] is sorted chronologically and never modified
//! afterwards; filters produce views over it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use postpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = ArchiveConfig::new("fb_archive/posts")
//!         .with_formats([ExportFormat::Html, ExportFormat::Json]);
//!     let archive = load_archive(&config);
//!
//!     let filter = PostFilter::new()
//!         .with_keyword("birthday")
//!         .with_start_date("2019-01-01")?;
//!
//!     for post in archive.filter(&filter) {
//!         println!("[{}] {}", post.timestamp().to_display_string(), post.content());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`post`] - [`Post`], [`Timestamp`], [`PostSource`]
//! - [`config`] - [`ArchiveConfig`](config::ArchiveConfig), [`HtmlConfig`](config::HtmlConfig), [`JsonConfig`](config::JsonConfig)
//! - [`extractor`] - [`Extractor`](extractor::Extractor) trait and [`ExportFormat`]
//! - [`extractors`] - per-format extractors
//! - [`parsing`] - timestamp, HTML and JSON parsing helpers
//! - [`archive`] - directory loading, [`Archive`], [`LoadStats`]
//! - [`core`] - [`PostFilter`], pagination, CSV output
//! - [`menu`] - interactive console browser
//! - `web` - HTTP UI (feature `web`)
//! - `cli`, `logging` - binary support (feature `cli`)
//! - [`error`] - [`ArchiveError`], [`Result`]
//!
//! ## Features
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `html` | HTML extraction via `scraper` |
//! | `csv-output` | CSV writer |
//! | `web` | axum server |
//! | `cli` | the `postpack` binary |
//! | `full` | all of the above (default) |

pub mod archive;
pub mod config;
pub mod core;
pub mod error;
pub mod extractor;
pub mod extractors;
pub mod menu;
pub mod parsing;
pub mod post;

#[cfg(feature = "web")]
pub mod web;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub mod logging;

// Re-export the main types at the crate root for convenience
pub use archive::{Archive, LoadStats, load_archive};
pub use core::filter::{PostFilter, filter_posts};
pub use error::{ArchiveError, Result};
pub use extractor::ExportFormat;
pub use post::{Post, PostSource, Timestamp};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use postpack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Post, PostSource, Timestamp};

    pub use crate::error::{ArchiveError, Result};

    pub use crate::config::{ArchiveConfig, HtmlConfig, JsonConfig};

    pub use crate::extractor::{ExportFormat, Extractor, create_extractor};

    #[cfg(feature = "html")]
    pub use crate::extractors::HtmlExtractor;
    pub use crate::extractors::JsonExtractor;

    pub use crate::archive::{Archive, LoadStats, load_archive};

    pub use crate::core::filter::{PostFilter, filter_posts};
    pub use crate::core::page::{Page, paginate};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv, write_csv_file};
}
