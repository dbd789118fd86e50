//! Core processing logic for postpack.
//!
//! This module contains:
//! - [`filter`] - Post filtering by keyword and date range
//! - [`page`] - Pagination of result lists
//! - [`output`] - CSV writer
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn example() {
//! use postpack::core::{PostFilter, filter_posts, paginate, to_csv};
//! # }
//! ```

pub mod filter;
pub mod output;
pub mod page;

// Re-export main types for convenience
pub use filter::{PostFilter, filter_posts, parse_filter_date};
pub use page::{Page, paginate};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv, write_csv_file};
