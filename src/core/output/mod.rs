//! Output format writers.
//!
//! - [`write_csv`] / [`write_csv_file`] / [`to_csv`] - CSV with a
//!   `Timestamp,Content` header - requires `csv-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "csv-output")]
//! # fn main() -> postpack::Result<()> {
//! use postpack::core::output::{to_csv, write_csv_file};
//! use postpack::{Post, PostSource, Timestamp};
//!
//! let posts = vec![Post::new(Timestamp::epoch(), "Hello!", PostSource::file("a.html"))];
//!
//! write_csv_file(&posts, "facebook_posts_export.csv".as_ref())?;
//! let csv_string = to_csv(&posts)?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "csv-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CSV_HEADER, DEFAULT_EXPORT_FILE, to_csv, write_csv, write_csv_file};
