//! Normalized post record shared by every extractor.
//!
//! This module provides [`Post`], the record both the HTML and the JSON
//! extractors produce, and [`Timestamp`], which keeps track of whether the
//! source carried a UTC offset.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use postpack::{Post, PostSource, Timestamp};
//!
//! let naive = NaiveDate::from_ymd_opt(2021, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(15, 0, 0)
//!     .unwrap();
//!
//! let post = Post::new(Timestamp::Naive(naive), "Hello there", PostSource::file("posts.html"));
//! assert_eq!(post.content(), "Hello there");
//! assert_eq!(post.timestamp().to_iso_string(), "2021-01-01T15:00:00");
//! ```

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

/// When a post was published.
///
/// Exports are inconsistent about time zones: some timestamps carry an
/// explicit offset, many don't. The two cases are kept apart instead of
/// guessing a zone for naive values.
///
/// Ordering uses [`sort_key`](Timestamp::sort_key): naive values compare by
/// their wall-clock time, zoned values by their UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// No offset in the source.
    Naive(NaiveDateTime),
    /// Source carried an explicit UTC offset.
    Zoned(DateTime<FixedOffset>),
}

impl Timestamp {
    /// The fallback used by the JSON extractor when an entry has no
    /// timestamp: `1970-01-01T00:00:00`, naive.
    pub fn epoch() -> Self {
        Timestamp::Naive(DateTime::UNIX_EPOCH.naive_utc())
    }

    /// Returns the value used for sorting and range filtering.
    pub fn sort_key(&self) -> NaiveDateTime {
        match self {
            Timestamp::Naive(naive) => *naive,
            Timestamp::Zoned(dt) => dt.naive_utc(),
        }
    }

    /// Returns the wall-clock time as written in the source.
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            Timestamp::Naive(naive) => *naive,
            Timestamp::Zoned(dt) => dt.naive_local(),
        }
    }

    /// Returns the UTC offset, if the source provided one.
    pub fn offset(&self) -> Option<FixedOffset> {
        match self {
            Timestamp::Naive(_) => None,
            Timestamp::Zoned(dt) => Some(*dt.offset()),
        }
    }

    /// Returns `true` if this timestamp carries a UTC offset.
    pub fn is_zoned(&self) -> bool {
        matches!(self, Timestamp::Zoned(_))
    }

    /// Renders the timestamp as ISO-8601.
    ///
    /// Naive values have no offset suffix (`2021-01-01T15:00:00`), zoned
    /// values always do (`2021-01-01T15:00:00+01:00`). A non-zero fraction
    /// is printed as six digits of microseconds (`15:00:00.250000`);
    /// anything below a microsecond is dropped.
    pub fn to_iso_string(&self) -> String {
        let fraction = if self.naive_local().nanosecond() / 1_000 == 0 {
            ""
        } else {
            "%.6f"
        };
        match self {
            Timestamp::Naive(naive) => naive
                .format(&format!("%Y-%m-%dT%H:%M:%S{fraction}"))
                .to_string(),
            Timestamp::Zoned(dt) => dt
                .format(&format!("%Y-%m-%dT%H:%M:%S{fraction}%:z"))
                .to_string(),
        }
    }

    /// Renders the wall-clock time as `YYYY-MM-DD HH:MM:SS` for display.
    pub fn to_display_string(&self) -> String {
        self.naive_local().format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(naive: NaiveDateTime) -> Self {
        Timestamp::Naive(naive)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Timestamp::Zoned(dt)
    }
}

/// Where a post came from.
///
/// Informational only: never used for filtering or ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PostSource {
    /// Name of the HTML file the post container was found in.
    File(String),
    /// The original JSON entry, untouched.
    Raw(serde_json::Value),
}

impl PostSource {
    /// Creates a file source.
    pub fn file(name: impl Into<String>) -> Self {
        PostSource::File(name.into())
    }

    /// Returns the file name for file sources.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            PostSource::File(name) => Some(name),
            PostSource::Raw(_) => None,
        }
    }

    /// Returns the raw JSON entry for JSON sources.
    pub fn raw(&self) -> Option<&serde_json::Value> {
        match self {
            PostSource::File(_) => None,
            PostSource::Raw(value) => Some(value),
        }
    }
}

/// A single exported post, normalized.
///
/// Records are immutable once built; filtering hands out references instead
/// of narrowing a collection in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    timestamp: Timestamp,
    content: String,
    source: PostSource,
}

impl Post {
    /// Creates a new post.
    pub fn new(timestamp: impl Into<Timestamp>, content: impl Into<String>, source: PostSource) -> Self {
        Self {
            timestamp: timestamp.into(),
            content: content.into(),
            source,
        }
    }

    /// Returns the post timestamp.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Returns the post text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns where the post came from.
    pub fn source(&self) -> &PostSource {
        &self.source
    }

    /// Shorthand for `self.timestamp().sort_key()`.
    pub fn sort_key(&self) -> NaiveDateTime {
        self.timestamp.sort_key()
    }

    /// Returns `true` if the content is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Sorts posts ascending by timestamp, keeping the input order for ties.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by_key(Post::sort_key);
}
