//! Filter posts by keyword and date range.
//!
//! This module provides [`PostFilter`] for defining filter criteria and
//! [`filter_posts`] for applying them to a post collection.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Keyword | [`with_keyword`](PostFilter::with_keyword) | Content contains text, any case |
//! | Start | [`with_start_date`](PostFilter::with_start_date) | Posts at or after midnight of the date |
//! | End | [`with_end_date`](PostFilter::with_end_date) | Posts at or before midnight of the date |
//!
//! # Examples
//!
//! ```
//! use postpack::core::filter::{PostFilter, filter_posts};
//! use postpack::{Post, PostSource};
//! use chrono::NaiveDate;
//!
//! # fn main() -> postpack::Result<()> {
//! let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let posts = vec![
//!     Post::new(day(20), "Back from the beach", PostSource::file("a.html")),
//!     Post::new(day(1), "Beach day!", PostSource::file("a.html")),
//!     Post::new(day(2), "Rainy", PostSource::file("a.html")),
//! ];
//!
//! let filter = PostFilter::new()
//!     .with_keyword("BEACH")
//!     .with_start_date("2024-06-01")?;
//!
//! let matched = filter_posts(&posts, &filter);
//! let contents: Vec<_> = matched.iter().map(|p| p.content()).collect();
//! assert_eq!(contents, ["Beach day!", "Back from the beach"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Bounds are inclusive and compared against [`Post::sort_key`], so a
//!   zoned timestamp is compared by its UTC instant
//! - An end date means midnight at the start of that day
//! - Filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::Post;
use crate::error::{ArchiveError, Result};

/// Date format accepted by the date filters.
pub const FILTER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Criteria for selecting posts.
///
/// A post must match every set criterion; an empty filter matches all posts.
///
/// # Examples
///
/// ```
/// use postpack::core::filter::PostFilter;
///
/// # fn main() -> postpack::Result<()> {
/// let by_keyword = PostFilter::new().with_keyword("birthday");
///
/// let by_date = PostFilter::new()
///     .with_start_date("2020-01-01")?
///     .with_end_date("2020-12-31")?;
///
/// assert!(by_keyword.is_active());
/// assert!(!PostFilter::new().is_active());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFilter {
    /// Include only posts whose content contains this text, ignoring case.
    pub keyword: Option<String>,

    /// Include only posts at or after this time.
    pub start: Option<NaiveDateTime>,

    /// Include only posts at or before this time.
    pub end: Option<NaiveDateTime>,
}

impl PostFilter {
    /// Creates an empty filter that matches every post.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the keyword. An empty keyword clears it.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        self.keyword = (!keyword.is_empty()).then_some(keyword);
        self
    }

    /// Sets the start bound to midnight of a `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidDate`] if the format is invalid.
    pub fn with_start_date(mut self, date_str: &str) -> Result<Self> {
        self.start = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Sets the end bound to midnight of a `YYYY-MM-DD` date.
    ///
    /// Posts later on that same day are excluded.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidDate`] if the format is invalid.
    pub fn with_end_date(mut self, date_str: &str) -> Result<Self> {
        self.end = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Sets the start bound directly.
    #[must_use]
    pub fn with_start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the end bound directly.
    #[must_use]
    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Returns `true` if any criterion is set.
    pub fn is_active(&self) -> bool {
        self.keyword.is_some() || self.start.is_some() || self.end.is_some()
    }

    /// Returns `true` if `post` satisfies every criterion.
    pub fn matches(&self, post: &Post) -> bool {
        let needle = self.keyword.as_deref().map(str::to_lowercase);
        self.matches_with(post, needle.as_deref())
    }

    fn matches_with(&self, post: &Post, lowered_keyword: Option<&str>) -> bool {
        if let Some(needle) = lowered_keyword {
            if !post.content().to_lowercase().contains(needle) {
                return false;
            }
        }
        let key = post.sort_key();
        if self.start.is_some_and(|start| key < start) {
            return false;
        }
        if self.end.is_some_and(|end| key > end) {
            return false;
        }
        true
    }
}

/// Parses a `YYYY-MM-DD` date to midnight of that day.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidDate`] if the format is invalid.
pub fn parse_filter_date(date_str: &str) -> Result<NaiveDateTime> {
    NaiveDate::parse_from_str(date_str.trim(), FILTER_DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| ArchiveError::invalid_date(date_str))
}

/// Returns the posts matching `filter`, sorted ascending by timestamp.
///
/// The input is never modified; ties keep their input order. Filtering the
/// result again with the same filter returns the same posts.
pub fn filter_posts<'a, I>(posts: I, filter: &PostFilter) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    let needle = filter.keyword.as_deref().map(str::to_lowercase);
    let mut matched: Vec<&Post> = posts
        .into_iter()
        .filter(|post| filter.matches_with(post, needle.as_deref()))
        .collect();
    matched.sort_by_key(|post| post.sort_key());
    matched
}
