//! Shared parsing utilities for both export formats.
//!
//! These are pure functions over text and parsed documents; the file and
//! directory handling lives in [`extractors`](crate::extractors) and
//! [`archive`](crate::archive).

pub mod timestamp;

#[cfg(feature = "html")]
pub mod html;

pub mod json;

// Re-export commonly used items
pub use timestamp::{
    OFFSET_TIMESTAMP_FORMAT, parse_display_timestamp, parse_iso_timestamp, parse_offset_timestamp,
    parse_unix_timestamp,
};

#[cfg(feature = "html")]
pub use html::{ContainerSkip, HtmlSelectors, parse_html_document, parse_post_container};

pub use json::{EntryError, PostList, fix_mojibake_encoding, parse_json_document, parse_json_entry};
