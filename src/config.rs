//! Configuration types for extractors and archive loading.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. The CLI fills them from flags.
//!
//! - [`HtmlConfig`] - markers used to find posts in HTML pages
//! - [`JsonConfig`] - where the post list lives in JSON files
//! - [`ArchiveConfig`] - which directory to scan and with which extractors
//!
//! # Example
//!
//! ```rust
//! use postpack::config::{ArchiveConfig, JsonConfig};
//! use postpack::ExportFormat;
//!
//! let config = ArchiveConfig::new("fb_archive/posts")
//!     .with_formats([ExportFormat::Json])
//!     .with_json(JsonConfig::new().with_placeholder("(empty)"));
//!
//! assert_eq!(config.formats, vec![ExportFormat::Json]);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::extractor::ExportFormat;

/// Default directory scanned for export files.
pub const DEFAULT_POSTS_DIR: &str = "fb_archive/posts";

/// Configuration for HTML export extraction.
///
/// The defaults match the class names used by Facebook's "Download Your
/// Information" pages.
///
/// # Example
///
/// ```rust
/// use postpack::config::HtmlConfig;
///
/// let config = HtmlConfig::new().with_edit_marker("Edited");
/// assert_eq!(config.container_class, "pam");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Class marking a post container `div` (default: `pam`)
    pub container_class: String,

    /// Class marking a content `div` inside a container (default: `_2pin`)
    pub content_class: String,

    /// Substring of the `href` that identifies the timestamp link
    /// (default: `facebook.com/dyi/`)
    pub timestamp_href_marker: String,

    /// Content elements whose text contains this are edit metadata and
    /// are dropped (default: `Updated`)
    pub edit_marker: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            container_class: "pam".to_string(),
            content_class: "_2pin".to_string(),
            timestamp_href_marker: "facebook.com/dyi/".to_string(),
            edit_marker: "Updated".to_string(),
        }
    }
}

impl HtmlConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the container class.
    #[must_use]
    pub fn with_container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = class.into();
        self
    }

    /// Sets the content class.
    #[must_use]
    pub fn with_content_class(mut self, class: impl Into<String>) -> Self {
        self.content_class = class.into();
        self
    }

    /// Sets the timestamp link marker.
    #[must_use]
    pub fn with_timestamp_href_marker(mut self, marker: impl Into<String>) -> Self {
        self.timestamp_href_marker = marker.into();
        self
    }

    /// Sets the edit marker.
    #[must_use]
    pub fn with_edit_marker(mut self, marker: impl Into<String>) -> Self {
        self.edit_marker = marker.into();
        self
    }
}

/// Configuration for JSON export extraction.
///
/// Exports have put the post list under different keys over time; they are
/// tried in order and the first one present wins.
///
/// # Example
///
/// ```rust
/// use postpack::config::JsonConfig;
///
/// let config = JsonConfig::new()
///     .with_list_keys(["timeline"])
///     .with_top_level_array(true);
/// assert_eq!(config.list_keys, vec!["timeline".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    /// Object keys that may hold the post list (default: `posts`, `status_updates`)
    pub list_keys: Vec<String>,

    /// Content used when an entry has no `data`, `title` or `text` (default: `No content`)
    pub placeholder: String,

    /// Treat a top-level array as the post list (default: false)
    pub accept_top_level_array: bool,

    /// Repair text that was UTF-8 encoded as Latin-1 (default: false)
    pub fix_encoding: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            list_keys: vec!["posts".to_string(), "status_updates".to_string()],
            placeholder: "No content".to_string(),
            accept_top_level_array: false,
            fix_encoding: false,
        }
    }
}

impl JsonConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the ordered list of post-list keys.
    #[must_use]
    pub fn with_list_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the placeholder content.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets whether a top-level array is accepted as the post list.
    #[must_use]
    pub fn with_top_level_array(mut self, accept: bool) -> Self {
        self.accept_top_level_array = accept;
        self
    }

    /// Enables or disables the Latin-1 mojibake repair.
    #[must_use]
    pub fn with_fix_encoding(mut self, fix: bool) -> Self {
        self.fix_encoding = fix;
        self
    }
}

/// Configuration for loading a whole archive directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Directory holding the export files (default: `fb_archive/posts`)
    pub posts_dir: PathBuf,

    /// Extractors to run, in order (default: HTML only)
    pub formats: Vec<ExportFormat>,

    /// HTML extractor settings
    pub html: HtmlConfig,

    /// JSON extractor settings
    pub json: JsonConfig,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from(DEFAULT_POSTS_DIR),
            formats: vec![ExportFormat::Html],
            html: HtmlConfig::default(),
            json: JsonConfig::default(),
        }
    }
}

impl ArchiveConfig {
    /// Creates a configuration for the given directory.
    pub fn new(posts_dir: impl Into<PathBuf>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            ..Self::default()
        }
    }

    /// Sets the formats to load.
    #[must_use]
    pub fn with_formats(mut self, formats: impl IntoIterator<Item = ExportFormat>) -> Self {
        self.formats = formats.into_iter().collect();
        self
    }

    /// Sets the HTML extractor settings.
    #[must_use]
    pub fn with_html(mut self, html: HtmlConfig) -> Self {
        self.html = html;
        self
    }

    /// Sets the JSON extractor settings.
    #[must_use]
    pub fn with_json(mut self, json: JsonConfig) -> Self {
        self.json = json;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_config_default() {
        let config = HtmlConfig::default();
        assert_eq!(config.container_class, "pam");
        assert_eq!(config.content_class, "_2pin");
        assert_eq!(config.timestamp_href_marker, "facebook.com/dyi/");
        assert_eq!(config.edit_marker, "Updated");
    }

    #[test]
    fn test_json_config_default() {
        let config = JsonConfig::default();
        assert_eq!(config.list_keys, ["posts", "status_updates"]);
        assert_eq!(config.placeholder, "No content");
        assert!(!config.accept_top_level_array);
        assert!(!config.fix_encoding);
    }

    #[test]
    fn test_json_config_builder() {
        let config = JsonConfig::new()
            .with_list_keys(["a", "b"])
            .with_placeholder("-")
            .with_top_level_array(true)
            .with_fix_encoding(true);

        assert_eq!(config.list_keys, ["a", "b"]);
        assert_eq!(config.placeholder, "-");
        assert!(config.accept_top_level_array);
        assert!(config.fix_encoding);
    }

    #[test]
    fn test_archive_config_default() {
        let config = ArchiveConfig::default();
        assert_eq!(config.posts_dir, PathBuf::from("fb_archive/posts"));
        assert_eq!(config.formats, vec![ExportFormat::Html]);
    }

    #[test]
    fn test_archive_config_deserialize_partial() {
        let config: ArchiveConfig =
            serde_json::from_str(r#"{"posts_dir": "/tmp/posts", "formats": ["html", "json"]}"#)
                .unwrap();
        assert_eq!(config.posts_dir, PathBuf::from("/tmp/posts"));
        assert_eq!(config.formats, vec![ExportFormat::Html, ExportFormat::Json]);
        assert_eq!(config.html, HtmlConfig::default());
    }
}
