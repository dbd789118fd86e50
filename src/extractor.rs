//! Extractor trait and export format selection.
//!
//! An [`Extractor`] turns the files of one export format into [`Post`]s.
//! Use [`create_extractor`] to pick one at runtime from an [`ExportFormat`].
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "html")]
//! # fn main() -> postpack::Result<()> {
//! use postpack::config::ArchiveConfig;
//! use postpack::extractor::{ExportFormat, create_extractor};
//!
//! let extractor = create_extractor(ExportFormat::Html, &ArchiveConfig::default())?;
//! let html = r#"<div class="pam">
//!     <div class="_2pin">Hello there</div>
//!     <a href="https://www.facebook.com/dyi/x">January 1, 2021 at 3:00 PM</a>
//! </div>"#;
//!
//! let posts = extractor.extract_str(html, "posts.html")?;
//! assert_eq!(posts.len(), 1);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "html"))]
//! # fn main() {}
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Post;
use crate::archive::{Extraction, scan_directory};
use crate::config::ArchiveConfig;
use crate::error::{ArchiveError, Result};

/// Kind of export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// HTML pages from the "Download Your Information" archive
    Html,
    /// JSON files from the same archive
    Json,
}

impl ExportFormat {
    /// Returns the file extension (without the dot) of this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
        }
    }

    /// Returns all format names accepted by [`FromStr`](std::str::FromStr).
    pub fn all_names() -> &'static [&'static str] {
        &["html", "json"]
    }

    /// Returns all formats.
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Html, ExportFormat::Json]
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Html => write!(f, "HTML"),
            ExportFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(ExportFormat::Html),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ExportFormat::all_names().join(", ")
            )),
        }
    }
}

/// Extracts posts from export files of one format.
///
/// Implementors provide [`extract_str`](Extractor::extract_str); reading
/// files and scanning directories come for free.
///
/// # Example Implementation
///
/// ```rust,ignore
/// impl Extractor for MyExtractor {
///     fn name(&self) -> &'static str { "Mine" }
///     fn format(&self) -> ExportFormat { ExportFormat::Json }
///
///     fn extract_str(&self, content: &str, source: &str) -> Result<Vec<Post>> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// Returns the human-readable name of this extractor.
    fn name(&self) -> &'static str;

    /// Returns the format this extractor handles.
    fn format(&self) -> ExportFormat;

    /// Extracts posts from the text of one export file, in document order.
    ///
    /// `source` names the file in logs and in [`PostSource::File`](crate::PostSource::File).
    ///
    /// # Errors
    ///
    /// Returns an error only when the file as a whole is unusable; single
    /// posts that fail are skipped.
    fn extract_str(&self, content: &str, source: &str) -> Result<Vec<Post>>;

    /// Reads a file as UTF-8 and extracts its posts.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Io`] if the file cannot be read, or the
    /// error of [`extract_str`](Extractor::extract_str) with the path attached.
    fn extract_file(&self, path: &Path) -> Result<Vec<Post>> {
        let content = fs::read_to_string(path)?;
        let source = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
        self.extract_str(&content, &source)
            .map_err(|e| e.with_path(path))
    }

    /// Extracts every matching file in `dir`, sorted by timestamp.
    ///
    /// Never fails; see [`scan_directory`].
    fn extract_dir(&self, dir: &Path) -> Extraction {
        scan_directory(self, dir)
    }
}

/// Creates the extractor for `format`, configured from `config`.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidFormat`] if support for `format` was not
/// compiled in.
pub fn create_extractor(format: ExportFormat, config: &ArchiveConfig) -> Result<Box<dyn Extractor>> {
    match format {
        #[cfg(feature = "html")]
        ExportFormat::Html => Ok(Box::new(crate::extractors::HtmlExtractor::with_config(
            config.html.clone(),
        ))),
        ExportFormat::Json => Ok(Box::new(crate::extractors::JsonExtractor::with_config(
            config.json.clone(),
        ))),
        #[allow(unreachable_patterns)]
        _ => Err(ArchiveError::invalid_format(
            "HTML",
            format!("{format} support is not enabled. Enable the `html` feature."),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(ExportFormat::from_str("html").unwrap(), ExportFormat::Html);
        assert_eq!(ExportFormat::from_str("HTM").unwrap(), ExportFormat::Html);
        assert_eq!(ExportFormat::from_str("Json").unwrap(), ExportFormat::Json);

        let err = ExportFormat::from_str("xml").unwrap_err();
        assert!(err.contains("xml"));
        assert!(err.contains("html, json"));
    }

    #[test]
    fn test_format_display_and_extension() {
        assert_eq!(ExportFormat::Html.to_string(), "HTML");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::all().len(), 2);
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&ExportFormat::Json).unwrap();
        assert_eq!(json, "\"json\"");
        let back: ExportFormat = serde_json::from_str("\"html\"").unwrap();
        assert_eq!(back, ExportFormat::Html);
    }

    #[test]
    fn test_create_json_extractor() {
        let extractor = create_extractor(ExportFormat::Json, &ArchiveConfig::default()).unwrap();
        assert_eq!(extractor.format(), ExportFormat::Json);
        assert_eq!(extractor.name(), "JSON");
    }

    #[cfg(feature = "html")]
    #[test]
    fn test_create_html_extractor() {
        let extractor = create_extractor(ExportFormat::Html, &ArchiveConfig::default()).unwrap();
        assert_eq!(extractor.format(), ExportFormat::Html);
    }

    #[test]
    fn test_extract_file_missing() {
        let extractor = create_extractor(ExportFormat::Json, &ArchiveConfig::default()).unwrap();
        let err = extractor
            .extract_file(Path::new("/definitely/not/here.json"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_extract_file_parse_error_has_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{oops").unwrap();

        let extractor = create_extractor(ExportFormat::Json, &ArchiveConfig::default()).unwrap();
        let err = extractor.extract_file(&path).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("broken.json"));
    }
}
