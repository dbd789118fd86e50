//! JSON export extractor.

use crate::Post;
use crate::config::JsonConfig;
use crate::error::Result;
use crate::extractor::{ExportFormat, Extractor};
use crate::parsing::json::parse_json_document;

/// Extractor for JSON exports.
///
/// # Example
///
/// ```rust
/// use postpack::extractor::Extractor;
/// use postpack::extractors::JsonExtractor;
///
/// let json = r#"{"posts": [{"timestamp": "2021-01-01T15:00:00Z", "title": "Hi"}]}"#;
/// let posts = JsonExtractor::new().extract_str(json, "your_posts.json")?;
/// assert_eq!(posts[0].content(), "Hi");
/// # Ok::<(), postpack::ArchiveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonExtractor {
    config: JsonConfig,
}

impl JsonExtractor {
    /// Creates an extractor with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with custom configuration.
    pub fn with_config(config: JsonConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &JsonConfig {
        &self.config
    }
}

impl Extractor for JsonExtractor {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn extract_str(&self, content: &str, source: &str) -> Result<Vec<Post>> {
        parse_json_document(content, &self.config, source)
    }
}
