//! HTML export extractor.
//!
//! Each HTML page of the archive lists posts as `div` containers. See
//! [`parsing::html`](crate::parsing::html) for the page structure.

use crate::Post;
use crate::config::HtmlConfig;
use crate::error::Result;
use crate::extractor::{ExportFormat, Extractor};
use crate::parsing::html::{HtmlSelectors, parse_html_document};

/// Extractor for HTML exports.
///
/// # Example
///
/// ```rust,no_run
/// use postpack::extractor::Extractor;
/// use postpack::extractors::HtmlExtractor;
///
/// let extractor = HtmlExtractor::new();
/// let posts = extractor.extract_file("fb_archive/posts/your_posts_1.html".as_ref())?;
/// # Ok::<(), postpack::ArchiveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlExtractor {
    config: HtmlConfig,
}

impl HtmlExtractor {
    /// Creates an extractor with the default markers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with custom markers.
    pub fn with_config(config: HtmlConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &HtmlConfig {
        &self.config
    }
}

impl Extractor for HtmlExtractor {
    fn name(&self) -> &'static str {
        "HTML"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }

    fn extract_str(&self, content: &str, source: &str) -> Result<Vec<Post>> {
        let selectors = HtmlSelectors::compile(&self.config)?;
        Ok(parse_html_document(content, &selectors, &self.config, source))
    }
}
