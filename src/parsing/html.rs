//! HTML export parsing utilities.
//!
//! A post container is a `div` carrying the container class. Inside it, a
//! link into the export's own timeline holds the date as visible text, and
//! one or more `div`s carrying the content class hold the post text.
//!
//! ```html
//! <div class="pam">
//!   <div class="_2pin"><div>Hello there</div></div>
//!   <div class="_2pin">Updated Jan 2, 2021</div>
//!   <a href="https://www.facebook.com/dyi/...">January 1, 2021 at 3:00 PM</a>
//! </div>
//! ```

use std::fmt;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::Post;
use crate::config::HtmlConfig;
use crate::error::{ArchiveError, Result};
use crate::parsing::timestamp::parse_display_timestamp;
use crate::post::PostSource;

/// Why a post container produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerSkip {
    /// No link matching the timeline marker.
    MissingTimestampLink,
    /// The link text matched no known date layout.
    UnparseableTimestamp(String),
    /// Nothing left after dropping edit-metadata elements.
    EmptyContent,
}

impl fmt::Display for ContainerSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerSkip::MissingTimestampLink => write!(f, "no timestamp link"),
            ContainerSkip::UnparseableTimestamp(text) => {
                write!(f, "unrecognized timestamp '{text}'")
            }
            ContainerSkip::EmptyContent => write!(f, "empty content"),
        }
    }
}

/// Compiled selectors for one [`HtmlConfig`].
#[derive(Debug)]
pub struct HtmlSelectors {
    container: Selector,
    link: Selector,
    content: Selector,
}

impl HtmlSelectors {
    /// Compiles the selectors for the configured class markers.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidFormat`] if a class marker is not a
    /// valid CSS class name.
    pub fn compile(config: &HtmlConfig) -> Result<Self> {
        Ok(Self {
            container: class_selector(&config.container_class)?,
            link: parse_selector("a[href]")?,
            content: class_selector(&config.content_class)?,
        })
    }
}

fn class_selector(class: &str) -> Result<Selector> {
    parse_selector(&format!("div.{class}"))
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ArchiveError::invalid_format("HTML", format!("invalid selector '{css}': {e:?}")))
}

/// Extracts every post from one HTML document.
///
/// Containers that don't yield a post are logged at debug level and skipped;
/// they never affect the other containers.
pub fn parse_html_document(
    html: &str,
    selectors: &HtmlSelectors,
    config: &HtmlConfig,
    source: &str,
) -> Vec<Post> {
    let document = Html::parse_document(html);
    let containers: Vec<ElementRef> = document.select(&selectors.container).collect();
    debug!(file = source, containers = containers.len(), "scanning post containers");

    let mut posts = Vec::new();
    for (index, container) in containers.into_iter().enumerate() {
        match parse_post_container(container, selectors, config, source) {
            Ok(post) => {
                debug!(
                    file = source,
                    post = index + 1,
                    timestamp = %post.timestamp(),
                    content = %preview(post.content()),
                    "extracted post"
                );
                posts.push(post);
            }
            Err(skip) => {
                debug!(
                    file = source,
                    post = index + 1,
                    reason = %skip,
                    snippet = %preview(&container.html()),
                    "skipped post container"
                );
            }
        }
    }
    posts
}

/// Builds a [`Post`] from a single container element.
pub fn parse_post_container(
    container: ElementRef<'_>,
    selectors: &HtmlSelectors,
    config: &HtmlConfig,
    source: &str,
) -> std::result::Result<Post, ContainerSkip> {
    let link = find_timestamp_link(container, selectors, &config.timestamp_href_marker)
        .ok_or(ContainerSkip::MissingTimestampLink)?;

    let link_text: String = link.text().collect();
    let link_text = link_text.trim();
    let timestamp = parse_display_timestamp(link_text)
        .ok_or_else(|| ContainerSkip::UnparseableTimestamp(link_text.to_string()))?;

    let content = collect_content(container, selectors, &config.edit_marker);
    if content.is_empty() {
        return Err(ContainerSkip::EmptyContent);
    }

    Ok(Post::new(timestamp, content, PostSource::file(source)))
}

fn find_timestamp_link<'a>(
    container: ElementRef<'a>,
    selectors: &HtmlSelectors,
    marker: &str,
) -> Option<ElementRef<'a>> {
    container
        .select(&selectors.link)
        .find(|a| a.value().attr("href").is_some_and(|href| href.contains(marker)))
}

/// Joins the trimmed text fragments of every content element, skipping
/// elements whose text contains `edit_marker`.
pub fn collect_content(container: ElementRef<'_>, selectors: &HtmlSelectors, edit_marker: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for element in container.select(&selectors.content) {
        let full_text: String = element.text().collect();
        if full_text.contains(edit_marker) {
            continue;
        }
        parts.extend(element.text().map(str::trim).filter(|s| !s.is_empty()));
    }

    parts.join(" ").trim().to_string()
}

fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 200;
    if text.chars().count() <= MAX_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX_CHARS).collect();
    format!("{cut}...")
}
