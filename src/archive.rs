//! Loading an export directory into an [`Archive`].
//!
//! Loading never fails as a whole. A missing directory, an unreadable file or
//! a broken entry is logged and skipped, and the result says how many files
//! were actually processed:
//!
//! | Failure | Level | Effect |
//! |---------|-------|--------|
//! | directory missing or unlistable | error | empty result |
//! | file unreadable or unparseable | warn | file skipped |
//! | JSON entry unusable | warn | entry skipped |
//! | HTML container without post | debug | container skipped |
//!
//! # Example
//!
//! ```rust,no_run
//! use postpack::archive::load_archive;
//! use postpack::config::ArchiveConfig;
//! use postpack::PostFilter;
//!
//! # fn main() -> postpack::Result<()> {
//! let archive = load_archive(&ArchiveConfig::new("fb_archive/posts"));
//! println!("{} posts from {} files", archive.len(), archive.stats().processed_files);
//!
//! let filter = PostFilter::new().with_keyword("holiday");
//! for post in archive.filter(&filter) {
//!     println!("[{}] {}", post.timestamp().to_display_string(), post.content());
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::Post;
use crate::config::ArchiveConfig;
use crate::core::filter::{PostFilter, filter_posts};
use crate::extractor::{Extractor, create_extractor};
use crate::post::sort_posts;

/// Counters for one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Files with a matching extension.
    pub total_files: usize,
    /// Files that were read and parsed.
    pub processed_files: usize,
    /// Posts extracted.
    pub posts: usize,
}

impl LoadStats {
    /// Adds the counters of another load.
    pub fn merge(&mut self, other: LoadStats) {
        self.total_files += other.total_files;
        self.processed_files += other.processed_files;
        self.posts += other.posts;
    }

    /// Files that matched but could not be processed.
    pub fn failed_files(&self) -> usize {
        self.total_files.saturating_sub(self.processed_files)
    }
}

/// Posts from one directory scan plus its counters.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Posts sorted ascending by timestamp.
    pub posts: Vec<Post>,
    /// Counters for this scan.
    pub stats: LoadStats,
}

/// Runs `extractor` over every file in `dir` with the extractor's extension.
///
/// Files are visited in file-name order and the posts are sorted by
/// timestamp, with ties kept in visiting order.
pub fn scan_directory<E: Extractor + ?Sized>(extractor: &E, dir: &Path) -> Extraction {
    let extension = extractor.format().extension();
    let files = match list_files(dir, extension) {
        Ok(files) => files,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            error!(dir = %dir.display(), "posts directory not found");
            return Extraction::default();
        }
        Err(e) => {
            error!(dir = %dir.display(), error = %e, "failed to list posts directory");
            return Extraction::default();
        }
    };

    let mut extraction = Extraction::default();
    extraction.stats.total_files = files.len();

    for path in &files {
        debug!(file = %path.display(), "processing file");
        match extractor.extract_file(path) {
            Ok(posts) => {
                extraction.stats.processed_files += 1;
                extraction.posts.extend(posts);
            }
            Err(e) => warn!(file = %path.display(), error = %e, "skipping file"),
        }
    }

    sort_posts(&mut extraction.posts);
    extraction.stats.posts = extraction.posts.len();

    info!(
        format = %extractor.format(),
        processed = extraction.stats.processed_files,
        total = extraction.stats.total_files,
        posts = extraction.stats.posts,
        "finished scanning"
    );
    extraction
}

fn list_files(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// The loaded post collection.
///
/// Built once, then only read. Filtering returns references into it.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    posts: Vec<Post>,
    stats: LoadStats,
}

impl Archive {
    /// Builds an archive from posts, sorting them by timestamp.
    pub fn new(mut posts: Vec<Post>) -> Self {
        sort_posts(&mut posts);
        let stats = LoadStats {
            posts: posts.len(),
            ..LoadStats::default()
        };
        Self { posts, stats }
    }

    /// Builds an archive from already sorted posts and their counters.
    pub fn from_extraction(extraction: Extraction) -> Self {
        Self {
            posts: extraction.posts,
            stats: extraction.stats,
        }
    }

    /// All posts, ascending by timestamp.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Counters of the load that built this archive.
    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    /// Number of posts.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Returns `true` if there are no posts.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Iterates over the posts in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Post> {
        self.posts.iter()
    }

    /// Returns the posts matching `filter`, ascending by timestamp.
    pub fn filter(&self, filter: &PostFilter) -> Vec<&Post> {
        filter_posts(&self.posts, filter)
    }
}

impl<'a> IntoIterator for &'a Archive {
    type Item = &'a Post;
    type IntoIter = std::slice::Iter<'a, Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Loads every configured format from `config.posts_dir`.
///
/// Formats listed twice are loaded once. A format whose support was not
/// compiled in is logged and skipped.
pub fn load_archive(config: &ArchiveConfig) -> Archive {
    let mut seen = HashSet::new();
    let mut combined = Extraction::default();

    for &format in &config.formats {
        if !seen.insert(format) {
            continue;
        }
        let extractor = match create_extractor(format, config) {
            Ok(extractor) => extractor,
            Err(e) => {
                error!(%format, error = %e, "skipping format");
                continue;
            }
        };
        let extraction = extractor.extract_dir(&config.posts_dir);
        combined.stats.merge(extraction.stats);
        combined.posts.extend(extraction.posts);
    }

    sort_posts(&mut combined.posts);
    info!(
        dir = %config.posts_dir.display(),
        processed = combined.stats.processed_files,
        total = combined.stats.total_files,
        posts = combined.stats.posts,
        "archive loaded"
    );
    Archive::from_extraction(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::ExportFormat;
    use crate::extractors::JsonExtractor;
    use tempfile::tempdir;

    #[test]
    fn test_missing_directory_is_empty() {
        let extraction = JsonExtractor::new().extract_dir(Path::new("/no/such/posts/dir"));
        assert!(extraction.posts.is_empty());
        assert_eq!(extraction.stats, LoadStats::default());
    }

    #[test]
    fn test_path_is_a_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("posts.json");
        fs::write(&file, "{}").unwrap();
        let extraction = JsonExtractor::new().extract_dir(&file);
        assert!(extraction.posts.is_empty());
    }

    #[test]
    fn test_bad_file_is_counted_and_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.json"), r#"{"posts": [{"title": "ok"}]}"#).unwrap();
        fs::write(dir.path().join("b.json"), "not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let extraction = JsonExtractor::new().extract_dir(dir.path());
        assert_eq!(extraction.posts.len(), 1);
        assert_eq!(
            extraction.stats,
            LoadStats {
                total_files: 2,
                processed_files: 1,
                posts: 1
            }
        );
        assert_eq!(extraction.stats.failed_files(), 1);
    }

    #[test]
    fn test_scan_sorts_across_files() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"{"posts": [{"timestamp": "2022-01-01T00:00:00", "title": "late"}]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("b.json"),
            r#"{"posts": [{"timestamp": "2020-01-01T00:00:00", "title": "early"}]}"#,
        )
        .unwrap();

        let extraction = JsonExtractor::new().extract_dir(dir.path());
        let contents: Vec<_> = extraction.posts.iter().map(Post::content).collect();
        assert_eq!(contents, ["early", "late"]);
    }

    #[test]
    fn test_load_archive_deduplicates_formats() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.json"), r#"{"posts": [{"title": "x"}]}"#).unwrap();

        let config = ArchiveConfig::new(dir.path())
            .with_formats([ExportFormat::Json, ExportFormat::Json]);
        let archive = load_archive(&config);
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.stats().total_files, 1);
    }

    #[test]
    fn test_archive_new_sorts() {
        use crate::post::PostSource;
        use chrono::NaiveDate;

        let at = |y| {
            NaiveDate::from_ymd_opt(y, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        let archive = Archive::new(vec![
            Post::new(at(2023), "b", PostSource::file("x")),
            Post::new(at(2021), "a", PostSource::file("x")),
        ]);
        assert_eq!(archive.posts()[0].content(), "a");
        assert_eq!(archive.stats().posts, 2);
        assert_eq!((&archive).into_iter().count(), 2);
    }

    #[test]
    fn test_load_stats_merge() {
        let mut stats = LoadStats {
            total_files: 2,
            processed_files: 1,
            posts: 3,
        };
        stats.merge(LoadStats {
            total_files: 1,
            processed_files: 1,
            posts: 4,
        });
        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.processed_files, 2);
        assert_eq!(stats.posts, 7);
    }
}
