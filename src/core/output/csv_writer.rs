//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::Post;
use crate::error::Result;

/// Column names of the export.
pub const CSV_HEADER: [&str; 2] = ["Timestamp", "Content"];

/// Default file name of the export.
pub const DEFAULT_EXPORT_FILE: &str = "facebook_posts_export.csv";

/// Writes posts as CSV to any writer and returns the number of rows.
///
/// # Format
/// - Delimiter: `,`
/// - Record terminator: `\r\n`
/// - Columns: `Timestamp`, `Content`
/// - Timestamp: ISO-8601, with offset only when the source had one
/// - Encoding: UTF-8
pub fn write_csv<'a, I, W>(posts: I, writer: W) -> Result<usize>
where
    I: IntoIterator<Item = &'a Post>,
    W: Write,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    writer.write_record(CSV_HEADER)?;

    let mut rows = 0;
    for post in posts {
        writer.write_record([post.timestamp().to_iso_string().as_str(), post.content()])?;
        rows += 1;
    }

    writer.flush()?;
    Ok(rows)
}

/// Writes posts as CSV to a file, replacing it if it exists.
pub fn write_csv_file<'a, I>(posts: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = &'a Post>,
{
    let file = File::create(path)?;
    write_csv(posts, file)
}

/// Renders posts as a CSV string.
pub fn to_csv<'a, I>(posts: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut buffer = Vec::new();
    write_csv(posts, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
