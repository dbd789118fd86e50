//! JSON export parsing utilities.
//!
//! A JSON export file holds a list of post entries, either under one of the
//! configured keys of a top-level object or as a top-level array:
//!
//! ```json
//! {"status_updates": [
//!   {"timestamp": "2021-01-01T15:00:00", "data": [{"post": "hello"}, {"post": "world"}]},
//!   {"title": "Shared a memory"}
//! ]}
//! ```

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::Post;
use crate::config::JsonConfig;
use crate::error::{ArchiveError, Result};
use crate::parsing::timestamp::{parse_iso_timestamp, parse_offset_timestamp, parse_unix_timestamp};
use crate::post::{PostSource, Timestamp};

/// Why a single JSON entry produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// The entry is not a JSON object.
    #[error("entry is a {0}, expected an object")]
    NotAnObject(&'static str),

    /// The timestamp string matched no known layout.
    #[error("unrecognized timestamp '{0}'")]
    InvalidTimestamp(String),

    /// The timestamp is neither a string nor an integer.
    #[error("timestamp is a {0}, expected a string or an integer")]
    UnsupportedTimestamp(&'static str),

    /// `data` is present but is not an array of objects.
    #[error("'data' must be an array of objects")]
    InvalidData,

    /// A text field is present but is not a string.
    #[error("'{0}' is not a string")]
    NonStringField(&'static str),
}

/// Where a document keeps its post list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PostList<'a> {
    /// Found under an object key.
    Key {
        /// The key that matched.
        key: &'a str,
        /// The entries.
        entries: &'a [Value],
    },
    /// The document itself is the list.
    TopLevel(&'a [Value]),
    /// An object with none of the known keys.
    Missing,
}

impl<'a> PostList<'a> {
    /// Returns the entries, empty for [`PostList::Missing`].
    pub fn entries(&self) -> &'a [Value] {
        match self {
            PostList::Key { entries, .. } | PostList::TopLevel(entries) => entries,
            PostList::Missing => &[],
        }
    }
}

/// Locates the post list in a parsed document.
///
/// Keys are tried in configuration order and the first one present wins.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidFormat`] if the matching key holds
/// something other than an array, or if the document is neither an object
/// nor an accepted top-level array.
pub fn find_post_list<'a>(document: &'a Value, config: &'a JsonConfig) -> Result<PostList<'a>> {
    match document {
        Value::Object(map) => {
            let Some((key, value)) = config
                .list_keys
                .iter()
                .find_map(|key| map.get(key).map(|value| (key.as_str(), value)))
            else {
                return Ok(PostList::Missing);
            };
            match value {
                Value::Array(entries) => Ok(PostList::Key { key, entries }),
                other => Err(ArchiveError::invalid_format(
                    "JSON",
                    format!("'{key}' is a {}, expected an array", type_name(other)),
                )),
            }
        }
        Value::Array(entries) if config.accept_top_level_array => Ok(PostList::TopLevel(entries)),
        other => Err(ArchiveError::invalid_format(
            "JSON",
            format!("top-level value is a {}, expected an object", type_name(other)),
        )),
    }
}

/// Parses every entry of one JSON document, in file order.
///
/// Entries that fail are logged at warn level and skipped.
///
/// # Errors
///
/// Returns an error if the text is not valid JSON or if
/// [`find_post_list`] rejects the document.
pub fn parse_json_document(content: &str, config: &JsonConfig, source: &str) -> Result<Vec<Post>> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| ArchiveError::json_parse(e, None))?;
    let list = find_post_list(&document, config)?;

    match list {
        PostList::Key { key, entries } => {
            debug!(file = source, key, entries = entries.len(), "found post list");
        }
        PostList::TopLevel(entries) => {
            debug!(file = source, entries = entries.len(), "found top-level post list");
        }
        PostList::Missing => debug!(file = source, "no post list in document"),
    }

    let mut posts = Vec::with_capacity(list.entries().len());
    for (index, entry) in list.entries().iter().enumerate() {
        match parse_json_entry(entry, config) {
            Ok(post) => posts.push(post),
            Err(e) => warn!(file = source, entry = index + 1, error = %e, "skipping JSON entry"),
        }
    }
    Ok(posts)
}

/// Builds a [`Post`] from one entry. The entry itself becomes the source.
pub fn parse_json_entry(entry: &Value, config: &JsonConfig) -> std::result::Result<Post, EntryError> {
    let Value::Object(fields) = entry else {
        return Err(EntryError::NotAnObject(type_name(entry)));
    };

    let timestamp = entry_timestamp(fields.get("timestamp"))?;
    let mut content = entry_content(fields, &config.placeholder)?;
    if config.fix_encoding {
        content = fix_mojibake_encoding(&content);
    }

    Ok(Post::new(timestamp, content, PostSource::Raw(entry.clone())))
}

/// Reads the `timestamp` field.
///
/// Absent, `null` and `""` all give [`Timestamp::epoch`]. Strings with a
/// `T` are ISO-8601, other strings are `YYYY-MM-DD HH:MM:SS±ZZZZ`, and
/// integers are Unix seconds.
pub fn entry_timestamp(value: Option<&Value>) -> std::result::Result<Timestamp, EntryError> {
    match value {
        None | Some(Value::Null) => Ok(Timestamp::epoch()),
        Some(Value::String(raw)) if raw.is_empty() => Ok(Timestamp::epoch()),
        Some(Value::String(raw)) => {
            let parsed = if raw.contains('T') {
                parse_iso_timestamp(raw)
            } else {
                parse_offset_timestamp(raw)
            };
            parsed.ok_or_else(|| EntryError::InvalidTimestamp(raw.clone()))
        }
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(parse_unix_timestamp)
            .ok_or_else(|| EntryError::InvalidTimestamp(n.to_string())),
        Some(other) => Err(EntryError::UnsupportedTimestamp(type_name(other))),
    }
}

/// Assembles the entry text.
///
/// `data[].post` values are concatenated with single spaces; without `data`
/// the `title` is used, then `text`, then `placeholder`.
pub fn entry_content(
    fields: &Map<String, Value>,
    placeholder: &str,
) -> std::result::Result<String, EntryError> {
    if let Some(data) = fields.get("data") {
        let Value::Array(items) = data else {
            return Err(EntryError::InvalidData);
        };
        let mut content = String::new();
        for item in items {
            let Value::Object(item) = item else {
                return Err(EntryError::InvalidData);
            };
            content.push_str(string_field(item, "post")?.unwrap_or(""));
            content.push(' ');
        }
        return Ok(content.trim().to_string());
    }

    if let Some(title) = string_field(fields, "title")? {
        return Ok(title.to_string());
    }
    if let Some(text) = string_field(fields, "text")? {
        return Ok(text.to_string());
    }
    Ok(placeholder.to_string())
}

fn string_field<'a>(
    fields: &'a Map<String, Value>,
    key: &'static str,
) -> std::result::Result<Option<&'a str>, EntryError> {
    match fields.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(EntryError::NonStringField(key)),
    }
}

/// Repairs text whose UTF-8 bytes were stored one code point per byte.
///
/// Facebook JSON exports write `"café"` as `"cafÃ©"`: each byte of the
/// UTF-8 encoding became its own Latin-1 code point. Text with any code
/// point above U+00FF cannot be mojibake of this kind and is returned
/// unchanged, as is text whose bytes don't form valid UTF-8.
pub fn fix_mojibake_encoding(s: &str) -> String {
    if s.is_ascii() {
        return s.to_string();
    }
    let bytes: Option<Vec<u8>> = s.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect();
    bytes
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| s.to_string())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use serde_json::json;

    fn parse(content: &str) -> Vec<Post> {
        parse_json_document(content, &JsonConfig::default(), "posts.json").unwrap()
    }

    #[test]
    fn test_posts_key() {
        let posts = parse(r#"{"posts": [{"timestamp": "2021-01-01T15:00:00", "title": "Hi"}]}"#);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content(), "Hi");
        assert_eq!(posts[0].timestamp().to_iso_string(), "2021-01-01T15:00:00");
    }

    #[test]
    fn test_status_updates_key() {
        let posts = parse(r#"{"status_updates": [{"text": "From status"}]}"#);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content(), "From status");
    }

    #[test]
    fn test_posts_key_wins_over_status_updates() {
        let posts = parse(r#"{"status_updates": [{"text": "b"}], "posts": [{"text": "a"}]}"#);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content(), "a");
    }

    #[test]
    fn test_object_without_known_key_is_empty() {
        assert!(parse(r#"{"comments": [{"text": "x"}]}"#).is_empty());
    }

    #[test]
    fn test_top_level_array_when_enabled() {
        let config = JsonConfig::new().with_top_level_array(true);
        let posts =
            parse_json_document(r#"[{"text": "one"}, {"text": "two"}]"#, &config, "a.json").unwrap();
        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn test_top_level_array_rejected_by_default() {
        let err = parse_json_document(r#"[{"text": "one"}]"#, &JsonConfig::default(), "a.json")
            .unwrap_err();
        assert!(err.is_invalid_format());
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_non_array_posts_key_is_file_error() {
        let err = parse_json_document(r#"{"posts": {"a": 1}}"#, &JsonConfig::default(), "a.json")
            .unwrap_err();
        assert!(err.is_invalid_format());
        assert!(err.to_string().contains("'posts'"));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = parse_json_document("{not json", &JsonConfig::default(), "a.json").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_missing_timestamp_uses_epoch() {
        let posts = parse(r#"{"posts": [{"title": "x"}, {"timestamp": null, "title": "y"}, {"timestamp": "", "title": "z"}]}"#);
        assert_eq!(posts.len(), 3);
        for post in &posts {
            assert_eq!(post.timestamp(), Timestamp::epoch());
        }
    }

    #[test]
    fn test_data_posts_are_joined() {
        let posts = parse(r#"{"posts": [{"data": [{"post": "hello"}, {"post": "world"}]}]}"#);
        assert_eq!(posts[0].content(), "hello world");
    }

    #[test]
    fn test_data_without_post_gives_empty_content() {
        let posts = parse(r#"{"posts": [{"data": [{"update_timestamp": 1}], "title": "ignored"}]}"#);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content(), "");
    }

    #[test]
    fn test_placeholder_content() {
        let posts = parse(r#"{"posts": [{"timestamp": "2021-01-01T00:00:00"}]}"#);
        assert_eq!(posts[0].content(), "No content");
    }

    #[test]
    fn test_title_before_text() {
        let posts = parse(r#"{"posts": [{"title": "T", "text": "X"}]}"#);
        assert_eq!(posts[0].content(), "T");
    }

    #[test]
    fn test_source_is_raw_entry() {
        let posts = parse(r#"{"posts": [{"title": "T", "extra": 5}]}"#);
        assert_eq!(posts[0].source().raw(), Some(&json!({"title": "T", "extra": 5})));
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let posts = parse(
            r#"{"posts": [
                {"timestamp": "yesterday", "title": "bad ts"},
                {"timestamp": 1.5, "title": "float ts"},
                {"title": 42},
                {"data": "nope"},
                "just a string",
                {"timestamp": "2021-01-01T15:00:00Z", "title": "good"}
            ]}"#,
        );
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content(), "good");
    }

    #[test]
    fn test_entry_errors() {
        let config = JsonConfig::default();
        let cases = [
            (json!("x"), EntryError::NotAnObject("string")),
            (json!({"timestamp": "soon"}), EntryError::InvalidTimestamp("soon".into())),
            (json!({"timestamp": true}), EntryError::UnsupportedTimestamp("boolean")),
            (json!({"data": [1]}), EntryError::InvalidData),
            (json!({"data": [{"post": 1}]}), EntryError::NonStringField("post")),
            (json!({"text": ["a"]}), EntryError::NonStringField("text")),
        ];
        for (entry, expected) in cases {
            assert_eq!(parse_json_entry(&entry, &config).unwrap_err(), expected);
        }
    }

    #[test]
    fn test_timestamp_strategies() {
        let offset = entry_timestamp(Some(&json!("2020-06-15 08:30:00+0200"))).unwrap();
        let expected = FixedOffset::east_opt(7200)
            .unwrap()
            .with_ymd_and_hms(2020, 6, 15, 8, 30, 0)
            .unwrap();
        assert_eq!(offset, Timestamp::Zoned(expected));

        let naive = entry_timestamp(Some(&json!("2020-06-15T08:30:00"))).unwrap();
        let expected = NaiveDate::from_ymd_opt(2020, 6, 15)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        assert_eq!(naive, Timestamp::Naive(expected));

        let unix = entry_timestamp(Some(&json!(1609513200))).unwrap();
        assert_eq!(unix.to_iso_string(), "2021-01-01T15:00:00+00:00");

        // no offset and no T separator
        assert!(entry_timestamp(Some(&json!("2020-06-15 08:30:00"))).is_err());
    }

    #[test]
    fn test_fix_encoding_option() {
        let config = JsonConfig::new().with_fix_encoding(true);
        let entry = json!({"title": "\u{d0}\u{9f}\u{d1}\u{80}\u{d0}\u{b8}\u{d0}\u{b2}\u{d0}\u{b5}\u{d1}\u{82}"});
        let post = parse_json_entry(&entry, &config).unwrap();
        assert_eq!(post.content(), "Привет");
    }

    #[test]
    fn test_fix_mojibake_encoding() {
        assert_eq!(fix_mojibake_encoding("Hello"), "Hello");
        assert_eq!(fix_mojibake_encoding("cafÃ©"), "café");
        // already correct text is left alone
        assert_eq!(fix_mojibake_encoding("Привет"), "Привет");
        assert_eq!(fix_mojibake_encoding("café"), "café");
    }

    #[test]
    fn test_custom_list_keys() {
        let config = JsonConfig::new().with_list_keys(["timeline"]);
        let posts = parse_json_document(r#"{"timeline": [{"text": "x"}], "posts": []}"#, &config, "t.json")
            .unwrap();
        assert_eq!(posts.len(), 1);
    }
}
