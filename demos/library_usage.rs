//! Example: Using postpack as a library
//!
//! This example demonstrates how to use postpack in your own projects.
//!
//! Run with: cargo run --example library_usage

use postpack::prelude::*;

const SAMPLE_HTML: &str = r#"<html><body>
<div class="pam _3-95">
  <div class="_2pin"><div>Back from the mountains!</div></div>
  <div class="_3-94"><a href="https://www.facebook.com/dyi/">July 14, 2019 at 6:12 PM</a></div>
</div>
<div class="pam _3-95">
  <div class="_2pin"><div>Happy new year everyone</div></div>
  <div class="_2pin">Updated January 2, 2020</div>
  <div class="_3-94"><a href="https://www.facebook.com/dyi/">January 1, 2020 at 12:01 AM</a></div>
</div>
</body></html>"#;

const SAMPLE_JSON: &str = r#"{"status_updates": [
  {"timestamp": 1546300800, "data": [{"post": "First post of 2019"}]},
  {"timestamp": "2019-07-15T09:00:00+02:00", "title": "Photos from the mountains"},
  {"title": "A post without a date"}
]}"#;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== postpack Library Usage Examples ===\n");

    // Example 1: Extract posts from HTML text
    println!("1. Extracting posts from an HTML page:");
    let html_posts = HtmlExtractor::new().extract_str(SAMPLE_HTML, "your_posts_1.html")?;
    for post in &html_posts {
        println!("   [{}] {}", post.timestamp().to_display_string(), post.content());
    }

    // Example 2: Extract posts from JSON text
    println!("\n2. Extracting posts from a JSON file:");
    let json_posts = JsonExtractor::new().extract_str(SAMPLE_JSON, "your_posts_1.json")?;
    for post in &json_posts {
        println!("   [{}] {}", post.timestamp(), post.content());
    }

    // Example 3: Build an archive from both
    println!("\n3. Combining into a sorted archive:");
    let archive = Archive::new(html_posts.into_iter().chain(json_posts).collect());
    println!("   {} posts", archive.len());
    for post in &archive {
        println!("   {} {}", post.timestamp(), post.content());
    }

    // Example 4: Filter by keyword
    println!("\n4. Filtering by keyword (\"mountains\"):");
    let filter = PostFilter::new().with_keyword("mountains");
    for post in archive.filter(&filter) {
        println!("   {}", post.content());
    }

    // Example 5: Filter by date range
    println!("\n5. Filtering by date (2019 only):");
    let filter = PostFilter::new()
        .with_start_date("2019-01-01")?
        .with_end_date("2019-12-31")?;
    for post in archive.filter(&filter) {
        println!("   {}", post.content());
    }

    // Example 6: Pagination
    println!("\n6. Paginating results (2 per page):");
    let page = paginate(archive.filter(&PostFilter::new()), 2, 2);
    println!(
        "   Page {} of {}: {} posts, has next: {}",
        page.page,
        page.total_pages(),
        page.items.len(),
        page.has_next()
    );

    // Example 7: CSV export
    println!("\n7. CSV export:");
    print!("{}", to_csv(archive.iter())?);

    // Example 8: Loading a directory
    println!("\n8. Loading a directory:");
    let config = ArchiveConfig::new("fb_archive/posts").with_formats(ExportFormat::all().iter().copied());
    let loaded = load_archive(&config);
    let stats = loaded.stats();
    println!(
        "   {} posts from {} of {} files",
        loaded.len(),
        stats.processed_files,
        stats.total_files
    );

    println!("\n=== Examples complete! ===");
    Ok(())
}
