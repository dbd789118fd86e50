//! Benchmarks for postpack extraction and filtering.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- html`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use postpack::core::output::to_csv;
use postpack::core::{PostFilter, filter_posts};
use postpack::extractor::Extractor;
use postpack::extractors::{HtmlExtractor, JsonExtractor};
use postpack::parsing::parse_display_timestamp;
use postpack::{Post, PostSource};

use chrono::{Duration, NaiveDate};

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_html(count: usize) -> String {
    let mut html = String::from("<html><body>");
    for i in 0..count {
        let month = MONTHS[i % 12];
        let day = i % 28 + 1;
        let hour = i % 12 + 1;
        html.push_str(&format!(
            r#"<div class="pam _3-95 _2pi0 _2lej uiBoxWhite noborder">
<div class="_3-96 _2pio _2lek _2lel"><div class="_2pin"><div>Post number {i} about holidays</div></div></div>
<div class="_3-96 _2pio _2lek _2lel"><div class="_2pin">Updated {month} {day}, 2020</div></div>
<div class="_3-94 _2lem"><a href="https://www.facebook.com/dyi/?referrer=yfi_settings">{month} {day}, 2019 at {hour}:30 PM</a></div>
</div>"#
        ));
    }
    html.push_str("</body></html>");
    html
}

fn generate_json(count: usize) -> String {
    let mut entries = Vec::with_capacity(count);
    for i in 0..count {
        let timestamp = 1_546_300_800 + (i as i64 * 3_600);
        entries.push(format!(
            r#"{{"timestamp": {timestamp}, "data": [{{"post": "Status {i}"}}, {{"post": "with more text"}}], "title": "Someone updated their status."}}"#
        ));
    }
    format!(r#"{{"status_updates": [{}]}}"#, entries.join(",\n"))
}

fn generate_posts(count: usize) -> Vec<Post> {
    let base = NaiveDate::from_ymd_opt(2015, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    // Reverse order so filtering has to sort.
    (0..count)
        .rev()
        .map(|i| {
            let content = if i % 10 == 0 {
                format!("Happy birthday #{i}!")
            } else {
                format!("Ordinary post {i}")
            };
            Post::new(
                base + Duration::hours(i as i64),
                content,
                PostSource::file("your_posts_1.html"),
            )
        })
        .collect()
}

// =============================================================================
// Extraction Benchmarks
// =============================================================================

fn bench_html_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("html_extraction");
    let extractor = HtmlExtractor::new();

    for size in [100_usize, 1_000, 5_000] {
        let html = generate_html(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &html, |b, html| {
            b.iter(|| {
                let posts = extractor.extract_str(black_box(html), "bench.html").unwrap();
                black_box(posts)
            });
        });
    }
    group.finish();
}

fn bench_json_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_extraction");
    let extractor = JsonExtractor::new();

    for size in [100_usize, 1_000, 10_000] {
        let json = generate_json(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| {
                let posts = extractor.extract_str(black_box(json), "bench.json").unwrap();
                black_box(posts)
            });
        });
    }
    group.finish();
}

fn bench_display_timestamp(c: &mut Criterion) {
    let inputs = [
        "January 1, 2021 at 3:00 PM",
        "Friday, January 1, 2021 at 3:00:15 PM UTC+01",
        "1 January 2021 15:00",
        "01/01/2021",
    ];
    c.bench_function("display_timestamp", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(parse_display_timestamp(black_box(input)));
            }
        });
    });
}

// =============================================================================
// Filter Benchmarks
// =============================================================================

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let filter = PostFilter::new()
        .with_keyword("BIRTHDAY")
        .with_start_date("2015-06-01")
        .unwrap();

    for size in [1_000_usize, 10_000, 100_000] {
        let posts = generate_posts(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &posts, |b, posts| {
            b.iter(|| black_box(filter_posts(posts, &filter)));
        });
    }
    group.finish();
}

// =============================================================================
// Output Benchmarks
// =============================================================================

fn bench_output_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("output_csv");

    for size in [1_000_usize, 10_000] {
        let posts = generate_posts(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &posts, |b, posts| {
            b.iter(|| black_box(to_csv(posts).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_html_extraction,
    bench_json_extraction,
    bench_display_timestamp,
    bench_filter,
    bench_output_csv,
);
criterion_main!(benches);
