//! # postpack CLI
//!
//! Browse, serve or export posts from a Facebook data archive.

use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser as ClapParser;

use postpack::ArchiveError;
use postpack::archive::{Archive, load_archive};
use postpack::cli::{Args, Command, ExportArgs};
use postpack::core::output::{write_csv, write_csv_file};
use postpack::logging::init_tracing;
use postpack::menu::Menu;
use postpack::web;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ArchiveError> {
    let args = <Args as ClapParser>::parse();

    if let Err(e) = init_tracing(args.log_level) {
        eprintln!("⚠️  Logging disabled: {}", e);
    }

    let command = args.command();

    // Bad dates fail before the archive is read.
    let export_filter = match command {
        Command::Export(ref export) => Some(export.filter()?),
        _ => None,
    };

    let load_start = Instant::now();
    let archive = load_archive(&args.archive_config());
    let load_time = load_start.elapsed();

    match command {
        Command::Browse { page_size } => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            Menu::new(&archive, stdin.lock(), stdout.lock())
                .with_page_size(page_size)
                .run()?;
        }
        Command::Serve { .. } => {
            let config = command.server_config().unwrap_or_default();
            println!("📦 postpack v{}", env!("CARGO_PKG_VERSION"));
            println!("📂 Loaded {} posts from {}", archive.len(), args.dir.display());
            println!("🌐 Serving on http://{}", config.bind_addr);
            web::run_blocking(Arc::new(archive), config)?;
        }
        Command::Export(ref export) => {
            let filter = export_filter.unwrap_or_default();
            let posts = archive.filter(&filter);
            export_csv(&archive, &posts, export, load_time.as_secs_f64())?;
        }
    }

    Ok(())
}

fn export_csv(
    archive: &Archive,
    posts: &[&postpack::Post],
    export: &ExportArgs,
    load_secs: f64,
) -> Result<(), ArchiveError> {
    if export.to_stdout() {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_csv(posts.iter().copied(), &mut handle)?;
        handle.flush()?;
        return Ok(());
    }

    let written = write_csv_file(posts.iter().copied(), Path::new(&export.output))?;
    let stats = archive.stats();

    println!("📦 postpack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "📂 Files:   {} of {} processed",
        stats.processed_files, stats.total_files
    );
    println!("📖 Loaded:  {} posts ({:.2}s)", archive.len(), load_secs);
    if let Some(ref keyword) = export.keyword {
        println!("🔍 Keyword: {}", keyword);
    }
    if let Some(ref start) = export.start_date {
        println!("📅 From:    {}", start);
    }
    if let Some(ref end) = export.end_date {
        println!("📅 Until:   {}", end);
    }
    println!();
    println!("✅ Exported {} posts to {}", written, export.output);
    Ok(())
}
