//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - global options and the subcommand
//! - [`Command`] - `browse`, `serve` and `export`
//! - [`FormatArg`] - which export formats to load
//! - [`LogLevel`] - default log verbosity when `RUST_LOG` is unset
//!
//! Running without a subcommand opens the console browser.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{ArchiveConfig, DEFAULT_POSTS_DIR};
use crate::core::filter::PostFilter;
use crate::core::output::DEFAULT_EXPORT_FILE;
use crate::error::Result;
use crate::extractor::ExportFormat;
use crate::menu::DEFAULT_PAGE_SIZE;
use crate::web::{DEFAULT_PORT, ServerConfig};

/// Browse, filter and export posts from a Facebook data archive.
#[derive(Parser, Debug, Clone)]
#[command(name = "postpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    postpack
    postpack --dir ~/facebook/posts --format all browse
    postpack serve --port 8080
    postpack export --keyword holiday --start-date 2019-01-01 -o holidays.csv
    postpack --format json export -o - | head")]
pub struct Args {
    /// Directory containing the exported post files
    #[arg(short, long, global = true, default_value = DEFAULT_POSTS_DIR)]
    pub dir: PathBuf,

    /// Which export files to load
    #[arg(short, long, global = true, value_enum, default_value = "html")]
    pub format: FormatArg,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// Builds the archive configuration from the global options.
    pub fn archive_config(&self) -> ArchiveConfig {
        ArchiveConfig::new(&self.dir).with_formats(self.format.formats())
    }

    /// Returns the subcommand, defaulting to `browse`.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }
}

/// What to do with the loaded posts.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive console browser (default)
    Browse {
        /// Posts shown before pausing, 0 to show all
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },

    /// Web UI with JSON and CSV endpoints
    Serve {
        /// Address to bind to
        #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
        bind: IpAddr,

        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Write the filtered posts as CSV
    Export(ExportArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Browse {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Command {
    /// Server configuration for `serve`, `None` for other commands.
    pub fn server_config(&self) -> Option<ServerConfig> {
        match self {
            Command::Serve { bind, port } => Some(ServerConfig::new(SocketAddr::new(*bind, *port))),
            _ => None,
        }
    }
}

/// Options of the `export` subcommand.
#[derive(ClapArgs, Debug, Clone, PartialEq, Eq)]
pub struct ExportArgs {
    /// Output file, `-` for stdout
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
    pub output: String,

    /// Keep posts containing this text (case-insensitive)
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Keep posts on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<String>,

    /// Keep posts up to midnight of this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<String>,
}

impl ExportArgs {
    /// Builds the post filter.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidDate`](crate::ArchiveError::InvalidDate)
    /// for a malformed date.
    pub fn filter(&self) -> Result<PostFilter> {
        let mut filter = PostFilter::new();
        if let Some(ref keyword) = self.keyword {
            filter = filter.with_keyword(keyword.as_str());
        }
        if let Some(ref start) = self.start_date {
            filter = filter.with_start_date(start)?;
        }
        if let Some(ref end) = self.end_date {
            filter = filter.with_end_date(end)?;
        }
        Ok(filter)
    }

    /// Returns `true` if the CSV goes to stdout.
    pub fn to_stdout(&self) -> bool {
        self.output == "-"
    }
}

/// Export formats selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatArg {
    /// HTML pages (default)
    #[default]
    Html,

    /// JSON files
    Json,

    /// Both HTML and JSON
    All,
}

impl FormatArg {
    /// Returns the formats to load.
    pub fn formats(self) -> Vec<ExportFormat> {
        match self {
            FormatArg::Html => vec![ExportFormat::Html],
            FormatArg::Json => vec![ExportFormat::Json],
            FormatArg::All => ExportFormat::all().to_vec(),
        }
    }
}

impl std::fmt::Display for FormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatArg::Html => write!(f, "HTML"),
            FormatArg::Json => write!(f, "JSON"),
            FormatArg::All => write!(f, "HTML + JSON"),
        }
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Returns the filter directive for this level.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
