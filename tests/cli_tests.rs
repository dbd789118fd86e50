//! Additional tests for the CLI types

use clap::{Parser, ValueEnum};
use postpack::ExportFormat;
use postpack::cli::{Args, Command, FormatArg, LogLevel};
use std::str::FromStr;

#[test]
fn test_format_arg_value_names() {
    let names: Vec<_> = FormatArg::value_variants()
        .iter()
        .filter_map(|v| v.to_possible_value())
        .map(|v| v.get_name().to_string())
        .collect();
    assert_eq!(names, vec!["html", "json", "all"]);
}

#[test]
fn test_format_arg_formats() {
    assert_eq!(FormatArg::Html.formats(), vec![ExportFormat::Html]);
    assert_eq!(FormatArg::Json.formats(), vec![ExportFormat::Json]);
    assert_eq!(FormatArg::All.formats(), ExportFormat::all().to_vec());
}

#[test]
fn test_format_arg_serde() {
    assert_eq!(serde_json::to_string(&FormatArg::All).unwrap(), "\"all\"");
    let back: FormatArg = serde_json::from_str("\"json\"").unwrap();
    assert_eq!(back, FormatArg::Json);
}

#[test]
fn test_export_format_from_str_variants() {
    assert!(ExportFormat::from_str("html").is_ok());
    assert!(ExportFormat::from_str("HTM").is_ok());
    assert!(ExportFormat::from_str("JSON").is_ok());
    assert!(ExportFormat::from_str("").is_err());
    assert!(ExportFormat::from_str("csv").is_err());
}

#[test]
fn test_log_level_values() {
    for (level, name) in [
        (LogLevel::Error, "error"),
        (LogLevel::Warn, "warn"),
        (LogLevel::Info, "info"),
        (LogLevel::Debug, "debug"),
        (LogLevel::Trace, "trace"),
    ] {
        assert_eq!(level.as_str(), name);
        assert_eq!(LogLevel::from_str(name, true).unwrap(), level);
    }
}

#[test]
fn test_log_level_option() {
    let args = Args::try_parse_from(["postpack", "--log-level", "debug", "export"]).unwrap();
    assert_eq!(args.log_level, LogLevel::Debug);
    assert!(matches!(args.command(), Command::Export(_)));
}

#[test]
fn test_serve_bind_address() {
    let args = Args::try_parse_from(["postpack", "serve", "--bind", "0.0.0.0", "-p", "9000"]).unwrap();
    let config = args.command().server_config().unwrap();
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:9000");
}

#[test]
fn test_browse_has_no_server_config() {
    let args = Args::try_parse_from(["postpack", "browse", "--page-size", "0"]).unwrap();
    assert_eq!(args.command(), Command::Browse { page_size: 0 });
    assert!(args.command().server_config().is_none());
}

#[test]
fn test_invalid_port_rejected() {
    assert!(Args::try_parse_from(["postpack", "serve", "--port", "70000"]).is_err());
}
