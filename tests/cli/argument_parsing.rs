//! CLI argument parsing tests

use clap::Parser;
use spoolsuite::app::cli::args::*;
use spoolsuite::harness::Verbosity;
use std::path::PathBuf;

#[test]
fn test_defaults() {
    let args = Args::try_parse_from(["spoolsuite"]).unwrap();
    assert!(args.cases.is_empty());
    assert!(args.filter.is_empty());
    assert!(!args.list);
    assert_eq!(args.report_format(), ReportFormat::Text);
    assert_eq!(args.resolved_verbosity(), Verbosity::Normal);
    assert!(args.config_file.is_none());
}

#[test]
fn test_cases_keep_command_line_order() {
    let args = Args::try_parse_from([
        "spoolsuite",
        "--case",
        "harness",
        "-k",
        "environment,harness",
    ])
    .unwrap();
    assert_eq!(args.cases, vec!["harness", "environment,harness"]);
    assert_eq!(args.case_identifiers(), vec!["harness", "environment"]);
}

#[test]
fn test_filter_patterns_append() {
    let args =
        Args::try_parse_from(["spoolsuite", "-t", "test_*", "--filter", "harness::*"]).unwrap();
    assert_eq!(args.filter, vec!["test_*", "harness::*"]);
}

#[test]
fn test_format_values() {
    let args = Args::try_parse_from(["spoolsuite", "--format", "json"]).unwrap();
    assert_eq!(args.report_format(), ReportFormat::Json);
    assert!(Args::try_parse_from(["spoolsuite", "--format", "xml"]).is_err());
}

#[test]
fn test_logging_options() {
    let args = Args::try_parse_from([
        "spoolsuite",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--log-file",
        "/tmp/spoolsuite.log",
    ])
    .unwrap();
    assert_eq!(args.log_level.as_deref(), Some("debug"));
    assert_eq!(args.log_format.as_deref(), Some("json"));
    assert_eq!(args.log_file, Some(PathBuf::from("/tmp/spoolsuite.log")));

    assert!(Args::try_parse_from(["spoolsuite", "--log-level", "chatty"]).is_err());
    assert!(Args::try_parse_from(["spoolsuite", "--log-format", "min"]).is_err());
}

#[test]
fn test_verbose_and_quiet_counts() {
    let args = Args::try_parse_from(["spoolsuite", "-vv"]).unwrap();
    assert_eq!(args.verbose, 2);
    assert_eq!(args.resolved_verbosity(), Verbosity::Verbose);

    let args = Args::try_parse_from(["spoolsuite", "-qq"]).unwrap();
    assert_eq!(args.verbosity_level(), -1);
    assert_eq!(args.resolved_verbosity(), Verbosity::Quiet);
}

#[test]
fn test_color_flags() {
    let args = Args::try_parse_from(["spoolsuite", "--color"]).unwrap();
    assert!(args.use_color());
    let args = Args::try_parse_from(["spoolsuite", "--no-color"]).unwrap();
    assert!(!args.use_color());
}
