//! Core CLI arguments structure
//!
//! `Args` is parsed by clap from the command line and can also be filled from a
//! TOML configuration file (see `config.rs`). `merge_over` combines the two so
//! that command line values win.

use clap::{ArgAction, ColorChoice, CommandFactory, FromArgMatches, Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::core::styles::palette_to_clap;
use crate::core::validation::split_and_collect;
use crate::harness::runner::Verbosity;

/// Report output format
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    ValueEnum,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportFormat {
    /// Human-readable progress and summary
    #[default]
    Text,
    /// Machine-readable report
    Json,
}

// Used for the command line and, with the same field names, for the
// configuration file.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "spoolsuite")]
#[command(about = "Aggregate and run SpoolManager test cases")]
#[command(version, long_version = crate::core::version::long_version())]
#[command(after_help = " * can be specified multiple times or as a comma-separated list")]
pub struct Args {
    /// Test cases to run, in order*
    #[arg(short = 'k', long = "case", value_name = "NAMES", action = ArgAction::Append)]
    pub cases: Vec<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Glob patterns selecting test methods by name or case::method*
    #[arg(short = 't', long = "filter", value_name = "PATTERNS", action = ArgAction::Append)]
    pub filter: Vec<String>,

    /// More output per test (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Less output per test (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Report format
    #[arg(long = "format", value_name = "FORMAT", value_enum)]
    pub format: Option<ReportFormat>,

    /// List registered test cases and exit
    #[arg(long = "list")]
    pub list: bool,

    /// Force coloured output
    #[arg(long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable coloured output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Log level
    #[arg(long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level from the configuration file
    #[arg(skip)]
    pub verbosity: Option<i8>,

    /// Colour setting from the configuration file
    #[arg(skip)]
    pub color_setting: Option<bool>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// The clap command with help styles taken from the role palette
    pub fn styled_command(color_enabled: bool) -> clap::Command {
        let choice = if color_enabled {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self::command()
            .color(choice)
            .styles(palette_to_clap(color_enabled))
    }

    /// Parse `argv` with styled help and error output.
    ///
    /// Colour is decided from `--color`/`--no-color` in `argv` before parsing,
    /// falling back to TTY detection.
    pub fn try_parse_styled_from<I, T>(argv: I) -> Result<Args, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        let color_enabled = Self::color_hint(&argv)
            .unwrap_or_else(|| std::io::IsTerminal::is_terminal(&std::io::stdout()));
        let matches = Self::styled_command(color_enabled).try_get_matches_from(argv)?;
        Args::from_arg_matches(&matches)
    }

    fn color_hint(argv: &[OsString]) -> Option<bool> {
        argv.iter()
            .skip(1)
            .take_while(|arg| arg.as_os_str() != "--")
            .fold(None, |hint, arg| match arg.to_str() {
                Some("--color") => Some(true),
                Some("--no-color") => Some(false),
                _ => hint,
            })
    }

    /// Overlay these command-line values on `base` (usually loaded from a
    /// configuration file) and return the merged arguments.
    ///
    /// Lists given on the command line replace the configured ones rather
    /// than extending them.
    pub fn merge_over(self, base: Args) -> Args {
        let color_setting = match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => base.color_setting,
        };
        let verbosity = if self.verbose > 0 || self.quiet > 0 {
            Some(self.verbosity_level())
        } else {
            base.verbosity
        };

        Args {
            cases: if self.cases.is_empty() { base.cases } else { self.cases },
            config_file: self.config_file.or(base.config_file),
            filter: if self.filter.is_empty() { base.filter } else { self.filter },
            verbose: self.verbose,
            quiet: self.quiet,
            format: self.format.or(base.format),
            list: self.list || base.list,
            color: self.color,
            no_color: self.no_color,
            log_level: self.log_level.or(base.log_level),
            log_format: self.log_format.or(base.log_format),
            log_file: self.log_file.or(base.log_file),
            verbosity,
            color_setting,
        }
    }

    /// Signed level from `-v`/`-q` counts around the default of 1
    pub fn verbosity_level(&self) -> i8 {
        let level = 1 + i16::from(self.verbose) - i16::from(self.quiet);
        level.clamp(i16::from(i8::MIN), i16::from(i8::MAX)) as i8
    }

    /// Effective runner verbosity: configured level, else the `-v`/`-q` level
    pub fn resolved_verbosity(&self) -> Verbosity {
        Verbosity::from_level(self.verbosity.unwrap_or_else(|| self.verbosity_level()))
    }

    /// Effective colour choice, falling back to TTY detection
    pub fn use_color(&self) -> bool {
        if self.color {
            return true;
        }
        if self.no_color {
            return false;
        }
        self.color_setting
            .unwrap_or_else(|| std::io::IsTerminal::is_terminal(&std::io::stdout()))
    }

    pub fn report_format(&self) -> ReportFormat {
        self.format.unwrap_or_default()
    }

    /// Case identifiers with comma-separated entries split out, duplicates
    /// dropped and order kept
    pub fn case_identifiers(&self) -> Vec<String> {
        Self::parse_comma_separated_strings(&self.cases)
    }

    /// `"none"` and `"-"` disable file logging
    pub fn log_file_path(&self) -> Option<&std::path::Path> {
        self.log_file
            .as_deref()
            .filter(|p| !(p.as_os_str().eq_ignore_ascii_case("none") || p.as_os_str() == "-"))
    }

    pub fn parse_comma_separated_strings(strings: &[String]) -> Vec<String> {
        split_and_collect(strings, |s| s.clone(), true)
    }
}
