//! Application startup: argument parsing, configuration, logging and the
//! collect-then-run pipeline

use std::io::{self, Write};

use crate::app::cli::args::{Args, ReportFormat};
use crate::app::cli::display::display_case_table;
use crate::core::error_handling::{describe_error, log_error_with_context};
use crate::core::logging::init_logging;
use crate::harness::loader::{collect_filtered, MethodFilter};
use crate::harness::registry::TestRegistry;
use crate::harness::runner::{TextTestRunner, Verbosity};
use crate::harness::SuiteError;

/// Every collected test passed or was skipped
pub const EXIT_SUCCESS: i32 = 0;
/// At least one failure or error
pub const EXIT_TESTS_FAILED: i32 = 1;
/// Bad arguments or configuration, or a case could not be loaded
pub const EXIT_USAGE: i32 = 2;

/// Run the application with the process arguments and return the exit code
pub fn startup() -> i32 {
    startup_from(std::env::args_os())
}

/// Run the application with explicit arguments and return the exit code
pub fn startup_from<I, T>(argv: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match Args::try_parse_styled_from(argv) {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return e.exit_code();
        }
    };

    // Configuration is loaded before the logger starts, because it can set
    // the log level, format and destination.
    let base = match Args::load_config_file(cli.config_file.as_deref()) {
        Ok(base) => base,
        Err(e) => {
            eprintln!("Error: {}", describe_error(&e, "Loading configuration"));
            return EXIT_USAGE;
        }
    };
    let args = cli.merge_over(base);
    let use_color = args.use_color();

    let log_file = args.log_file_path().map(|p| p.to_string_lossy().to_string());
    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error: Failed to initialise logging: {}", e);
        return EXIT_USAGE;
    }

    log::info!(
        "spoolsuite {} starting (harness API {})",
        env!("CARGO_PKG_VERSION"),
        crate::core::version::get_api_version()
    );
    log::debug!("Final arguments: {:#?}", args);

    let registry = match TestRegistry::with_builtins() {
        Ok(registry) => registry,
        Err(e) => {
            log_error_with_context(&e, "Building the test case registry");
            return EXIT_USAGE;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.list {
        return match display_case_table(&mut out, &registry, use_color) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                let err = SuiteError::io("listing test cases", e);
                log_error_with_context(&err, "Listing test cases");
                EXIT_USAGE
            }
        };
    }

    execute(&args, &registry, &mut out)
}

/// Collect and run the cases selected by `args`, writing the report to `out`.
///
/// With no case identifiers configured, every registered case runs in
/// registry order.
pub fn execute<W: Write>(args: &Args, registry: &TestRegistry, out: &mut W) -> i32 {
    let mut identifiers = args.case_identifiers();
    if identifiers.is_empty() {
        identifiers = registry.names().into_iter().map(String::from).collect();
        log::debug!("No cases selected, running all {} registered", identifiers.len());
    }

    let filter = match MethodFilter::from_patterns(&args.filter) {
        Ok(filter) => filter,
        Err(e) => {
            log_error_with_context(&e, "Parsing method filter");
            return EXIT_USAGE;
        }
    };

    let mut suite = match collect_filtered(registry, &identifiers, &filter) {
        Ok(suite) => suite,
        Err(e) => {
            log::error!("FATAL: {}", describe_error(&e, "Collecting test cases"));
            log::debug!("DEBUG_DETAILS: {:?}", e);
            return EXIT_USAGE;
        }
    };

    let outcome = match args.report_format() {
        ReportFormat::Text => TextTestRunner::new(&mut *out)
            .with_verbosity(args.resolved_verbosity())
            .with_color(args.use_color())
            .run(&mut suite),
        ReportFormat::Json => TextTestRunner::new(io::sink())
            .with_verbosity(Verbosity::Quiet)
            .run(&mut suite)
            .and_then(|report| {
                let json = report.to_json()?;
                writeln!(out, "{}", json).map_err(|e| SuiteError::io("writing JSON report", e))?;
                Ok(report)
            }),
    };

    match outcome {
        Ok(report) if report.was_successful() => EXIT_SUCCESS,
        Ok(_) => EXIT_TESTS_FAILED,
        Err(e) => {
            log_error_with_context(&e, "Running test suite");
            EXIT_USAGE
        }
    }
}
