//! Command-line front end of a test binary.
//!
//! A test binary declares its suites and hands them to [`run`]:
//!
//! ```no_run
//! use yacu::{Suite, TestCase, TestContext, TestOutcome, yacu_assert_eq};
//!
//! fn add_ok(ctx: &mut TestContext<'_>) -> TestOutcome {
//!     yacu_assert_eq!(ctx, 2 + 3, 5);
//!     Ok(())
//! }
//!
//! const MATH: &[TestCase] = &[TestCase::new("addOk", add_ok)];
//! static SUITES: [Suite; 1] = [Suite::new("Math", MATH)];
//!
//! fn main() {
//!     yacu::cli::run(&SUITES);
//! }
//! ```
//!
//! ## Flags
//!
//! - `--help` / `--list` - print usage or the test table
//! - `--suite <S>` / `--test <S> <T>` - restrict the run
//! - `--no-fork` - run tests in the harness process
//! - `--junit <FILE>` - also write a JUnit XML report
//! - `-q, --quiet` - no console report
//!
//! ## Design
//!
//! Parsing and execution return `CliResult<T>` instead of calling `process::exit`.
//! Only [`run`] and [`run_with_reporter`] print errors and exit.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::env;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use yacu_core::{RunFilter, Status, Suite};

use crate::error::{HarnessError, HarnessResult};
use crate::report::{ConsoleReporter, JUnitReporter, MessageFileReporter, ReportDispatcher, Reporter};
use crate::runner::{self, Action, RunOptions};

/// Environment variable holding the `tracing` filter directives.
pub const LOG_ENV: &str = "YACU_LOG";

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(Status::Ok.code());
    pub const WRONG_ARGS: ExitCode = ExitCode(Status::WrongArgs.code());
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode(status.code())
    }
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<HarnessError> for CliError {
    fn from(error: HarnessError) -> Self {
        Self::new(format!("yacu: {error}"), error.status().into())
    }
}

impl From<clap::Error> for CliError {
    fn from(error: clap::Error) -> Self {
        Self::new(error.to_string().trim_end(), ExitCode::WRONG_ARGS)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run the unit tests compiled into this binary
#[derive(Parser, Debug)]
#[command(name = "yacu", disable_help_flag = true)]
pub struct Cli {
    /// Print this help and exit
    #[arg(long)]
    pub help: bool,

    /// List all suites and their tests, then exit
    #[arg(long)]
    pub list: bool,

    /// Run only the tests of this suite
    #[arg(long, value_name = "SUITE", allow_hyphen_values = true)]
    pub suite: Option<String>,

    /// Run only this test of this suite
    #[arg(
        long,
        num_args = 2,
        value_names = ["SUITE", "TEST"],
        allow_hyphen_values = true,
        conflicts_with = "suite"
    )]
    pub test: Option<Vec<String>>,

    /// Run tests inside the harness process instead of one process per test
    #[arg(long = "no-fork")]
    pub no_fork: bool,

    /// Write a JUnit XML report to FILE
    #[arg(long, value_name = "FILE")]
    pub junit: Option<PathBuf>,

    /// Do not print the console report
    #[arg(short, long)]
    pub quiet: bool,

    /// Run as the isolated child of a harness, leaving the test message in FILE
    #[arg(long = "child-message", value_name = "FILE", hide = true, requires = "test")]
    pub child_message: Option<PathBuf>,
}

impl Cli {
    /// Resolve flags into run options; `--help` wins over `--list`, which wins over running.
    pub fn into_options(self) -> HarnessResult<RunOptions> {
        let action = if self.help {
            Action::Help
        } else if self.list {
            Action::List
        } else {
            Action::Run
        };

        let filter = match (self.suite, self.test) {
            (_, Some(pair)) => {
                let mut pair = pair.into_iter();
                match (pair.next(), pair.next()) {
                    (Some(suite), Some(test)) => RunFilter::test(suite, test),
                    _ => return Err(HarnessError::WrongArgs("--test takes a suite and a test name".to_string())),
                }
            }
            (Some(suite), None) => RunFilter::suite(suite),
            (None, None) => RunFilter::all(),
        };

        // A child runs its single test in-process and reports only through the message file.
        let child = self.child_message.is_some();
        Ok(RunOptions {
            action,
            filter,
            isolate: !self.no_fork && !child,
            junit_path: if child { None } else { self.junit },
            console: !self.quiet && !child,
            child_message: self.child_message,
        })
    }
}

/// Usage text, as printed by `--help`.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main entry point of a test binary.
///
/// Parses the process arguments, runs `suites`, and exits with the aggregate status.
/// This is the only place where `process::exit` is called.
pub fn run(suites: &[Suite]) {
    run_with(suites, None);
}

/// Like [`run`], with an additional sink notified after the built-in ones.
pub fn run_with_reporter(suites: &[Suite], reporter: impl Reporter + 'static) {
    run_with(suites, Some(Box::new(reporter)));
}

fn run_with(suites: &[Suite], custom: Option<Box<dyn Reporter>>) {
    init_logging();

    let result = Cli::try_parse_from(env::args_os())
        .map_err(CliError::from)
        .and_then(|cli| execute(cli, suites, custom));

    match result {
        Ok(exit_code) => {
            if exit_code != ExitCode::SUCCESS {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute a parsed command line against `suites` and return the exit code.
pub fn execute(cli: Cli, suites: &[Suite], custom: Option<Box<dyn Reporter>>) -> CliResult<ExitCode> {
    let options = cli.into_options()?;
    let mut dispatcher = build_dispatcher(&options, custom)?;
    let outcome = runner::execute(&options, suites, &mut dispatcher, &mut io::stdout())?;

    if options.child_message.is_some() && outcome.executed == 0 {
        let suite = options.filter.suite.as_deref().unwrap_or_default();
        let test = options.filter.test.as_deref().unwrap_or_default();
        return Err(HarnessError::WrongArgs(format!("no test `{test}` in suite `{suite}`")).into());
    }
    Ok(outcome.status.into())
}

/// Register the sinks `options` asks for: console, then JUnit, then `custom`.
///
/// A child only reports through its message file.
pub fn build_dispatcher(options: &RunOptions, custom: Option<Box<dyn Reporter>>) -> HarnessResult<ReportDispatcher> {
    let mut dispatcher = ReportDispatcher::new();
    if let Some(path) = &options.child_message {
        dispatcher.push(Box::new(MessageFileReporter::new(path)));
        return Ok(dispatcher);
    }
    if options.action != Action::Run {
        return Ok(dispatcher);
    }

    if options.console {
        dispatcher.push(Box::new(ConsoleReporter::stdout()));
    }
    if let Some(path) = &options.junit_path {
        dispatcher.push(Box::new(JUnitReporter::create(path)?));
    }
    if let Some(custom) = custom {
        dispatcher.push(custom);
    }
    Ok(dispatcher)
}

/// Install the stderr `tracing` subscriber, filtered by `YACU_LOG` (default `warn`).
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .try_init();
}

// ============================================================================
// Tests
// ============================================================================
