//! Test and run outcomes.
//!
//! The numeric codes double as process exit codes: an isolated test reports its status through the
//! child's exit code, and the harness itself exits with the aggregate status of the run.

use std::cmp::Ordering;
use std::fmt;

/// Outcome of a single test, or of a whole run once folded with [`Status::worst`].
///
/// Statuses are totally ordered by severity, not by code:
/// `Ok < TestFailure < TestError < harness faults`. Harness faults (`WrongArgs`, `ForkFail`,
/// `FileFail`, `Fatal`) compare among themselves by code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum Status {
    #[default]
    Ok = 0,
    /// An assertion did not hold.
    TestFailure = 1,
    /// The command line could not be turned into a run.
    WrongArgs = 2,
    /// A test process could not be spawned.
    ForkFail = 3,
    /// A report file could not be opened or written.
    FileFail = 4,
    /// The test crashed: panic, signal, stop, or an exit code the harness does not know.
    TestError = 5,
    Fatal = 99,
}

/// Every status, in declaration order.
pub const ALL_STATUSES: [Status; 7] = [
    Status::Ok,
    Status::TestFailure,
    Status::WrongArgs,
    Status::ForkFail,
    Status::FileFail,
    Status::TestError,
    Status::Fatal,
];

impl Status {
    /// The numeric code, also used as the process exit code.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Look up the status with the given code.
    pub fn from_code(code: i32) -> Option<Status> {
        ALL_STATUSES.into_iter().find(|status| status.code() == code)
    }

    /// Decode the exit code of a test process.
    ///
    /// Codes that are not a known status mean the test body left the process on its own terms
    /// (`exit(42)`, a Rust panic exit, ...) and are classified as [`Status::TestError`].
    pub fn from_exit_code(code: i32) -> Status {
        Self::from_code(code).unwrap_or(Status::TestError)
    }

    /// Canonical upper-case name, as printed in reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::TestFailure => "TEST_FAILURE",
            Status::WrongArgs => "WRONG_ARGS",
            Status::ForkFail => "FORK_FAIL",
            Status::FileFail => "FILE_FAIL",
            Status::TestError => "TEST_ERROR",
            Status::Fatal => "FATAL",
        }
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, Status::Ok)
    }

    /// Faults of the harness itself rather than of a test's logic.
    pub const fn is_harness_fault(self) -> bool {
        matches!(
            self,
            Status::WrongArgs | Status::ForkFail | Status::FileFail | Status::Fatal
        )
    }

    const fn severity(self) -> u8 {
        match self {
            Status::Ok => 0,
            Status::TestFailure => 1,
            Status::TestError => 2,
            Status::WrongArgs | Status::ForkFail | Status::FileFail | Status::Fatal => 3,
        }
    }

    /// The more severe of two statuses.
    pub fn worst(self, other: Status) -> Status {
        self.max(other)
    }
}

impl Ord for Status {
    fn cmp(&self, other: &Self) -> Ordering {
        self.severity()
            .cmp(&other.severity())
            .then_with(|| self.code().cmp(&other.code()))
    }
}

impl PartialOrd for Status {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
