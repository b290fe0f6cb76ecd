//! Harness-level faults.
//!
//! These are never about a test's own logic: a test that fails or crashes is a [`Status`], not an
//! error. A `HarnessError` means the run cannot be trusted or completed and ends it immediately.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use yacu_core::Status;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("invalid arguments: {0}")]
    WrongArgs(String),

    #[error("cannot locate the test executable: {0}")]
    CurrentExe(#[source] io::Error),

    #[error("failed to spawn test process `{}`: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write report file `{}`: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl HarnessError {
    pub fn file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    /// Status the harness process exits with.
    pub fn status(&self) -> Status {
        match self {
            HarnessError::WrongArgs(_) => Status::WrongArgs,
            HarnessError::CurrentExe(_) | HarnessError::Spawn { .. } => Status::ForkFail,
            HarnessError::File { .. } => Status::FileFail,
            HarnessError::Output(_) => Status::Fatal,
        }
    }
}

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
