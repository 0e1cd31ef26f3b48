//! Build error types and their process exit codes.

use crate::utils::path::MAX_PATH_LEN;
use std::io;
use thiserror::Error;

/// Exit code for failures that are not a [`BuildError`] (config, CLI).
pub const EXIT_OTHER: i32 = 10;

/// Everything that can abort a build.
///
/// The first error stops the build; there are no partial results.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("directory not found: `{path}`")]
    DirectoryNotFound {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("path exceeds {max} bytes: `{0}`", max = MAX_PATH_LEN)]
    PathTooLong(String),

    #[error("output path exceeds {max} bytes: `{0}`", max = MAX_PATH_LEN)]
    OutputPathTooLong(String),

    #[error("could not compile `{input}`: {reason}")]
    CompileFailed { input: String, reason: String },

    #[error("invalid path: `{0}`")]
    InvalidPath(String),

    #[error("could not link `{output}`: {reason}")]
    LinkFailed { output: String, reason: String },

    #[error("IO error at `{path}`")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    /// Distinct process exit status for each error kind.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::DirectoryNotFound { .. } => 1,
            Self::PathTooLong(_) => 2,
            Self::CompileFailed { .. } => 3,
            Self::OutputPathTooLong(_) => 4,
            Self::InvalidPath(_) => 7,
            Self::LinkFailed { .. } => 8,
            Self::Io { .. } => 9,
        }
    }
}

/// Exit status for any error reaching `main`.
pub fn exit_code_of(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<BuildError>()
        .map_or(EXIT_OTHER, BuildError::exit_code)
}
