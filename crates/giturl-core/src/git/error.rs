//! Errors raised by the git command layer.

use std::path::PathBuf;

use thiserror::Error;

use crate::url::ParseError;

#[derive(Debug, Error)]
pub enum GitError {
    /// The git executable could not be started.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Git ran but exited unsuccessfully.
    #[error("Git command failed {args:?}: {stderr}")]
    CommandFailed {
        args: Vec<String>,
        /// Exit code, `None` when terminated by a signal.
        status: Option<i32>,
        stderr: String,
    },

    /// A path could not be passed to git as UTF-8.
    #[error("Path is not valid UTF-8: {}", .0.display())]
    InvalidPath(PathBuf),

    /// No remote is configured for the repository.
    #[error("No remote url configured")]
    NoRemote,

    #[error(transparent)]
    Parse(#[from] ParseError),
}
