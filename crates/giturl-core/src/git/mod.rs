//! Thin wrappers around the git executable.
//!
//! Nothing here interprets urls; callers pass in canonical strings produced
//! by [`crate::url`]. All process spawning goes through [`CommandRunner`] so
//! the command lines can be checked without a git installation.

mod client;
mod config;
mod error;
mod runner;

pub use client::{Git, ORIGIN_URL_KEY};
pub use config::GitConfig;
pub use error::GitError;
pub use runner::{CommandRunner, SystemGit};
