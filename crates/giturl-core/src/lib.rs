//! giturl Core Library
//!
//! Parses repository locations written in the many conventions git accepts
//! and reduces them to a canonical form, plus thin wrappers around the git
//! executable that consume those canonical urls.

pub mod git;
pub mod settings;
pub mod url;

/// Re-exports of commonly used types
pub mod prelude {
    // Urls
    pub use crate::url::{GitUrl, GrammarKind, ParseError, ParsedUrl, classify, normalize};

    // Git
    pub use crate::git::{CommandRunner, Git, GitConfig, GitError, SystemGit};

    // Settings
    pub use crate::settings::Settings;
}
