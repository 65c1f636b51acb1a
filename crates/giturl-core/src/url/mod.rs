//! VCS URL parsing and normalization.
//!
//! Accepts repository locations written in any of the common conventions:
//! - Protocol URLs (`https://host/org/repo.git`, `ssh://git@host/org/repo`)
//! - `git+` prefixed transports (`git+https://...`, `git+file:///...`)
//! - SCP-like shorthand (`git@host:org/repo.git`)
//! - Any of the above with a trailing `@rev` or `#rev`
//!
//! [`ParsedUrl::parse`] decomposes a string into fields; [`normalize`]
//! turns it into a [`GitUrl`] carrying the canonical URL and the revision.

mod error;
mod grammar;
mod normalize;
mod parsed;

pub use error::ParseError;
pub use grammar::{GrammarKind, classify};
pub use normalize::{GitUrl, normalize};
pub use parsed::ParsedUrl;

#[cfg(test)]
mod tests;
