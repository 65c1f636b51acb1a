//! Error returned when no grammar accepts an input.

use thiserror::Error;

/// No grammar produced a full match for the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid git url \"{url}\"")]
pub struct ParseError {
    url: String,
}

impl ParseError {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The input exactly as it was passed to the parser.
    pub fn url(&self) -> &str {
        &self.url
    }
}
