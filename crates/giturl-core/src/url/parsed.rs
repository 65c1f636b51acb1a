//! Structured decomposition of a VCS URL.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ParseError;
use super::grammar;

/// Fields captured by the first grammar that accepted the input.
///
/// Every field is optional. An absent field means the grammar that matched
/// did not capture it, which is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedUrl {
    /// Transport scheme without any `git+` prefix (e.g. "https", "ssh").
    pub protocol: Option<String>,
    /// Host or resource identifier. May keep a trailing `:` for loose schemes.
    pub resource: Option<String>,
    /// Path as captured, including its leading separator.
    pub pathname: Option<String>,
    pub user: Option<String>,
    pub port: Option<String>,
    /// Repository name from the path tail.
    pub name: Option<String>,
    /// Revision after a trailing `@` or `#`.
    pub rev: Option<String>,
}

impl ParsedUrl {
    /// Decompose `url` using the ordered grammar list.
    pub fn parse(url: &str) -> Result<Self, ParseError> {
        grammar::match_url(url)
    }

    /// Render the fields as `protocol://user@resource:port/path`.
    ///
    /// Absent parts are skipped. Leading `:` and `/` characters of the
    /// pathname are replaced by a single `/`.
    pub fn format(&self) -> String {
        let mut out = String::new();
        if let Some(protocol) = non_empty(&self.protocol) {
            out.push_str(protocol);
            out.push_str("://");
        }
        if let Some(user) = non_empty(&self.user) {
            out.push_str(user);
            out.push('@');
        }
        if let Some(resource) = &self.resource {
            out.push_str(resource);
        }
        if let Some(port) = non_empty(&self.port) {
            out.push(':');
            out.push_str(port);
        }
        out.push('/');
        let path = self.pathname.as_deref().unwrap_or_default();
        out.push_str(path.trim_start_matches([':', '/']));
        out
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}
