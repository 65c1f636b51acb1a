//! Canonical form of a VCS URL.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{ParseError, ParsedUrl};

/// `git+scheme://host:path` with the host/path colon as the last `:` before
/// a colon-free run. Rewritten to `scheme://host/path`.
static HOST_PATH_COLON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"git\+(.*:[^:]+):(.*)").unwrap_or_else(|err| panic!("invalid pattern: {err}"))
});

/// A canonical URL with its revision split off.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GitUrl {
    pub url: String,
    pub revision: Option<String>,
}

impl GitUrl {
    pub fn new(url: impl Into<String>, revision: Option<String>) -> Self {
        Self {
            url: url.into(),
            revision,
        }
    }

    /// Normalize `url` into its canonical form.
    pub fn normalize(url: &str) -> Result<Self, ParseError> {
        normalize(url)
    }

    /// Deterministic checkout directory for this repository under `state_dir`.
    ///
    /// Only the canonical URL is hashed, so every spelling that normalizes
    /// to the same URL shares one directory regardless of revision.
    pub fn cache_dir(&self, state_dir: &Path) -> PathBuf {
        let hash = blake3::hash(self.url.as_bytes()).to_hex().to_string();
        state_dir.join("git").join(format!("{}.git", hash))
    }
}

impl fmt::Display for GitUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.revision {
            Some(rev) => write!(f, "{}#{}", self.url, rev),
            None => f.write_str(&self.url),
        }
    }
}

impl FromStr for GitUrl {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

/// Parse `url` and produce its canonical form plus the extracted revision.
///
/// When the generic field rendering reproduces the input (minus `git+` and
/// the revision marker) it is returned as is. Otherwise the input is
/// rewritten with the transport-specific rules below, because the generic
/// rendering turned a `host:path` into `host/path` or otherwise lost the
/// established short form.
pub fn normalize(url: &str) -> Result<GitUrl, ParseError> {
    let parsed = ParsedUrl::parse(url)?;

    let mut formatted = url.strip_prefix("git+").unwrap_or(url);
    if let Some(rev) = &parsed.rev {
        formatted = strip_revision(formatted, rev);
    }

    let canonical = parsed.format();
    let normalized = if canonical == formatted {
        canonical
    } else {
        rewrite(url, &parsed)
    };

    let mut normalized = normalized.as_str();
    if let Some(rev) = &parsed.rev {
        normalized = strip_revision(normalized, rev);
    }
    let normalized = strip_fragment(normalized);

    Ok(GitUrl::new(normalized, parsed.rev))
}

fn rewrite(url: &str, parsed: &ParsedUrl) -> String {
    let pathname = parsed.pathname.as_deref().unwrap_or_default();

    if url.starts_with("git+http") && is_host_path_colon(pathname) {
        tracing::debug!(url, "rewriting host:path colon to slash");
        return HOST_PATH_COLON.replace_all(url, "${1}/${2}").into_owned();
    }

    if let Some(rest) = url.strip_prefix("git+")
        && rest.starts_with("file")
    {
        tracing::debug!(url, "dropping git+ from file transport");
        return rest.to_string();
    }

    tracing::debug!(url, "reducing ssh transport to scp-like form");
    let rest = url.strip_prefix("git+").unwrap_or(url);
    match rest.strip_prefix("ssh://") {
        Some(short) => short.to_string(),
        None => url.to_string(),
    }
}

/// `:path` (optionally after one `/`) where the colon is not a port prefix.
fn is_host_path_colon(pathname: &str) -> bool {
    let pathname = pathname.strip_prefix('/').unwrap_or(pathname);
    let mut chars = pathname.chars();
    chars.next() == Some(':') && chars.next().is_some_and(|c| !c.is_ascii_digit())
}

/// Drop a trailing `@rev` or `#rev`.
fn strip_revision<'a>(url: &'a str, rev: &str) -> &'a str {
    url.strip_suffix(rev)
        .and_then(|rest| {
            rest.strip_suffix('@')
                .or_else(|| rest.strip_suffix('#'))
        })
        .unwrap_or(url)
}

/// Drop everything from the last `#`.
fn strip_fragment(url: &str) -> &str {
    match url.rfind('#') {
        Some(idx) => &url[..idx],
        None => url,
    }
}
