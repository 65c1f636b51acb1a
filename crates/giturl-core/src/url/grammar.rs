//! Ordered URL grammars.
//!
//! The grammars overlap: the SCP-like and bare shorthand forms accept many
//! strings that are also explicit protocol URLs. They are therefore tried in
//! a fixed order and the first full match wins.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use super::{ParseError, ParsedUrl};

// Shared sub-patterns. Every grammar is composed from these so the four
// stay consistent with each other.
const PROTOCOL: &str = r"\w+";
const USER: &str = r"[a-zA-Z0-9_.-]+";
const RESOURCE: &str = r"[a-zA-Z0-9_.-]+";
const PORT: &str = r"\d+";
const PATH: &str = r"[\w~.\-/\\]+";
// Lazy so a trailing `.git` or separator lands outside the name.
const NAME: &str = r"[\w~.\-]+?";
const REV: &str = r"[^@#]+";

/// Which grammar accepted an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrammarKind {
    /// `[git+]scheme://...` with one of the well-known schemes.
    Protocol,
    /// `[git+]scheme://...` with any word-like scheme.
    AnyProtocol,
    /// `[user@]host[:port](:|/)path` without a scheme.
    ScpLike,
    /// `[user@]host` followed by one or two separators and a path.
    Shorthand,
}

impl GrammarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GrammarKind::Protocol => "protocol",
            GrammarKind::AnyProtocol => "any-protocol",
            GrammarKind::ScpLike => "scp-like",
            GrammarKind::Shorthand => "shorthand",
        }
    }
}

impl fmt::Display for GrammarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct Grammar {
    kind: GrammarKind,
    pattern: Regex,
}

impl Grammar {
    fn new(kind: GrammarKind, pattern: String) -> Self {
        let pattern = Regex::new(&pattern)
            .unwrap_or_else(|err| panic!("{kind} grammar failed to compile: {err}"));
        Self { kind, pattern }
    }

    fn decompose(&self, url: &str) -> Option<ParsedUrl> {
        self.pattern.captures(url).map(|caps| ParsedUrl {
            protocol: capture(&caps, "protocol"),
            resource: capture(&caps, "resource"),
            pathname: capture(&caps, "pathname"),
            user: capture(&caps, "user"),
            port: capture(&caps, "port"),
            name: capture(&caps, "name"),
            rev: capture(&caps, "rev"),
        })
    }
}

fn capture(caps: &Captures<'_>, group: &str) -> Option<String> {
    caps.name(group).map(|m| m.as_str().to_string())
}

/// Revision suffix shared by every grammar.
fn rev_suffix() -> String {
    format!(r"(?:[@#](?P<rev>{REV}))?$")
}

static GRAMMARS: LazyLock<[Grammar; 4]> = LazyLock::new(|| {
    [
        Grammar::new(
            GrammarKind::Protocol,
            format!(
                r"^(?:git\+)?(?P<protocol>https?|git|ssh|rsync|file)://(?:(?P<user>{USER})@)?(?P<resource>{RESOURCE})?(?::(?P<port>{PORT}))?(?P<pathname>[:/\\](?:{PATH}[/\\])?(?:(?P<name>{NAME})(?:\.git|[/\\])?)?){}",
                rev_suffix()
            ),
        ),
        Grammar::new(
            GrammarKind::AnyProtocol,
            format!(
                r"^(?:git\+)?(?P<protocol>{PROTOCOL})://(?:(?P<user>{USER})@)?(?P<resource>{RESOURCE}:?)(?::(?P<port>{PORT}))?(?P<pathname>{PATH}(?P<name>{NAME})(?:\.git|/)?){}",
                rev_suffix()
            ),
        ),
        Grammar::new(
            GrammarKind::ScpLike,
            format!(
                r"^(?:(?P<user>{USER})@)?(?P<resource>{RESOURCE})(?::(?P<port>{PORT}))?(?P<pathname>[:/]{PATH}/(?P<name>{NAME})(?:\.git|/)?){}",
                rev_suffix()
            ),
        ),
        Grammar::new(
            GrammarKind::Shorthand,
            format!(
                r"^(?:(?P<user>{USER})@)?(?P<resource>{RESOURCE})[:/]{{1,2}}(?P<pathname>{PATH}(?P<name>{NAME})(?:\.git|/)?){}",
                rev_suffix()
            ),
        ),
    ]
});

/// Run the grammars in order and return the first full match.
pub fn classify(url: &str) -> Result<(GrammarKind, ParsedUrl), ParseError> {
    for grammar in GRAMMARS.iter() {
        if let Some(parsed) = grammar.decompose(url) {
            tracing::debug!(url, grammar = %grammar.kind, "matched git url grammar");
            return Ok((grammar.kind, parsed));
        }
    }
    Err(ParseError::new(url))
}

pub(crate) fn match_url(url: &str) -> Result<ParsedUrl, ParseError> {
    classify(url).map(|(_, parsed)| parsed)
}
