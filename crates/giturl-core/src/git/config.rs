//! Snapshot of `git config -l`.

use std::collections::BTreeMap;

use super::{CommandRunner, GitError};

/// Key/value pairs reported by `git config -l`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitConfig {
    entries: BTreeMap<String, String>,
}

impl GitConfig {
    /// List the configuration through `runner`.
    ///
    /// If git cannot be run and `requires_git_presence` is false, the failure
    /// is logged and an empty config is returned.
    pub fn load<R: CommandRunner>(
        runner: &R,
        requires_git_presence: bool,
    ) -> Result<Self, GitError> {
        match runner.run(&["config".to_string(), "-l".to_string()]) {
            Ok(listing) => Ok(Self::from_listing(&listing)),
            Err(err) if !requires_git_presence => {
                tracing::warn!(error = %err, "git config unavailable, using empty config");
                Ok(Self::default())
            }
            Err(err) => Err(err),
        }
    }

    /// Parse `key=value` lines. Lines without `=` are skipped; later
    /// duplicates overwrite earlier ones.
    pub fn from_listing(listing: &str) -> Self {
        let entries = listing
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
