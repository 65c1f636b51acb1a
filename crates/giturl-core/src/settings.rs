//! User settings loaded from `giturl.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::git::{Git, SystemGit};

pub const SETTINGS_FILE: &str = "giturl.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Executable used for every git invocation.
    pub git_program: String,
    /// Fail instead of falling back to an empty config when git is missing.
    pub require_git: bool,
    /// Root for checkout directories. Defaults to the user data dir.
    pub state_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            git_program: "git".to_string(),
            require_git: false,
            state_dir: None,
        }
    }
}

impl Settings {
    /// `<config_dir>/giturl/giturl.toml`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("giturl").join(SETTINGS_FILE))
    }

    /// Load from the default location.
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_path()?)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "settings file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(content).map_err(|e| enhance_toml_error(e, content))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings to TOML")
    }

    fn validate(&self) -> Result<()> {
        if self.git_program.trim().is_empty() {
            anyhow::bail!("git_program must not be empty");
        }
        Ok(())
    }

    /// Configured state directory, or `<data_dir>/giturl`.
    pub fn state_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.state_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(data_dir.join("giturl"))
    }

    /// A [`Git`] that runs the configured executable.
    pub fn git(&self, work_dir: Option<PathBuf>) -> Git<SystemGit> {
        Git::with_runner(SystemGit::new(self.git_program.clone()), work_dir)
    }
}

/// Point at the offending line when the TOML error carries a span.
fn enhance_toml_error(error: toml::de::Error, content: &str) -> anyhow::Error {
    let message = error.message().to_string();
    let Some(span) = error.span() else {
        return anyhow::anyhow!("TOML parsing error: {}", message);
    };

    let line_num = content[..span.start.min(content.len())].matches('\n').count() + 1;
    let line = content.lines().nth(line_num - 1).unwrap_or_default();
    anyhow::anyhow!(
        "TOML parsing error at line {}:\n  {} | {}\n\nError: {}",
        line_num,
        line_num,
        line,
        message
    )
}
