//! Process runner used by [`Git`](super::Git).

use std::process::Command;

use super::GitError;

/// Variables that would redirect git away from the repository we point it at.
const GIT_ENV_OVERRIDES: [&str; 4] = [
    "GIT_DIR",
    "GIT_WORK_TREE",
    "GIT_INDEX_FILE",
    "GIT_COMMON_DIR",
];

/// Runs a git command line and returns its trimmed standard output.
///
/// Implemented by [`SystemGit`] for real use; tests substitute a recorder.
pub trait CommandRunner {
    fn run(&self, args: &[String]) -> Result<String, GitError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, args: &[String]) -> Result<String, GitError> {
        (**self).run(args)
    }
}

/// Spawns the git executable.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: String,
}

impl SystemGit {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new("git")
    }
}

impl CommandRunner for SystemGit {
    fn run(&self, args: &[String]) -> Result<String, GitError> {
        tracing::trace!(program = %self.program, ?args, "running git");

        let mut cmd = Command::new(&self.program);
        for key in GIT_ENV_OVERRIDES {
            cmd.env_remove(key);
        }
        let output = cmd.args(args).output().map_err(|source| GitError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::CommandFailed {
                args: args.to_vec(),
                status: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
