//! Repository operations backed by the git executable.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{CommandRunner, GitConfig, GitError, SystemGit};
use crate::url::GitUrl;

/// Key git reports for the conventional default remote.
pub const ORIGIN_URL_KEY: &str = "remote.origin.url";

/// Git operations, optionally bound to a default working tree.
#[derive(Debug, Clone)]
pub struct Git<R = SystemGit> {
    runner: R,
    work_dir: Option<PathBuf>,
}

impl Git<SystemGit> {
    /// Use the `git` found on `PATH`.
    pub fn new(work_dir: Option<PathBuf>) -> Self {
        Self::with_runner(SystemGit::default(), work_dir)
    }
}

impl<R: CommandRunner> Git<R> {
    pub fn with_runner(runner: R, work_dir: Option<PathBuf>) -> Self {
        Self { runner, work_dir }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_deref()
    }

    /// Clone `repository` into `dest`, including submodules.
    pub fn clone(&self, repository: &str, dest: &Path) -> Result<String, GitError> {
        let dest = path_arg(dest)?;
        self.runner.run(&strings([
            "clone",
            "--recurse-submodules",
            repository,
            dest.as_str(),
        ]))
    }

    /// Clone the canonical form of `url` into `dest`.
    pub fn clone_url(&self, url: &GitUrl, dest: &Path) -> Result<String, GitError> {
        self.clone(&url.url, dest)
    }

    /// Check out `rev`, including submodules.
    pub fn checkout(&self, rev: &str, folder: Option<&Path>) -> Result<String, GitError> {
        self.run_in(folder, ["checkout", "--recurse-submodules", rev])
    }

    /// Resolve `rev` to a commit hash.
    ///
    /// Annotated tags resolve to the commit they point at, not the tag object.
    pub fn resolve_commit(&self, rev: &str, folder: Option<&Path>) -> Result<String, GitError> {
        // `^0` peels like `^{commit}` without braces some shells mangle.
        let peeled = format!("{}^0", rev);
        self.run_in(folder, ["rev-parse", peeled.as_str()])
    }

    /// Untracked files matched by the standard ignore rules.
    pub fn ignored_files(&self, folder: Option<&Path>) -> Result<Vec<String>, GitError> {
        let output = self.run_in(
            folder,
            ["ls-files", "--others", "-i", "--exclude-standard"],
        )?;
        Ok(output
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Configured remote urls keyed by their config key (`remote.<name>.url`).
    pub fn remote_urls(
        &self,
        folder: Option<&Path>,
    ) -> Result<BTreeMap<String, String>, GitError> {
        let output = match self.run_in(folder, ["config", "--get-regexp", r"remote\..*\.url"]) {
            Ok(output) => output,
            // `--get-regexp` exits with 1 when nothing matches.
            Err(GitError::CommandFailed {
                status: Some(1),
                stderr,
                ..
            }) if stderr.is_empty() => String::new(),
            Err(err) => return Err(err),
        };

        let mut urls = BTreeMap::new();
        for line in output.lines() {
            if let Some((key, url)) = line.split_once(' ') {
                urls.insert(key.trim().to_string(), url.trim().to_string());
            }
        }
        Ok(urls)
    }

    /// The `origin` remote url, or any other configured remote if there is no origin.
    pub fn remote_url(&self, folder: Option<&Path>) -> Result<String, GitError> {
        let mut urls = self.remote_urls(folder)?;
        if let Some(url) = urls.remove(ORIGIN_URL_KEY) {
            return Ok(url);
        }
        urls.into_values().next().ok_or(GitError::NoRemote)
    }

    /// [`remote_url`](Self::remote_url) in canonical form.
    pub fn normalized_remote_url(&self, folder: Option<&Path>) -> Result<GitUrl, GitError> {
        let url = self.remote_url(folder)?;
        Ok(GitUrl::normalize(&url)?)
    }

    /// Read `git config -l`.
    ///
    /// With `requires_git_presence` false a failing git yields an empty config.
    pub fn read_config(&self, requires_git_presence: bool) -> Result<GitConfig, GitError> {
        GitConfig::load(&self.runner, requires_git_presence)
    }

    fn run_in<'a>(
        &self,
        folder: Option<&Path>,
        args: impl IntoIterator<Item = &'a str>,
    ) -> Result<String, GitError> {
        let mut argv = Vec::new();
        if let Some(dir) = folder.or(self.work_dir.as_deref()) {
            argv.push("--git-dir".to_string());
            argv.push(path_arg(&dir.join(".git"))?);
            argv.push("--work-tree".to_string());
            argv.push(path_arg(dir)?);
        }
        argv.extend(args.into_iter().map(str::to_string));
        self.runner.run(&argv)
    }
}

fn path_arg(path: &Path) -> Result<String, GitError> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| GitError::InvalidPath(path.to_path_buf()))
}

fn strings<const N: usize>(args: [&str; N]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}
