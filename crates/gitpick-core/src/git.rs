use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{PickError, Result};
use crate::session::{CheckoutSink, LogSource};

pub const DEFAULT_LOG_COMMAND: &str = "smartlog";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub success: bool,
}

impl GitOutput {
    pub fn summary(&self) -> &str {
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout;
        }
        self.stderr.trim()
    }
}

#[derive(Debug, Clone)]
pub struct GitRunner {
    git_binary: String,
}

impl Default for GitRunner {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitRunner {
    pub fn new(git_binary: impl Into<String>) -> Self {
        Self {
            git_binary: git_binary.into(),
        }
    }

    pub fn git_binary(&self) -> &str {
        &self.git_binary
    }

    /// Runs git with captured output. Only a failure to spawn is an error.
    pub fn exec(&self, repo_path: &Path, args: &[String]) -> Result<GitOutput> {
        debug!(git = %self.git_binary, ?args, repo = %repo_path.display(), "running git");
        let output = Command::new(&self.git_binary)
            .current_dir(repo_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| PickError::io("running git command", source))?;
        Ok(GitOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
            success: output.status.success(),
        })
    }
}

pub fn split_log_command(log_command: &str) -> Vec<String> {
    shlex::split(log_command).unwrap_or_else(|| {
        log_command
            .split_whitespace()
            .map(ToString::to_string)
            .collect()
    })
}

/// Reads the graph by running a git subcommand (`git smartlog` by default).
#[derive(Debug, Clone)]
pub struct GitLogSource {
    runner: GitRunner,
    repo: PathBuf,
    args: Vec<String>,
}

impl GitLogSource {
    pub fn new(runner: GitRunner, repo: impl Into<PathBuf>, log_command: &str) -> Self {
        Self {
            runner,
            repo: repo.into(),
            args: split_log_command(log_command),
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl LogSource for GitLogSource {
    fn read_lines(&mut self) -> Result<Vec<String>> {
        if self.args.is_empty() {
            return Err(PickError::source_unavailable("log command is empty"));
        }
        let out = self.runner.exec(&self.repo, &self.args).map_err(|err| {
            PickError::source_unavailable(format!(
                "could not run `{} {}`: {err}",
                self.runner.git_binary(),
                self.args.join(" ")
            ))
        })?;
        if !out.success {
            return Err(PickError::source_unavailable(format!(
                "`{} {}` exited with {:?}: {}",
                self.runner.git_binary(),
                self.args.join(" "),
                out.exit_code,
                out.stderr.trim()
            )));
        }
        Ok(out.stdout.lines().map(ToString::to_string).collect())
    }
}

#[derive(Debug, Clone)]
pub struct GitCheckout {
    runner: GitRunner,
    repo: PathBuf,
    last_output: Option<GitOutput>,
}

impl GitCheckout {
    pub fn new(runner: GitRunner, repo: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            repo: repo.into(),
            last_output: None,
        }
    }

    pub fn last_output(&self) -> Option<&GitOutput> {
        self.last_output.as_ref()
    }
}

impl CheckoutSink for GitCheckout {
    fn checkout(&mut self, reference: &str) -> Result<()> {
        let args = ["checkout".to_string(), reference.to_string()];
        let out = self.runner.exec(&self.repo, &args)?;
        if !out.success {
            return Err(PickError::CheckoutFailed {
                reference: reference.to_string(),
                exit_code: out.exit_code,
                stderr: out.stderr.trim().to_string(),
            });
        }
        self.last_output = Some(out);
        Ok(())
    }
}
