//! Thin wrapper around the git command line
//!
//! Every invocation either yields its standard output or `Failed`. Callers
//! decide what a failure means (usually "contributes nothing").

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const IS_INSIDE_WORK_TREE: &[&str] = &["rev-parse", "--is-inside-work-tree"];
pub const UNSTAGED_DIFF: &[&str] = &["diff", "--unified=0"];
pub const STAGED_DIFF: &[&str] = &["diff", "--staged", "--unified=0"];
/// `core.quotePath=false` keeps non-ASCII paths verbatim instead of C-quoted
pub const UNTRACKED_FILES: &[&str] = &[
    "-c",
    "core.quotePath=false",
    "ls-files",
    "--others",
    "--exclude-standard",
];
pub const LAST_COMMIT_TIME: &[&str] = &["log", "-1", "--format=%ct"];

/// Result of running one git command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Exit status was zero; holds stdout
    Ok(String),
    /// Spawn failure or non-zero exit
    Failed,
}

impl CommandOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, CommandOutcome::Ok(_))
    }

    /// Stdout on success, `None` on failure
    pub fn output(&self) -> Option<&str> {
        match self {
            CommandOutcome::Ok(stdout) => Some(stdout),
            CommandOutcome::Failed => None,
        }
    }
}

/// Something that can run git subcommands against a working tree
pub trait GitRunner {
    fn run(&self, args: &[&str]) -> CommandOutcome;

    /// Directory that relative paths printed by git resolve against
    fn workdir(&self) -> &Path;
}

/// Runs the real git binary as a child process
#[derive(Debug, Clone)]
pub struct SystemGit {
    binary: String,
    workdir: PathBuf,
}

impl SystemGit {
    pub fn new<P: AsRef<Path>>(workdir: P) -> Self {
        Self {
            binary: "git".to_string(),
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Runner bound to the process's current directory
    pub fn current_dir() -> Self {
        let workdir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(workdir)
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> CommandOutcome {
        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(output) if output.status.success() => {
                CommandOutcome::Ok(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Ok(output) => {
                tracing::debug!(
                    "git {} exited with {}: {}",
                    args.join(" "),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                CommandOutcome::Failed
            }
            Err(err) => {
                tracing::warn!("Failed to run {}: {}", self.binary, err);
                CommandOutcome::Failed
            }
        }
    }

    fn workdir(&self) -> &Path {
        &self.workdir
    }
}

/// True only when git reports success for the working-tree check
pub fn is_inside_working_tree(git: &dyn GitRunner) -> bool {
    git.run(IS_INSIDE_WORK_TREE).is_ok()
}

/// Unix timestamp of the most recent commit, if there is one
pub fn last_commit_timestamp(git: &dyn GitRunner) -> Option<i64> {
    git.run(LAST_COMMIT_TIME)
        .output()
        .and_then(|stdout| stdout.trim().parse().ok())
}
