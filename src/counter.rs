//! Change counting
//!
//! Sums three independent sources of churn in a working tree: the unstaged
//! diff, the staged diff, and the non-blank lines of untracked files. A
//! source that cannot be queried contributes zero.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::git::{self, CommandOutcome, GitRunner};

/// Per-source line counts from a single poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeCount {
    pub tracked: u64,
    pub staged: u64,
    pub untracked: u64,
}

impl ChangeCount {
    pub fn total(&self) -> u64 {
        self.tracked + self.staged + self.untracked
    }
}

/// True for `+`/`-` content lines of a unified diff.
///
/// File headers (`+++`, `---`) and hunk headers (`@@`) are not content.
pub fn is_changed_line(line: &str) -> bool {
    (line.starts_with('+') || line.starts_with('-'))
        && !line.starts_with("+++")
        && !line.starts_with("---")
        && !line.starts_with("@@")
}

/// Number of added plus removed lines in unified diff text
pub fn count_diff_lines(diff: &str) -> u64 {
    diff.lines().filter(|line| is_changed_line(line)).count() as u64
}

/// Number of lines that are not empty after trimming whitespace
pub fn count_non_blank_lines(content: &str) -> u64 {
    content.lines().filter(|line| !line.trim().is_empty()).count() as u64
}

fn count_reader_lines<R: BufRead>(reader: R) -> io::Result<u64> {
    let mut count = 0;
    for line in reader.lines() {
        if !line?.trim().is_empty() {
            count += 1;
        }
    }
    Ok(count)
}

/// Non-blank line count of a file, or `None` if it can't be read as text.
/// Streams the file; invalid UTF-8 anywhere skips the whole file.
pub fn count_file_lines(path: &Path) -> Option<u64> {
    let counted = File::open(path).and_then(|file| count_reader_lines(BufReader::new(file)));
    match counted {
        Ok(count) => Some(count),
        Err(err) => {
            tracing::trace!("Skipping untracked file {}: {}", path.display(), err);
            None
        }
    }
}

fn diff_contribution(outcome: CommandOutcome) -> u64 {
    match outcome {
        CommandOutcome::Ok(stdout) => count_diff_lines(&stdout),
        CommandOutcome::Failed => 0,
    }
}

fn untracked_contribution(git: &dyn GitRunner) -> u64 {
    let listing = match git.run(git::UNTRACKED_FILES) {
        CommandOutcome::Ok(stdout) => stdout,
        CommandOutcome::Failed => return 0,
    };

    listing
        .lines()
        .filter(|path| !path.trim().is_empty())
        .filter_map(|path| count_file_lines(&git.workdir().join(path)))
        .sum()
}

/// Query all three sources and return their breakdown
pub fn count_changes(git: &dyn GitRunner) -> ChangeCount {
    let count = ChangeCount {
        tracked: diff_contribution(git.run(git::UNSTAGED_DIFF)),
        staged: diff_contribution(git.run(git::STAGED_DIFF)),
        untracked: untracked_contribution(git),
    };

    tracing::debug!(
        "tracked={} staged={} untracked={} total={}",
        count.tracked,
        count.staged,
        count.untracked,
        count.total()
    );

    count
}

/// Total changed lines across tracked, staged and untracked sources
pub fn count_changed_lines(git: &dyn GitRunner) -> u64 {
    count_changes(git).total()
}
