//! Turning a change count into a colored or emoji status string
use clap::ValueEnum;
use serde::Serialize;

use crate::age::CommitAge;
use crate::config::{ChurnConfig, DEFAULT_HIGH_THRESHOLD, DEFAULT_MEDIUM_THRESHOLD};
use crate::counter::ChangeCount;

pub const RESET: &str = "\x1b[0m";

/// Severity bucket for a change count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Low,
    Medium,
    High,
}

impl Bucket {
    /// Bucket using the default 20 / 100 thresholds
    pub fn for_count(count: u64) -> Self {
        Self::with_thresholds(count, DEFAULT_MEDIUM_THRESHOLD, DEFAULT_HIGH_THRESHOLD)
    }

    pub fn with_thresholds(count: u64, medium: u64, high: u64) -> Self {
        if count < medium {
            Bucket::Low
        } else if count < high {
            Bucket::Medium
        } else {
            Bucket::High
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Bucket::Low => "🟩",
            Bucket::Medium => "🟧",
            Bucket::High => "🟥",
        }
    }

    /// ANSI SGR background color
    pub fn background(&self) -> &'static str {
        match self {
            Bucket::Low => "\x1b[42m",    // Green
            Bucket::Medium => "\x1b[43m", // Yellow
            Bucket::High => "\x1b[41m",   // Red
        }
    }
}

/// How the status line looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusStyle {
    /// Colored square, count and commit age (e.g. "🟧 42 ⏰3h")
    Emoji,
    /// Count on a colored background block
    Block,
}

/// Everything known about the working tree after one poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub tracked: u64,
    pub staged: u64,
    pub untracked: u64,
    pub total: u64,
    pub bucket: Bucket,
    pub commit_age: Option<CommitAge>,
}

impl Status {
    pub fn new(count: ChangeCount, commit_age: Option<CommitAge>, config: &ChurnConfig) -> Self {
        let total = count.total();
        Self {
            tracked: count.tracked,
            staged: count.staged,
            untracked: count.untracked,
            total,
            bucket: Bucket::with_thresholds(total, config.medium_threshold, config.high_threshold),
            commit_age,
        }
    }

    pub fn render(&self, style: StatusStyle) -> String {
        match style {
            StatusStyle::Emoji => render_emoji(self.bucket, self.total, self.commit_age),
            StatusStyle::Block => render_block(self.bucket, self.total),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// `"<emoji> <count>"`, plus `" ⏰<age>"` when the age is known
pub fn render_emoji(bucket: Bucket, total: u64, commit_age: Option<CommitAge>) -> String {
    match commit_age {
        Some(age) => format!("{} {} ⏰{}", bucket.emoji(), total, age),
        None => format!("{} {}", bucket.emoji(), total),
    }
}

/// `" Lines <count> LOC "` on the bucket's background color
pub fn render_block(bucket: Bucket, total: u64) -> String {
    format!("{} Lines {:4} LOC {}", bucket.background(), total, RESET)
}
