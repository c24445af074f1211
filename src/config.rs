//! Configuration for churnline
//!
//! All values come from built-in defaults, optionally overridden by CLI
//! flags. Nothing is read from disk or from the environment.

use std::time::Duration;

use crate::render::StatusStyle;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_MEDIUM_THRESHOLD: u64 = 20;
pub const DEFAULT_HIGH_THRESHOLD: u64 = 100;

/// Runtime configuration shared by the counter, renderer and monitor loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChurnConfig {
    /// Delay between two polls in monitor mode, in milliseconds
    pub poll_interval_ms: u64,
    /// Counts at or above this are rendered as the medium bucket
    pub medium_threshold: u64,
    /// Counts at or above this are rendered as the high bucket
    pub high_threshold: u64,
    /// Name or path of the git executable
    pub git_binary: String,
    /// Rendering variant
    pub style: StatusStyle,
    /// Emit JSON snapshots instead of styled text
    pub json: bool,
}

impl Default for ChurnConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            medium_threshold: DEFAULT_MEDIUM_THRESHOLD,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            git_binary: "git".to_string(),
            style: StatusStyle::Emoji,
            json: false,
        }
    }
}

impl ChurnConfig {
    /// Get poll interval duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be greater than 0".to_string());
        }

        if self.medium_threshold >= self.high_threshold {
            return Err(format!(
                "medium_threshold ({}) must be below high_threshold ({})",
                self.medium_threshold, self.high_threshold
            ));
        }

        if self.git_binary.trim().is_empty() {
            return Err("git_binary must not be empty".to_string());
        }

        Ok(())
    }
}
