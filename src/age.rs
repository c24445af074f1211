//! Time elapsed since the last commit, shown in its coarsest unit
use std::fmt;

use chrono::Utc;
use serde::Serialize;

use crate::git::{self, GitRunner};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Elapsed wall-clock seconds since a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct CommitAge {
    seconds: u64,
}

impl CommitAge {
    pub fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Age of a commit made at `commit_ts`, seen from `now_ts` (both Unix seconds).
    /// Commits dated in the future count as zero seconds old.
    pub fn between(commit_ts: i64, now_ts: i64) -> Self {
        let elapsed = now_ts.saturating_sub(commit_ts).max(0) as u64;
        Self::from_seconds(elapsed)
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }
}

impl fmt::Display for CommitAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.seconds / DAY;
        let rest = self.seconds % DAY;

        if days > 0 {
            write!(f, "{}d", days)
        } else if rest > HOUR {
            write!(f, "{}h", rest / HOUR)
        } else if rest > MINUTE {
            write!(f, "{}m", rest / MINUTE)
        } else {
            write!(f, "{}s", rest)
        }
    }
}

impl From<CommitAge> for String {
    fn from(age: CommitAge) -> Self {
        age.to_string()
    }
}

/// Age of HEAD, or `None` when there are no commits or git fails
pub fn time_since_last_commit(git: &dyn GitRunner) -> Option<CommitAge> {
    let commit_ts = git::last_commit_timestamp(git)?;
    Some(CommitAge::between(commit_ts, Utc::now().timestamp()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::FakeGit;

    fn label(seconds: u64) -> String {
        CommitAge::from_seconds(seconds).to_string()
    }

    #[test]
    fn test_single_coarsest_unit() {
        assert_eq!(label(30), "30s");
        assert_eq!(label(90 * 60), "1h");
        assert_eq!(label(5 * 60 + 59), "5m");
        assert_eq!(label(3 * DAY + 7 * HOUR), "3d");
    }

    #[test]
    fn test_unit_boundaries() {
        assert_eq!(label(0), "0s");
        assert_eq!(label(60), "60s");
        assert_eq!(label(61), "1m");
        assert_eq!(label(3600), "60m");
        assert_eq!(label(3601), "1h");
        assert_eq!(label(DAY - 1), "23h");
        assert_eq!(label(DAY), "1d");
    }

    #[test]
    fn test_future_commit_is_zero_seconds_old() {
        let age = CommitAge::between(1_000, 900);
        assert_eq!(age.seconds(), 0);
        assert_eq!(age.to_string(), "0s");
    }

    #[test]
    fn test_between() {
        assert_eq!(CommitAge::between(1_000, 1_030).to_string(), "30s");
    }

    #[test]
    fn test_time_since_last_commit() {
        let recent = Utc::now().timestamp() - 2 * DAY as i64 - 10;
        let git = FakeGit::new(".").respond(git::LAST_COMMIT_TIME, &format!("{}\n", recent));
        assert_eq!(
            time_since_last_commit(&git).map(|age| age.to_string()),
            Some("2d".to_string())
        );

        let empty_repo = FakeGit::new(".").fail(git::LAST_COMMIT_TIME);
        assert_eq!(time_since_last_commit(&empty_repo), None);
    }
}
