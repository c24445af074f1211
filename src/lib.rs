pub mod age;
pub mod cli;
pub mod config;
pub mod counter;
pub mod git;
pub mod monitor;
pub mod render;

pub use age::{time_since_last_commit, CommitAge};
pub use config::ChurnConfig;
pub use counter::{count_changed_lines, count_changes, ChangeCount};
pub use git::{is_inside_working_tree, CommandOutcome, GitRunner, SystemGit};
pub use monitor::{run_monitor, run_once, Repainter, RepaintMode};
pub use render::{Bucket, Status, StatusStyle};
