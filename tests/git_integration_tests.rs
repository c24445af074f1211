use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::atomic::AtomicBool;

use churnline::{
    count_changes, is_inside_working_tree, run_monitor, run_once, time_since_last_commit,
    ChurnConfig, SystemGit,
};
use tempfile::TempDir;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(["-c", "commit.gpgsign=false", "-c", "init.defaultBranch=main"])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git")
        .status;
    assert!(status.success(), "git {:?} failed", args);
}

/// A repository with one committed file of five lines
fn committed_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path();
    git(path, &["init", "-q"]);
    fs::write(path.join("main.rs"), "a\nb\nc\nd\ne\n").expect("Failed to write test file");
    git(path, &["add", "main.rs"]);
    git(path, &["commit", "-q", "-m", "initial"]);
    temp_dir
}

#[test]
fn test_plain_directory_is_not_a_repository() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let git = SystemGit::new(temp_dir.path());

    // A temp dir could sit inside someone's checkout; only assert when it doesn't.
    if is_inside_working_tree(&git) {
        return;
    }

    let mut out = Vec::new();
    run_once(&git, &ChurnConfig::default(), &mut out).unwrap();
    assert!(out.is_empty());

    let running = AtomicBool::new(true);
    let mut out = Vec::new();
    run_monitor(&git, &ChurnConfig::default(), &mut out, &running).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Not in a git repository\n");
}

#[test]
fn test_clean_repository_counts_zero() {
    if !git_available() {
        return;
    }
    let repo = committed_repo();
    let git = SystemGit::new(repo.path());

    assert!(is_inside_working_tree(&git));
    assert_eq!(count_changes(&git).total(), 0);
    assert!(time_since_last_commit(&git).is_some());
}

#[test]
fn test_counts_unstaged_staged_and_untracked() {
    if !git_available() {
        return;
    }
    let repo = committed_repo();
    let path = repo.path();

    // Unstaged: one line replaced -> 1 removed + 1 added
    fs::write(path.join("main.rs"), "a\nB\nc\nd\ne\n").unwrap();

    // Staged: a new file with two lines
    fs::write(path.join("lib.rs"), "x\ny\n").unwrap();
    git(path, &["add", "lib.rs"]);

    // Untracked: three non-blank lines, plus an ignored file that must not count
    fs::write(path.join("notes.txt"), "one\n\n  \ntwo\nthree\n").unwrap();
    fs::write(path.join(".gitignore"), "*.log\n").unwrap();
    fs::write(path.join("debug.log"), "noise\nnoise\nnoise\n").unwrap();

    let count = count_changes(&SystemGit::new(path));
    assert_eq!(count.tracked, 2);
    assert_eq!(count.staged, 2);
    // notes.txt (3) + .gitignore (1)
    assert_eq!(count.untracked, 4);
    assert_eq!(count.total(), 8);
}

#[test]
fn test_empty_repository_has_no_commit_age() {
    if !git_available() {
        return;
    }
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    git(temp_dir.path(), &["init", "-q"]);
    fs::write(temp_dir.path().join("new.txt"), "hello\n").unwrap();

    let git = SystemGit::new(temp_dir.path());
    assert!(time_since_last_commit(&git).is_none());

    let mut out = Vec::new();
    run_once(&git, &ChurnConfig::default(), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "🟩 1");
}

#[test]
fn test_untracked_file_with_non_ascii_name_is_counted() {
    if !git_available() {
        return;
    }
    let repo = committed_repo();
    let path = repo.path();
    // Default core.quotePath would print this as "caf\303\251.txt"
    git(path, &["config", "core.quotePath", "true"]);
    fs::write(path.join("café.txt"), "un\ndeux\n\ntrois\n").unwrap();

    let count = count_changes(&SystemGit::new(path));
    assert_eq!(count.untracked, 3);
    assert_eq!(count.total(), 3);
}
