//! One-shot and continuous presentation of the churn status
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::age::time_since_last_commit;
use crate::config::ChurnConfig;
use crate::counter::count_changes;
use crate::git::{is_inside_working_tree, GitRunner};
use crate::render::Status;

pub const NOT_A_REPOSITORY: &str = "Not in a git repository";
pub const FAREWELL: &str = "Exiting...";

/// Erase the current line and return the cursor to column 0
const CLEAR_LINE: &str = "\r\x1b[K";

/// Longest uninterrupted sleep while waiting for the next poll
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Poll git once and build a status snapshot
pub fn snapshot(git: &dyn GitRunner, config: &ChurnConfig) -> Status {
    let count = count_changes(git);
    let commit_age = time_since_last_commit(git);
    Status::new(count, commit_age, config)
}

/// Text that goes to the terminal for a snapshot
pub fn format_status(status: &Status, config: &ChurnConfig) -> Result<String> {
    if config.json {
        status.to_json().context("Failed to serialize status")
    } else {
        Ok(status.render(config.style))
    }
}

/// Render once with no trailing newline; print nothing outside a repository
pub fn run_once<W: Write>(git: &dyn GitRunner, config: &ChurnConfig, out: &mut W) -> Result<()> {
    if !is_inside_working_tree(git) {
        tracing::debug!("{} is not inside a working tree", git.workdir().display());
        return Ok(());
    }

    let rendered = format_status(&snapshot(git, config), config)?;
    out.write_all(rendered.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// How a new frame replaces the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaintMode {
    /// Overwrite the current terminal line in place
    InPlace,
    /// Print each frame on its own line (for piping JSON)
    Append,
}

/// Writes a frame only when it differs from the last one written
pub struct Repainter<W: Write> {
    out: W,
    mode: RepaintMode,
    last: Option<String>,
}

impl<W: Write> Repainter<W> {
    pub fn new(out: W, mode: RepaintMode) -> Self {
        Self {
            out,
            mode,
            last: None,
        }
    }

    /// Returns whether anything was written
    pub fn paint(&mut self, frame: &str) -> std::io::Result<bool> {
        if self.last.as_deref() == Some(frame) {
            return Ok(false);
        }

        match self.mode {
            RepaintMode::InPlace => write!(self.out, "{}{}", CLEAR_LINE, frame)?,
            RepaintMode::Append => writeln!(self.out, "{}", frame)?,
        }
        self.out.flush()?;

        self.last = Some(frame.to_string());
        Ok(true)
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Ctrl+C clears the returned flag instead of killing the process
pub fn install_interrupt_handler() -> Result<Arc<AtomicBool>> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("Failed to install Ctrl+C handler")?;
    Ok(running)
}

fn sleep_while_running(interval: Duration, running: &AtomicBool) {
    let deadline = Instant::now() + interval;
    while running.load(Ordering::SeqCst) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep((deadline - now).min(SLEEP_SLICE));
    }
}

/// Repaint the status whenever it changes until `running` is cleared
pub fn run_monitor<W: Write>(
    git: &dyn GitRunner,
    config: &ChurnConfig,
    out: &mut W,
    running: &AtomicBool,
) -> Result<()> {
    if !is_inside_working_tree(git) {
        writeln!(out, "{}", NOT_A_REPOSITORY)?;
        out.flush()?;
        return Ok(());
    }

    let mode = if config.json {
        RepaintMode::Append
    } else {
        RepaintMode::InPlace
    };
    let mut painter = Repainter::new(&mut *out, mode);

    tracing::debug!(
        "Monitoring {} every {:?}",
        git.workdir().display(),
        config.poll_interval()
    );

    while running.load(Ordering::SeqCst) {
        let status = snapshot(git, config);
        // Ctrl+C also kills the git children, so this poll's counts are bogus
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let frame = format_status(&status, config)?;
        if painter.paint(&frame)? {
            tracing::debug!("Repainted: {}", frame);
        }
        sleep_while_running(config.poll_interval(), running);
    }

    // Append frames already end with a newline
    if mode == RepaintMode::InPlace {
        writeln!(out)?;
    }
    writeln!(out, "{}", FAREWELL)?;
    out.flush()?;
    Ok(())
}
