use clap::Parser;

use crate::config::ChurnConfig;
use crate::render::StatusStyle;

#[derive(Parser, Debug)]
#[command(name = "churnline")]
#[command(author = "xicv")]
#[command(version)]
#[command(about = "Shows how many lines your git working tree has churned since the last commit")]
#[command(long_about = "churnline counts added and removed lines in unstaged and staged diffs plus the non-blank lines of untracked files, and prints a color-coded status. Without flags it prints once (for shell prompts); with --monitor it keeps a live line updated.")]
pub struct Cli {
    /// Keep running and repaint the status whenever it changes
    #[arg(short, long, help = "Run in continuous monitoring mode")]
    pub monitor: bool,

    /// Status rendering variant
    #[arg(long, value_enum, default_value = "emoji", help = "Status style")]
    pub style: StatusStyle,

    /// Machine-readable output
    #[arg(long, help = "Print a JSON status snapshot instead of styled text")]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose diagnostics on stderr")]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> ChurnConfig {
        ChurnConfig {
            style: self.style,
            json: self.json,
            ..ChurnConfig::default()
        }
    }

    /// Diagnostics go to stderr so stdout only ever carries the status.
    pub fn setup_logging(&self) {
        let level = if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }
}
