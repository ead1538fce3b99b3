//! Terminal output and progress display

use crate::cli::args::VerbosityLevel;
use crate::core::{ResolvedLink, RunReport, RunRequest};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::fmt::MakeWriter;

/// Output formatter for dmax-links
pub struct OutputFormatter {
    verbosity: VerbosityLevel,
    progress_bar: Option<ProgressBar>,
}

impl OutputFormatter {
    /// Create a new output formatter
    ///
    /// In normal mode the progress bar exists from the start but stays hidden
    /// until the first episode is reported, so log lines can already be
    /// routed around it.
    pub fn new(verbosity: VerbosityLevel) -> Self {
        let progress_bar = (verbosity == VerbosityLevel::Normal).then(Self::create_progress_bar);

        Self {
            verbosity,
            progress_bar,
        }
    }

    /// Whether a progress bar is shown while resolving
    pub fn shows_progress(&self) -> bool {
        self.verbosity == VerbosityLevel::Normal
    }

    fn create_progress_bar() -> ProgressBar {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let progress_bar = ProgressBar::hidden();
        progress_bar.set_style(style);
        progress_bar
    }

    /// Writer for log output that pauses the progress bar while a line is written
    pub fn log_writer(&self) -> ProgressLogWriter {
        ProgressLogWriter {
            progress_bar: self.progress_bar.clone(),
        }
    }

    /// Advance the progress bar after a finished episode
    pub fn update_link(&mut self, index: usize, total: usize, link: &ResolvedLink) {
        let Some(progress_bar) = &self.progress_bar else {
            return;
        };

        if progress_bar.is_hidden() {
            progress_bar.set_length(total as u64);
            progress_bar.set_draw_target(ProgressDrawTarget::stderr());
        }

        progress_bar.set_position(index as u64 + 1);
        if link.is_resolved() {
            progress_bar.set_message(link.episode.name.clone());
        } else {
            progress_bar.println(format!("{} {}", "✗".red(), link.episode));
        }
    }

    /// Finish progress bar
    pub fn finish_progress(&self) {
        if let Some(progress_bar) = &self.progress_bar {
            progress_bar.finish_and_clear();
        }
    }

    /// Print info message
    pub fn info(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("{} {}", "ℹ".blue(), message);
        }
    }

    /// Print warning message
    pub fn warning(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            eprintln!("{} {}", "⚠".yellow(), message);
        }
    }

    /// Print error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message);
    }

    /// Print what is about to be resolved
    pub fn print_run_start(&self, request: &RunRequest) {
        self.info(&format!(
            "Show {} on '{}', {}",
            request.show_id, request.realm, request.criterion
        ));
    }

    /// Print the outcome of a run
    pub fn print_summary(&self, report: &RunReport, path: &Path) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        if !report.skipped_pages.is_empty() {
            self.warning(&format!(
                "Catalog is incomplete, skipped pages: {}",
                join_numbers(&report.skipped_pages)
            ));
        }

        println!("📺 {}", report.show.name.bold());
        println!("{}", summary_line(report));
        println!("💾 Saved to: {}", path.display());
    }
}

/// [`MakeWriter`] for the log layer that keeps log lines from tearing the
/// progress bar
#[derive(Clone)]
pub struct ProgressLogWriter {
    progress_bar: Option<ProgressBar>,
}

impl Write for ProgressLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.progress_bar {
            Some(progress_bar) => progress_bar
                .suspend(|| io::stderr().write_all(buf))
                .map(|()| buf.len()),
            None => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for ProgressLogWriter {
    type Writer = ProgressLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// `"3 of 4 links resolved, 1 failed"`
pub fn summary_line(report: &RunReport) -> String {
    let resolved = report.resolved_count();
    let failed = report.failed_count();
    let line = format!("{} of {} links resolved", resolved, report.links.len());

    if failed == 0 {
        format!("{}", line.green())
    } else {
        format!("{}, {}", line.yellow(), format!("{} failed", failed).red())
    }
}

fn join_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
