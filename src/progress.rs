use std::path::Path;

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};
use crate::depcruise::Pipeline;
use crate::resolver::{ConfigSource, ResolvedConfig};

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg} [{elapsed}]";

/// Status output on stderr. The spinner is only drawn on a terminal.
pub struct ProgressReporter {
    term: Term,
    verbose: bool,
    current_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            term: Term::stderr(),
            verbose,
            current_bar: None,
        }
    }

    fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        let mut frames: Vec<&str> = SPINNER_FRAMES.to_vec();
        frames.push("✓");
        pb.set_style(
            ProgressStyle::default_spinner()
                .template(SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&frames),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    pub fn config_resolved(&self, config: &ResolvedConfig) {
        let origin = match config.source {
            ConfigSource::Project => "project",
            ConfigSource::Bundled => "bundled",
        };
        eprintln!(
            "{} Using {} config {}",
            style("⚙").cyan(),
            origin,
            style(config.config_path.display()).dim()
        );
    }

    pub fn start_run(&mut self, pipeline: &Pipeline) {
        if self.verbose {
            eprintln!("{} {}", style("$").dim(), style(pipeline).dim());
        }
        if self.term.is_term() {
            let message = if pipeline.layout.is_some() {
                "Cruising dependencies and laying out the graph..."
            } else {
                "Cruising dependencies..."
            };
            self.current_bar = Some(self.create_spinner(message));
        }
    }

    pub fn finish_run(&mut self, bytes: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        eprintln!(
            "{} Graph generated ({} bytes)",
            style("✓").green(),
            style(bytes).yellow().bold()
        );
    }

    pub fn fail_run(&mut self) {
        if let Some(pb) = self.current_bar.take() {
            pb.abandon();
        }
        let _ = self.term.clear_line();
    }

    pub fn preview_written(&self, path: &Path, replaced: bool) {
        eprintln!(
            "{} Preview {} {}",
            style("👁").cyan(),
            if replaced { "updated at" } else { "written to" },
            style(path.display()).bold()
        );
    }

    pub fn saved(&self, path: &Path) {
        eprintln!(
            "{} Saved to {}",
            style("✓").green(),
            style(path.display()).bold()
        );
    }
}
