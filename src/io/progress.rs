//! Phase progress display for tile preparation and placement

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static PHASE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{prefix:<10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Drives one progress bar per run phase
///
/// Only one phase is active at a time; starting a new phase finishes the
/// previous one.
pub struct ProgressManager {
    current: Option<ProgressBar>,
    completed: Vec<(String, Duration)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no active phase
    pub const fn new() -> Self {
        Self {
            current: None,
            completed: Vec::new(),
        }
    }

    /// Begin a phase of `total` steps
    pub fn start_phase(&mut self, name: &str, total: usize) {
        self.finish_phase();

        let bar = ProgressBar::new(total as u64);
        bar.set_style(PHASE_STYLE.clone());
        bar.set_prefix(name.to_string());
        self.current = Some(bar);
    }

    /// Set the absolute position within the current phase
    pub fn set_position(&self, position: usize) {
        if let Some(ref bar) = self.current {
            bar.set_position(position as u64);
        }
    }

    /// Advance the current phase by one step
    ///
    /// Safe to call from worker threads.
    pub fn tick(&self) {
        if let Some(ref bar) = self.current {
            bar.inc(1);
        }
    }

    /// Current position of the running phase
    pub fn position(&self) -> Option<u64> {
        self.current.as_ref().map(ProgressBar::position)
    }

    /// Mark the current phase complete and remember its duration
    pub fn finish_phase(&mut self) {
        if let Some(bar) = self.current.take() {
            bar.finish_with_message("done");
            self.completed.push((bar.prefix(), bar.elapsed()));
        }
    }

    /// Names and durations of the phases finished so far
    pub fn completed_phases(&self) -> &[(String, Duration)] {
        &self.completed
    }

    /// Whether a phase is currently running
    pub const fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Finish any running phase
    pub fn finish(&mut self) {
        self.finish_phase();
    }
}
