//! Batch progress display for multi-file reconstruction runs

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates progress display for batch runs
///
/// Small batches get one bar per trial file; large batches collapse to
/// a single file-level bar to avoid terminal spam.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static TRIAL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create an idle progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bar: None,
        }
    }

    /// Initialize display for a batch of trial files
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Start the per-trial bar for one file
    pub fn start_file(&mut self, path: &Path, trial_count: usize) {
        if let Some(old) = self.file_bar.take() {
            old.finish_and_clear();
        }
        let bar = ProgressBar::new(trial_count as u64);
        bar.set_style(TRIAL_STYLE.clone());
        bar.set_message(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );
        self.file_bar = Some(self.multi_progress.add(bar));
    }

    /// Report one completed trial of the current file
    pub fn trial_done(&self) {
        if let Some(ref bar) = self.file_bar {
            bar.inc(1);
        }
    }

    /// Mark the current file as finished
    pub fn complete_file(&mut self) {
        if let Some(bar) = self.file_bar.take() {
            bar.finish_and_clear();
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }
}
