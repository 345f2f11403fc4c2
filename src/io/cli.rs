//! Command-line interface for batch stimulus reconstruction
//!
//! Processes trial files (or directories of them) into per-trial,
//! per-phase PNG images. Failures are caught per trial: each one is
//! recorded and reported at the end while the rest of the batch keeps
//! going, so a single malformed trial never aborts a run.

use crate::io::configuration::{DEFAULT_CANVAS_SIZE, DEFAULT_SEED, OUTPUT_SUFFIX};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{RasterConfig, export_scene_png};
use crate::io::progress::ProgressManager;
use crate::io::trials::{infer_experiment, load_trial_file};
use crate::resolve::assignment::{Experiment, Trial, reconstruct};
use crate::resolve::sampler::trial_seed;
use crate::scene::project::project;
use clap::Parser;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "stimgen")]
#[command(
    author,
    version,
    about = "Reconstruct experiment stimuli from trial condition files"
)]
/// Command-line arguments for the reconstruction tool
pub struct Cli {
    /// Input trial file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Base seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum trials per file (0 = all)
    #[arg(short, long, default_value_t = 0)]
    pub max_trials: usize,

    /// Canvas edge length in pixels
    #[arg(short, long, default_value_t = DEFAULT_CANVAS_SIZE)]
    pub canvas: u32,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output directories should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// One recorded per-trial failure
#[derive(Debug)]
pub struct TrialFailure {
    /// Trial file the failure occurred in
    pub file: PathBuf,
    /// 1-based trial number within the file (0 = file-level failure)
    pub trial: usize,
    /// Rendered failure reason
    pub reason: String,
}

/// Orchestrates batch processing of trial files
pub struct BatchRunner {
    cli: Cli,
    raster: RasterConfig,
    progress: Option<ProgressManager>,
    failures: Vec<TrialFailure>,
    trials_done: usize,
    relaxed_trials: usize,
}

impl BatchRunner {
    /// Create a runner from parsed CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = cli.should_show_progress().then(ProgressManager::new);
        let raster = RasterConfig::for_size(cli.canvas);
        Self {
            cli,
            raster,
            progress,
            failures: Vec::new(),
            trials_done: 0,
            relaxed_trials: 0,
        }
    }

    /// Process the batch
    ///
    /// # Errors
    ///
    /// Returns an error only for target-level problems (missing or
    /// unrecognized target); per-trial and per-file failures are
    /// recorded and reported instead.
    pub fn run(&mut self) -> Result<()> {
        let files = self.collect_files()?;
        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress {
            pm.initialize(files.len());
        }

        for file in &files {
            if let Err(error) = self.process_file(file) {
                self.failures.push(TrialFailure {
                    file: file.clone(),
                    trial: 0,
                    reason: error.to_string(),
                });
            }
            if let Some(ref mut pm) = self.progress {
                pm.complete_file();
            }
        }

        if let Some(ref mut pm) = self.progress {
            pm.finish();
        }
        self.report();
        Ok(())
    }

    /// Trials reconstructed so far
    pub const fn trials_done(&self) -> usize {
        self.trials_done
    }

    /// Recorded failures
    pub fn failures(&self) -> &[TrialFailure] {
        &self.failures
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let is_trial_file = |path: &Path| {
            path.extension().and_then(|s| s.to_str()) == Some("txt")
                && path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(infer_experiment)
                    .is_some()
        };

        if self.cli.target.is_file() {
            if is_trial_file(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"target file must be a recognized trial file (.txt with an experiment prefix)",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if is_trial_file(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be a trial file or directory",
            ))
        }
    }

    // Allow print for user feedback on skipped files
    #[allow(clippy::print_stderr)]
    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_dir = Self::output_dir(input_path);
        if output_dir.exists() {
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path) -> Result<()> {
        let (experiment, trials) = load_trial_file(input_path)?;

        let limit = if self.cli.max_trials == 0 {
            trials.len()
        } else {
            self.cli.max_trials.min(trials.len())
        };
        let selected = trials.get(..limit).unwrap_or(&trials);

        if let Some(ref mut pm) = self.progress {
            pm.start_file(input_path, selected.len());
        }

        let output_dir = Self::output_dir(input_path);
        let mut subject_counters: HashMap<u32, u64> = HashMap::new();

        for (row, trial) in selected.iter().enumerate() {
            let counter = subject_counters.entry(trial.subject()).or_insert(0);
            *counter += 1;
            let index = *counter;

            if let Err(error) = self.render_trial(experiment, trial, index, &output_dir) {
                self.failures.push(TrialFailure {
                    file: input_path.to_path_buf(),
                    trial: row + 1,
                    reason: error.to_string(),
                });
            } else {
                self.trials_done += 1;
            }
            if let Some(ref pm) = self.progress {
                pm.trial_done();
            }
        }

        Ok(())
    }

    fn render_trial(
        &mut self,
        experiment: Experiment,
        trial: &Trial,
        trial_index: u64,
        output_dir: &Path,
    ) -> Result<()> {
        let seed = trial_seed(
            self.cli.seed,
            experiment.id(),
            trial.subject() as u64,
            trial_index,
        );
        let reconstruction = reconstruct(trial, seed)?;
        if reconstruction.relaxations > 0 {
            self.relaxed_trials += 1;
        }

        let subject_dir = output_dir.join(format!("subject_{:02}", trial.subject()));
        for &phase in experiment.phases() {
            let scene = project(&reconstruction.assignment, phase)?;
            // Phases a trial never shows (e.g. the probe of a baseline
            // wheel trial) project to an empty scene and are skipped
            if scene.elements.is_empty() {
                continue;
            }
            let file_name = format!("Trial_{trial_index:04}_{}.png", phase.label());
            export_scene_png(&scene, &self.raster, &subject_dir.join(file_name))?;
        }
        Ok(())
    }

    fn output_dir(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let dir_name = format!("{}{OUTPUT_SUFFIX}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(dir_name)
        } else {
            PathBuf::from(dir_name)
        }
    }

    // Allow print for user-facing batch summary
    #[allow(clippy::print_stderr)]
    fn report(&self) {
        if self.cli.quiet {
            return;
        }
        eprintln!(
            "Reconstructed {} trials ({} failed)",
            self.trials_done,
            self.failures.len()
        );
        if self.relaxed_trials > 0 {
            eprintln!(
                "Palette constraints relaxed on {} trials (palette may be undersized)",
                self.relaxed_trials
            );
        }
        for failure in &self.failures {
            if failure.trial == 0 {
                eprintln!("  {}: {}", failure.file.display(), failure.reason);
            } else {
                eprintln!(
                    "  {} trial {}: {}",
                    failure.file.display(),
                    failure.trial,
                    failure.reason
                );
            }
        }
    }
}
