//! Trial file parsing: prefix inference, header handling, and range
//! validation

use stimgen::io::error::StimulusError;
use stimgen::io::trials::{infer_experiment, load_trial_file};
use stimgen::resolve::assignment::{Experiment, Trial};
use stimgen::resolve::wheel::WheelKind;
use std::io::Write;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn experiment_prefixes_are_inferred_from_file_stems() {
    assert_eq!(
        infer_experiment("dumbbell_s01"),
        Some((Experiment::Dumbbell, None))
    );
    assert_eq!(
        infer_experiment("wheel_color_exp1a"),
        Some((Experiment::Wheel, Some(WheelKind::Color)))
    );
    assert_eq!(
        infer_experiment("wheel_shape_exp1b"),
        Some((Experiment::Wheel, Some(WheelKind::Shape)))
    );
    assert_eq!(infer_experiment("results_raw"), None);
}

#[test]
fn dumbbell_file_parses_with_header_and_comments() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "dumbbell_s01.txt",
        "# reconstructed conditions\n\
         subject conditions orientation consis\n\
         1 4 0 1\n\
         \n\
         1 2 1 0\n",
    );

    let (experiment, trials) = load_trial_file(&path).unwrap();
    assert_eq!(experiment, Experiment::Dumbbell);
    assert_eq!(trials.len(), 2);
    let Some(Trial::Dumbbell(first)) = trials.first() else {
        unreachable!("expected a dumbbell trial");
    };
    assert_eq!(first.subject, 1);
}

#[test]
fn out_of_range_condition_codes_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "dumbbell_bad.txt", "1 9 0 1\n");
    let error = load_trial_file(&path).unwrap_err();
    match error {
        StimulusError::UnknownCondition { field, value, .. } => {
            assert_eq!(field, "conditions");
            assert_eq!(value, 9);
        }
        other => unreachable!("expected UnknownCondition, got {other}"),
    }
}

#[test]
fn wrong_column_counts_are_rejected_with_line_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "field_bad.txt", "1 2 3 0\n1 2 3\n");
    let error = load_trial_file(&path).unwrap_err();
    match error {
        StimulusError::TrialData { line, reason, .. } => {
            assert_eq!(line, 2);
            assert!(reason.contains("4 columns"));
        }
        other => unreachable!("expected TrialData, got {other}"),
    }
}

#[test]
fn bars_rows_validate_every_categorical_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bars_s02.txt", "2 3 3 4 2 3\n");
    let (experiment, trials) = load_trial_file(&path).unwrap();
    assert_eq!(experiment, Experiment::Bars);
    let Some(Trial::Bars(trial)) = trials.first() else {
        unreachable!("expected a bars trial");
    };
    assert!(trial.probe_change);
    assert_eq!(trial.cued_count(), 4);

    let bad = write_file(&dir, "bars_bad.txt", "2 3 7 4 2 3\n");
    assert!(load_trial_file(&bad).is_err());
}

#[test]
fn baseline_wheel_rows_drop_the_probe() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "wheel_shape_s01.txt",
        "subject memory probe test\n\
         1 120 200 0\n\
         1 44 310 2\n\
         1 17 0 1\n",
    );
    let (_, trials) = load_trial_file(&path).unwrap();
    let probes: Vec<Option<usize>> = trials
        .iter()
        .map(|t| match t {
            Trial::Wheel(w) => w.probe_index,
            _ => unreachable!("expected wheel trials"),
        })
        .collect();
    assert_eq!(probes, vec![None, Some(310), None]);
}
