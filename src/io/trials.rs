//! Trial file loading and validation
//!
//! Trial data arrives as plain whitespace-separated integer columns,
//! one row per trial. The experiment family is inferred from the file
//! name prefix, and every field is range-checked into its typed enum
//! before any resolver can see it; out-of-range codes fail the file
//! load with the offending value.

use crate::io::error::{Result, StimulusError, unknown_condition};
use crate::resolve::assignment::{Experiment, Orientation, Trial};
use crate::resolve::bars::{BarsTrial, ChangeAttribute, SubsetKind};
use crate::resolve::dumbbell::{BindingCondition, DumbbellConsistency, DumbbellTrial};
use crate::resolve::field::{FieldCondition, FieldConsistency, FieldTrial};
use crate::resolve::quadrant::{QuadrantConsistency, QuadrantTrial};
use crate::resolve::search::{
    CueTarget, DistractorCondition, ProbeCondition, SearchTrial, TargetOrientation,
};
use crate::resolve::wheel::{WheelKind, WheelTrial};
use crate::io::configuration::WHEEL_ENTRY_COUNT;
use crate::math::shapes::ShapeKind;
use std::path::Path;

/// Highest display palette index accepted from trial data (1-based)
const COLOR_CODE_MAX: i64 = 6;

/// Infer the experiment family (and wheel stimulus space) from a file
/// stem
pub fn infer_experiment(stem: &str) -> Option<(Experiment, Option<WheelKind>)> {
    if stem.starts_with("wheel_color") {
        return Some((Experiment::Wheel, Some(WheelKind::Color)));
    }
    if stem.starts_with("wheel_shape") {
        return Some((Experiment::Wheel, Some(WheelKind::Shape)));
    }
    for experiment in [
        Experiment::Dumbbell,
        Experiment::Quadrant,
        Experiment::Bars,
        Experiment::Field,
        Experiment::Search,
    ] {
        if stem.starts_with(experiment.label()) {
            return Some((experiment, None));
        }
    }
    None
}

/// Load and validate one trial file
///
/// Blank lines and `#` comments are skipped; a leading non-numeric row
/// is treated as a column header.
///
/// # Errors
///
/// Returns `InvalidParameter` for unrecognized file names, `TrialData`
/// for structural problems (wrong column count, non-integer tokens),
/// and `UnknownCondition` for out-of-range categorical codes.
pub fn load_trial_file(path: &Path) -> Result<(Experiment, Vec<Trial>)> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let Some((experiment, wheel_kind)) = infer_experiment(stem) else {
        return Err(crate::io::error::invalid_parameter(
            "target",
            &path.display(),
            &"file name does not start with a known experiment prefix",
        ));
    };

    let content = std::fs::read_to_string(path).map_err(|e| StimulusError::FileSystem {
        path: path.to_path_buf(),
        operation: "read trial file",
        source: e,
    })?;

    let mut trials = Vec::new();
    let mut saw_data = false;
    for (line_index, line) in content.lines().enumerate() {
        let line_number = line_index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let mut fields = Vec::with_capacity(tokens.len());
        let mut numeric = true;
        for token in &tokens {
            match token.parse::<i64>() {
                Ok(value) => fields.push(value),
                Err(_) => {
                    numeric = false;
                    break;
                }
            }
        }
        if !numeric {
            // The first non-numeric row is the column header
            if saw_data {
                return Err(StimulusError::TrialData {
                    path: path.to_path_buf(),
                    line: line_number,
                    reason: format!("non-integer token in '{trimmed}'"),
                });
            }
            saw_data = true;
            continue;
        }
        saw_data = true;

        let trial = build_trial(experiment, wheel_kind, &fields).map_err(|e| match e {
            StimulusError::TrialData { reason, .. } => StimulusError::TrialData {
                path: path.to_path_buf(),
                line: line_number,
                reason,
            },
            other => other,
        })?;
        trials.push(trial);
    }

    Ok((experiment, trials))
}

/// Structural row error with a placeholder location (the caller fills
/// in path and line)
fn row_error(reason: String) -> StimulusError {
    StimulusError::TrialData {
        path: std::path::PathBuf::new(),
        line: 0,
        reason,
    }
}

fn expect_columns(fields: &[i64], expected: usize) -> Result<()> {
    if fields.len() != expected {
        return Err(row_error(format!(
            "expected {expected} columns, found {}",
            fields.len()
        )));
    }
    Ok(())
}

fn field_at(fields: &[i64], index: usize) -> i64 {
    fields.get(index).copied().unwrap_or(0)
}

fn parse_subject(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| row_error(format!("subject {value} out of range")))
}

fn build_trial(
    experiment: Experiment,
    wheel_kind: Option<WheelKind>,
    fields: &[i64],
) -> Result<Trial> {
    match experiment {
        Experiment::Dumbbell => {
            expect_columns(fields, 4)?;
            let condition = field_at(fields, 1);
            let orientation = field_at(fields, 2);
            let consistency = field_at(fields, 3);
            Ok(Trial::Dumbbell(DumbbellTrial {
                subject: parse_subject(field_at(fields, 0))?,
                condition: BindingCondition::from_code(condition)
                    .ok_or(unknown_condition("dumbbell", "conditions", condition))?,
                orientation: Orientation::from_code(orientation)
                    .ok_or(unknown_condition("dumbbell", "orientation", orientation))?,
                consistency: DumbbellConsistency::from_code(consistency)
                    .ok_or(unknown_condition("dumbbell", "consis", consistency))?,
            }))
        }
        Experiment::Quadrant => {
            expect_columns(fields, 4)?;
            let condition = field_at(fields, 1);
            let orientation = field_at(fields, 2);
            let consistency = field_at(fields, 3);
            Ok(Trial::Quadrant(QuadrantTrial {
                subject: parse_subject(field_at(fields, 0))?,
                condition: BindingCondition::from_code(condition)
                    .ok_or(unknown_condition("quadrant", "conditions", condition))?,
                orientation: Orientation::from_code(orientation)
                    .ok_or(unknown_condition("quadrant", "orientation", orientation))?,
                consistency: QuadrantConsistency::from_code(consistency)
                    .ok_or(unknown_condition("quadrant", "consis", consistency))?,
            }))
        }
        Experiment::Bars => {
            expect_columns(fields, 6)?;
            let subset = field_at(fields, 1);
            let cue_items = field_at(fields, 2);
            let direction = field_at(fields, 3);
            let probe_change = field_at(fields, 4);
            let attribute = field_at(fields, 5);
            if !(1..=3).contains(&cue_items) {
                return Err(unknown_condition("bars", "cue_item_number", cue_items));
            }
            if !(1..=2).contains(&probe_change) {
                return Err(unknown_condition("bars", "probe_change", probe_change));
            }
            Ok(Trial::Bars(BarsTrial {
                subject: parse_subject(field_at(fields, 0))?,
                subset: SubsetKind::from_code(subset)
                    .ok_or(unknown_condition("bars", "color_orientation_type", subset))?,
                cue_items: cue_items as u8,
                direction: crate::spatial::grid::Direction::from_code(direction)
                    .ok_or(unknown_condition("bars", "manipulate_direction", direction))?,
                probe_change: probe_change == 2,
                change_attribute: ChangeAttribute::from_code(attribute)
                    .ok_or(unknown_condition("bars", "change_attribute", attribute))?,
            }))
        }
        Experiment::Field => {
            expect_columns(fields, 4)?;
            let number = field_at(fields, 1);
            let condition = field_at(fields, 2);
            let consistency = field_at(fields, 3);
            if !(1..=5).contains(&number) {
                return Err(unknown_condition("field", "number", number));
            }
            Ok(Trial::Field(FieldTrial {
                subject: parse_subject(field_at(fields, 0))?,
                number: number as u8,
                condition: FieldCondition::from_code(condition)
                    .ok_or(unknown_condition("field", "condition", condition))?,
                consistency: FieldConsistency::from_code(consistency)
                    .ok_or(unknown_condition("field", "consis", consistency))?,
            }))
        }
        Experiment::Search => {
            expect_columns(fields, 7)?;
            let col1 = field_at(fields, 1);
            let col2 = field_at(fields, 2);
            let distractor = field_at(fields, 3);
            let orientation = field_at(fields, 4);
            let cue = field_at(fields, 5);
            let probe = field_at(fields, 6);
            if !(1..=COLOR_CODE_MAX).contains(&col1) {
                return Err(unknown_condition("search", "col1", col1));
            }
            if ShapeKind::from_code(col2).is_none() {
                return Err(unknown_condition("search", "col2", col2));
            }
            Ok(Trial::Search(SearchTrial {
                subject: parse_subject(field_at(fields, 0))?,
                memory_color: col1 as usize,
                memory_shape: col2 as usize,
                distractor: DistractorCondition::from_code(distractor)
                    .ok_or(unknown_condition("search", "dist_cond", distractor))?,
                target_orientation: TargetOrientation::from_code(orientation)
                    .ok_or(unknown_condition("search", "target_orient", orientation))?,
                cue: CueTarget::from_code(cue)
                    .ok_or(unknown_condition("search", "cue_val", cue))?,
                probe_condition: ProbeCondition::from_code(probe)
                    .ok_or(unknown_condition("search", "probe_cond", probe))?,
            }))
        }
        Experiment::Wheel => {
            expect_columns(fields, 4)?;
            let memory_index = field_at(fields, 1);
            let probe_index = field_at(fields, 2);
            let test = field_at(fields, 3);
            let entries = WHEEL_ENTRY_COUNT as i64;
            if !(1..=entries).contains(&memory_index) {
                return Err(unknown_condition("wheel", "memory_index", memory_index));
            }
            if !(0..=entries).contains(&probe_index) {
                return Err(unknown_condition("wheel", "probe_index", probe_index));
            }
            if !(0..=2).contains(&test) {
                return Err(unknown_condition("wheel", "test", test));
            }
            // Baseline trials (test = 0) never show a probe
            let probe = (probe_index > 0 && test != 0).then_some(probe_index as usize);
            Ok(Trial::Wheel(WheelTrial {
                subject: parse_subject(field_at(fields, 0))?,
                kind: wheel_kind.unwrap_or(WheelKind::Color),
                memory_index: memory_index as usize,
                probe_index: probe,
            }))
        }
    }
}
