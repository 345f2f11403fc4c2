//! Consistency mutator contracts: identity under the consistent code,
//! targeted perturbation otherwise

use stimgen::io::configuration::{BAR_COLORS, DISPLAY_PALETTE};
use stimgen::resolve::assignment::Orientation;
use stimgen::resolve::dumbbell::{self, BindingCondition, DumbbellConsistency, DumbbellTrial};
use stimgen::resolve::field::{self, FieldCondition, FieldConsistency, FieldTrial};
use stimgen::resolve::palette::{Palette, PalettePicker};
use stimgen::resolve::quadrant::{self, QuadrantConsistency, QuadrantTrial};
use stimgen::resolve::sampler::TrialSampler;

#[test]
fn consistent_code_is_identity_for_dumbbell() {
    let palette = Palette::new(&DISPLAY_PALETTE);
    let dyed = [[0, 4], [2, 3]];
    let cued = vec![(0, 0), (1, 0)];
    let mut sampler = TrialSampler::new(9);
    let test = dumbbell::apply_consistency(
        &dyed,
        &cued,
        DumbbellConsistency::Consistent,
        &palette,
        &mut sampler,
    )
    .unwrap();
    assert_eq!(test, dyed);
}

#[test]
fn cued_changed_touches_only_cued_ends() {
    let palette = Palette::new(&DISPLAY_PALETTE);
    let dyed = [[0, 4], [2, 3]];
    let cued = vec![(0, 0), (1, 0)];
    for seed in 0..30 {
        let mut sampler = TrialSampler::new(seed);
        let test = dumbbell::apply_consistency(
            &dyed,
            &cued,
            DumbbellConsistency::CuedChanged,
            &palette,
            &mut sampler,
        )
        .unwrap();
        assert_ne!(test[0][0], dyed[0][0]);
        assert_ne!(test[1][0], dyed[1][0]);
        assert_eq!(test[0][1], dyed[0][1]);
        assert_eq!(test[1][1], dyed[1][1]);
    }
}

#[test]
fn uncued_changed_touches_only_uncued_ends() {
    let palette = Palette::new(&DISPLAY_PALETTE);
    let dyed = [[0, 4], [2, 3]];
    let cued = vec![(0, 0), (1, 0)];
    for seed in 0..30 {
        let mut sampler = TrialSampler::new(seed);
        let test = dumbbell::apply_consistency(
            &dyed,
            &cued,
            DumbbellConsistency::UncuedChanged,
            &palette,
            &mut sampler,
        )
        .unwrap();
        assert_eq!(test[0][0], dyed[0][0]);
        assert_eq!(test[1][0], dyed[1][0]);
        assert_ne!(test[0][1], dyed[0][1]);
        assert_ne!(test[1][1], dyed[1][1]);
    }
}

#[test]
fn quadrant_bicolor_cued_change_swaps_halves() {
    let palette = Palette::new(&DISPLAY_PALETTE);
    let memory = [[0, 0], [0, 1], [0, 1], [0, 0]];
    let test = quadrant::apply_color_consistency(
        &memory,
        &[1],
        QuadrantConsistency::CuedChanged,
        &palette,
    );
    assert_eq!(test[1], [1, 0]);
    assert_eq!(test[0], memory[0]);
    assert_eq!(test[2], memory[2]);
    assert_eq!(test[3], memory[3]);
}

#[test]
fn quadrant_uncued_change_touches_exactly_one_item() {
    let palette = Palette::new(&DISPLAY_PALETTE);
    let memory = [[0, 0], [0, 1], [0, 1], [0, 0]];
    let test = quadrant::apply_color_consistency(
        &memory,
        &[0, 1],
        QuadrantConsistency::UncuedChanged,
        &palette,
    );
    let changed: Vec<usize> = (0..4).filter(|&i| test[i] != memory[i]).collect();
    assert_eq!(changed, vec![2]);
}

#[test]
fn quadrant_position_changed_withholds_the_move() {
    let trial = QuadrantTrial {
        subject: 1,
        condition: BindingCondition::OneBindingTwoObjects,
        orientation: Orientation::Horizontal,
        consistency: QuadrantConsistency::PositionChanged,
    };
    let mut sampler = TrialSampler::new(3);
    let mut picker = PalettePicker::new();
    let withheld = quadrant::resolve(&trial, &mut sampler, &mut picker).unwrap();
    assert_eq!(withheld.test_cells, withheld.memory_cells);

    let moved_trial = QuadrantTrial {
        consistency: QuadrantConsistency::Consistent,
        ..trial
    };
    let mut sampler = TrialSampler::new(3);
    let mut picker = PalettePicker::new();
    let moved = quadrant::resolve(&moved_trial, &mut sampler, &mut picker).unwrap();
    assert_ne!(moved.test_cells, moved.memory_cells);
}

#[test]
fn field_consistent_code_is_identity() {
    let trial = FieldTrial {
        subject: 1,
        number: 2,
        condition: FieldCondition::MultiColorMultiOrientation,
        consistency: FieldConsistency::Consistent,
    };
    let mut sampler = TrialSampler::new(17);
    let mut picker = PalettePicker::new();
    let assignment = field::resolve(&trial, &mut sampler, &mut picker).unwrap();
    assert_eq!(assignment.test_colors, assignment.dyed_colors);
    assert_eq!(assignment.test_angles, assignment.angles);
}

#[test]
fn field_cued_orientation_change_flips_the_first_cued_bar() {
    let palette = Palette::new(&BAR_COLORS);
    let dyed = vec![None, Some(0), None, Some(1), None, None];
    let angles = vec![0, 1, 0, 0, 1, 1];
    let cued = vec![1, 3];
    let mut sampler = TrialSampler::new(2);
    let (colors, out_angles) = field::apply_consistency(
        &dyed,
        &angles,
        &cued,
        FieldConsistency::CuedOrientationsDiffer,
        &palette,
        &mut sampler,
    )
    .unwrap();
    assert_eq!(colors, dyed);
    assert_eq!(out_angles, vec![0, 0, 0, 0, 1, 1]);
}

#[test]
fn field_uncued_color_change_touches_the_first_uncued_bar() {
    let palette = Palette::new(&BAR_COLORS);
    let dyed = vec![Some(0), Some(1), None, None, None, None];
    let angles = vec![0, 0, 0, 0, 0, 0];
    let cued = vec![0, 1];
    let mut sampler = TrialSampler::new(4);
    let (colors, out_angles) = field::apply_consistency(
        &dyed,
        &angles,
        &cued,
        FieldConsistency::UncuedColorsDiffer,
        &palette,
        &mut sampler,
    )
    .unwrap();
    assert!(colors[2].is_some());
    assert_eq!(&colors[3..], &dyed[3..]);
    assert_eq!(colors[0], dyed[0]);
    assert_eq!(colors[1], dyed[1]);
    assert_eq!(out_angles, angles);
}

#[test]
fn dumbbell_resolver_consistent_test_equals_dyed() {
    let trial = DumbbellTrial {
        subject: 1,
        condition: BindingCondition::TwoBindingsOneObject,
        orientation: Orientation::Vertical,
        consistency: DumbbellConsistency::Consistent,
    };
    let mut sampler = TrialSampler::new(8);
    let mut picker = PalettePicker::new();
    let assignment = dumbbell::resolve(&trial, &mut sampler, &mut picker).unwrap();
    assert_eq!(assignment.test, assignment.dyed);
}
