//! Sampler and palette picker contracts

use stimgen::io::error::StimulusError;
use stimgen::resolve::palette::{Palette, PaletteColor, PaletteMask, PalettePicker};
use stimgen::resolve::sampler::{TrialSampler, trial_seed};
use std::collections::HashSet;

const SMALL: [PaletteColor; 3] = [
    PaletteColor { name: "red", rgb: [255, 0, 0] },
    PaletteColor { name: "green", rgb: [0, 255, 0] },
    PaletteColor { name: "blue", rgb: [0, 0, 255] },
];

#[test]
fn equal_seeds_give_equal_draw_sequences() {
    let mut first = TrialSampler::new(99);
    let mut second = TrialSampler::new(99);
    let pool: Vec<usize> = (0..20).collect();

    for _ in 0..50 {
        assert_eq!(
            first.choice_copied(&pool).unwrap(),
            second.choice_copied(&pool).unwrap()
        );
    }
    assert_eq!(
        first.sample_indices(20, 7).unwrap(),
        second.sample_indices(20, 7).unwrap()
    );

    let mut left: Vec<usize> = (0..10).collect();
    let mut right: Vec<usize> = (0..10).collect();
    first.shuffle(&mut left);
    second.shuffle(&mut right);
    assert_eq!(left, right);
}

#[test]
fn shuffle_is_a_permutation() {
    let mut sampler = TrialSampler::new(5);
    let mut values: Vec<usize> = (0..16).collect();
    sampler.shuffle(&mut values);
    let unique: HashSet<usize> = values.iter().copied().collect();
    assert_eq!(unique.len(), 16);
}

#[test]
fn sampling_more_than_available_fails() {
    let mut sampler = TrialSampler::new(1);
    match sampler.sample_indices(3, 5) {
        Err(StimulusError::InsufficientPool {
            requested,
            available,
            ..
        }) => {
            assert_eq!(requested, 5);
            assert_eq!(available, 3);
        }
        other => unreachable!("expected InsufficientPool, got {other:?}"),
    }
    assert!(sampler.choice_index(0).is_err());
}

#[test]
fn sample_indices_are_distinct_and_in_range() {
    for seed in 0..40 {
        let mut sampler = TrialSampler::new(seed);
        let drawn = sampler.sample_indices(6, 4).unwrap();
        let unique: HashSet<usize> = drawn.iter().copied().collect();
        assert_eq!(unique.len(), 4);
        assert!(drawn.iter().all(|&i| i < 6));
    }
}

#[test]
fn trial_seeds_are_disjoint_across_trials() {
    let mut seen = HashSet::new();
    for experiment in 1..=6_u64 {
        for subject in 1..=20 {
            for trial in 1..=50 {
                assert!(seen.insert(trial_seed(42, experiment, subject, trial)));
            }
        }
    }
}

#[test]
fn picker_honors_avoid_sets() {
    let palette = Palette::new(&SMALL);
    for seed in 0..30 {
        let mut sampler = TrialSampler::new(seed);
        let mut picker = PalettePicker::new();
        let avoid = PaletteMask::with(palette.len(), &[0, 2]);
        let picked = picker.pick_one(&palette, &mut sampler, &avoid).unwrap();
        assert_eq!(picked, 1);
        assert_eq!(picker.relaxations(), 0);
    }
}

#[test]
fn exhausted_avoid_sets_relax_instead_of_failing() {
    let palette = Palette::new(&SMALL);
    let mut sampler = TrialSampler::new(3);
    let mut picker = PalettePicker::new();
    let avoid = PaletteMask::with(palette.len(), &[0, 1, 2]);
    let picked = picker.pick_one(&palette, &mut sampler, &avoid).unwrap();
    assert!(picked < 3);
    assert_eq!(picker.relaxations(), 1);
}

#[test]
fn distinct_pairs_degrade_gracefully() {
    let palette = Palette::new(&SMALL);

    // Two candidates left: the pair is distinct
    let mut sampler = TrialSampler::new(7);
    let mut picker = PalettePicker::new();
    let avoid = PaletteMask::with(palette.len(), &[0]);
    let (a, b) = picker
        .pick_distinct_pair(&palette, &mut sampler, &avoid)
        .unwrap();
    assert_ne!(a, b);
    assert!(a != 0 && b != 0);

    // One candidate left: it is returned twice
    let avoid = PaletteMask::with(palette.len(), &[0, 1]);
    let (a, b) = picker
        .pick_distinct_pair(&palette, &mut sampler, &avoid)
        .unwrap();
    assert_eq!((a, b), (2, 2));
    assert_eq!(picker.relaxations(), 1);

    // Nothing left: constraint dropped, pairwise distinctness kept
    let avoid = PaletteMask::with(palette.len(), &[0, 1, 2]);
    let (a, b) = picker
        .pick_distinct_pair(&palette, &mut sampler, &avoid)
        .unwrap();
    assert_ne!(a, b);
    assert_eq!(picker.relaxations(), 2);
}

#[test]
fn empty_palettes_are_fatal() {
    let palette = Palette::new(&[]);
    let mut sampler = TrialSampler::new(0);
    let mut picker = PalettePicker::new();
    let none = PaletteMask::new(0);
    assert!(picker.pick_one(&palette, &mut sampler, &none).is_err());
    assert!(
        picker
            .pick_distinct_pair(&palette, &mut sampler, &none)
            .is_err()
    );
}
