//! Windowed placement stays inside the lattice for every sampled start

use stimgen::resolve::sampler::TrialSampler;
use stimgen::spatial::grid::sample_window_cells;
use std::collections::HashSet;

#[test]
fn sampled_windows_never_leave_the_lattice() {
    for seed in 0..200 {
        let mut sampler = TrialSampler::new(seed);
        let cells = sample_window_cells(4, 4, 3, 2, &[0, 1], &[1], &mut sampler).unwrap();

        assert_eq!(cells.len(), 6);
        let unique: HashSet<[usize; 2]> = cells.iter().copied().collect();
        assert_eq!(unique.len(), 6);
        for [row, col] in cells {
            assert!(row < 4, "row {row} escaped the lattice at seed {seed}");
            assert!((1..=2).contains(&col), "col {col} outside the window columns");
        }
    }
}

#[test]
fn oversized_windows_are_rejected() {
    let mut sampler = TrialSampler::new(0);
    assert!(sample_window_cells(4, 4, 3, 2, &[2], &[1], &mut sampler).is_err());
    assert!(sample_window_cells(4, 4, 3, 2, &[0], &[3], &mut sampler).is_err());
}

#[test]
fn empty_start_lists_are_rejected() {
    let mut sampler = TrialSampler::new(0);
    assert!(sample_window_cells(4, 4, 3, 2, &[], &[1], &mut sampler).is_err());
}
