//! Toroidal grid properties: wrap-around, swap moves, and closure
//! under arbitrary move sequences

use stimgen::resolve::sampler::TrialSampler;
use stimgen::spatial::grid::{Direction, PositionGrid};
use std::collections::HashSet;

#[test]
fn single_element_wraps_past_every_edge() {
    let mut grid = PositionGrid::new(4, 4, &[[0, 1]]).unwrap();
    grid.shift(&[0], Direction::Up).unwrap();
    assert_eq!(grid.position(0), Some([3, 1]));

    grid.shift(&[0], Direction::Down).unwrap();
    assert_eq!(grid.position(0), Some([0, 1]));

    let mut grid = PositionGrid::new(4, 4, &[[2, 0]]).unwrap();
    grid.shift(&[0], Direction::Left).unwrap();
    assert_eq!(grid.position(0), Some([2, 3]));

    grid.shift(&[0], Direction::Right).unwrap();
    assert_eq!(grid.position(0), Some([2, 0]));
}

#[test]
fn move_into_occupied_cell_swaps_occupants() {
    let mut grid = PositionGrid::new(4, 4, &[[1, 1], [0, 1]]).unwrap();
    grid.shift(&[0], Direction::Up).unwrap();
    assert_eq!(grid.position(0), Some([0, 1]));
    assert_eq!(grid.position(1), Some([1, 1]));
}

#[test]
fn moving_a_group_preserves_every_element() {
    let cells = [[0, 1], [0, 2], [1, 1], [1, 2], [2, 1], [2, 2]];
    let mut grid = PositionGrid::new(4, 4, &cells).unwrap();
    grid.shift(&[0, 2, 4], Direction::Down).unwrap();

    let occupied: HashSet<[usize; 2]> = grid.positions().iter().copied().collect();
    assert_eq!(occupied.len(), 6);
}

#[test]
fn random_move_sequences_keep_the_bijection() {
    let cells = [[0, 1], [0, 2], [1, 1], [1, 2], [2, 1], [2, 2]];
    for seed in 0..25 {
        let mut sampler = TrialSampler::new(seed);
        let mut grid = PositionGrid::new(4, 4, &cells).unwrap();

        for _ in 0..100 {
            let direction = *sampler.choice(&Direction::ALL).unwrap();
            let count = sampler.choice_index(6).unwrap().max(1);
            let movers = sampler.sample_indices(6, count).unwrap();
            grid.shift(&movers, direction).unwrap();

            grid.verify_bijection().unwrap();
            let occupied: HashSet<[usize; 2]> = grid.positions().iter().copied().collect();
            assert_eq!(occupied.len(), 6, "duplicate cell after move");
            for &[row, col] in grid.positions() {
                assert!(row < 4 && col < 4);
            }
        }
    }
}

#[test]
fn placement_rejects_collisions_and_out_of_bounds() {
    assert!(PositionGrid::new(4, 4, &[[1, 1], [1, 1]]).is_err());
    assert!(PositionGrid::new(4, 4, &[[4, 0]]).is_err());
}
