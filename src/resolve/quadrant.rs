//! Quadrant family: four discs on the inner lattice cells
//!
//! Two solid discs and two bicolor discs occupy the inner 2×2 cells of
//! the 4×4 lattice. The cue instructs a one-step move of the cued
//! discs; the test display executes that move for every consistency
//! code except `PositionChanged`, which withholds it. Color changes in
//! the test display use the deterministic first palette alternative
//! rather than a sampled one, so the mutation itself adds no draws.

use crate::io::configuration::{DISPLAY_PALETTE, GRID_COLS, GRID_ROWS};
use crate::io::error::{Result, invariant_violation};
use crate::resolve::assignment::Orientation;
use crate::resolve::dumbbell::BindingCondition;
use crate::resolve::palette::{Palette, PalettePicker};
use crate::resolve::sampler::TrialSampler;
use crate::spatial::grid::{Direction, PositionGrid};

/// Discs drawn in one quadrant display
pub const ITEM_COUNT: usize = 4;
/// Item indices of the solid (single-color) discs
pub const SOLID_ITEMS: [usize; 2] = [0, 3];
/// Palette entries eligible for the two disc colors
const COLOR_POOL: usize = 5;
/// Inner lattice cells the four discs start on, row-major
const HOME_CELLS: [[usize; 2]; ITEM_COUNT] = [[1, 1], [1, 2], [2, 1], [2, 2]];

/// Consistency codes of the quadrant family
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuadrantConsistency {
    /// Test display executes the instructed move, nothing else changes
    Consistent,
    /// Cued discs change color (solid) or swap halves (bicolor)
    CuedChanged,
    /// Exactly one uncued disc changes color
    UncuedChanged,
    /// Exactly one solid uncued disc changes color
    SolidUncuedChanged,
    /// The instructed move is withheld
    PositionChanged,
}

impl QuadrantConsistency {
    /// Decode the 0-based consistency code used in trial data
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Consistent),
            1 => Some(Self::CuedChanged),
            2 => Some(Self::UncuedChanged),
            3 => Some(Self::SolidUncuedChanged),
            4 => Some(Self::PositionChanged),
            _ => None,
        }
    }
}

/// Validated trial record of the quadrant family
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadrantTrial {
    /// Subject id
    pub subject: u32,
    /// Binding condition
    pub condition: BindingCondition,
    /// Split orientation of the bicolor discs
    pub orientation: Orientation,
    /// Consistency code
    pub consistency: QuadrantConsistency,
}

/// Resolved quadrant assignment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuadrantAssignment {
    /// Split orientation of the bicolor discs
    pub orientation: Orientation,
    /// Binding condition the assignment was resolved from
    pub condition: BindingCondition,
    /// Consistency code applied to the test display
    pub consistency: QuadrantConsistency,
    /// Cued item indices, in cue order
    pub cued: Vec<usize>,
    /// Instructed movement direction
    pub direction: Direction,
    /// Memory-phase half colors per item (palette indices)
    pub memory_colors: [[usize; 2]; ITEM_COUNT],
    /// Test-phase half colors per item
    pub test_colors: [[usize; 2]; ITEM_COUNT],
    /// Memory-phase lattice cells per item
    pub memory_cells: [[usize; 2]; ITEM_COUNT],
    /// Test-phase lattice cells per item
    pub test_cells: [[usize; 2]; ITEM_COUNT],
}

/// Resolve a quadrant trial into its assignment
///
/// # Errors
///
/// Returns `InsufficientPool` if the color pool cannot supply two
/// distinct colors and `InvariantViolation` if a grid move breaks the
/// occupancy bijection.
pub fn resolve(
    trial: &QuadrantTrial,
    sampler: &mut TrialSampler,
    _picker: &mut PalettePicker,
) -> Result<QuadrantAssignment> {
    let palette = Palette::new(&DISPLAY_PALETTE);
    let pool = palette.len().min(COLOR_POOL);
    let drawn = sampler.sample_indices(pool, 2)?;
    let color_a = drawn.first().copied().unwrap_or(0);
    let color_b = drawn.get(1).copied().unwrap_or(color_a);

    let cued: Vec<usize> = match trial.condition {
        BindingCondition::OneBindingOneObject => vec![0],
        BindingCondition::OneBindingTwoObjects => SOLID_ITEMS.to_vec(),
        BindingCondition::TwoBindingsOneObject => vec![1],
        BindingCondition::TwoBindingsTwoObjects => vec![0, 1],
    };
    verify_cued(&cued)?;

    let direction = sampler.choice_copied(&Direction::ALL)?;

    let mut memory_colors = [[0usize; 2]; ITEM_COUNT];
    for (item, colors) in memory_colors.iter_mut().enumerate() {
        *colors = if SOLID_ITEMS.contains(&item) {
            [color_a, color_a]
        } else {
            [color_a, color_b]
        };
    }

    let test_colors = apply_color_consistency(&memory_colors, &cued, trial.consistency, &palette);

    let mut grid = PositionGrid::new(GRID_ROWS, GRID_COLS, &HOME_CELLS)?;
    if trial.consistency != QuadrantConsistency::PositionChanged {
        grid.shift(&cued, direction)?;
    }
    let mut test_cells = HOME_CELLS;
    for (slot, cell) in test_cells.iter_mut().zip(grid.positions().iter()) {
        *slot = *cell;
    }

    Ok(QuadrantAssignment {
        orientation: trial.orientation,
        condition: trial.condition,
        consistency: trial.consistency,
        cued,
        direction,
        memory_colors,
        test_colors,
        memory_cells: HOME_CELLS,
        test_cells,
    })
}

/// Apply the color part of a consistency code
///
/// Solid discs change to the first palette alternative; bicolor discs
/// swap their halves. Uncued variants touch exactly one item, scanning
/// items in index order.
pub fn apply_color_consistency(
    memory: &[[usize; 2]; ITEM_COUNT],
    cued: &[usize],
    consistency: QuadrantConsistency,
    palette: &Palette,
) -> [[usize; 2]; ITEM_COUNT] {
    let mut test = *memory;
    match consistency {
        QuadrantConsistency::Consistent | QuadrantConsistency::PositionChanged => {}
        QuadrantConsistency::CuedChanged => {
            for &item in cued {
                if let Some(halves) = test.get_mut(item) {
                    if SOLID_ITEMS.contains(&item) {
                        let alternative = palette.first_different(halves[0]);
                        *halves = [alternative, alternative];
                    } else {
                        halves.swap(0, 1);
                    }
                }
            }
        }
        QuadrantConsistency::UncuedChanged => {
            for item in 0..ITEM_COUNT {
                if cued.contains(&item) {
                    continue;
                }
                if let Some(halves) = test.get_mut(item) {
                    let alternative = palette.first_different(halves[0]);
                    if SOLID_ITEMS.contains(&item) {
                        *halves = [alternative, alternative];
                    } else {
                        halves[0] = alternative;
                    }
                }
                break;
            }
        }
        QuadrantConsistency::SolidUncuedChanged => {
            for item in SOLID_ITEMS {
                if cued.contains(&item) {
                    continue;
                }
                if let Some(halves) = test.get_mut(item) {
                    let alternative = palette.first_different(halves[0]);
                    *halves = [alternative, alternative];
                }
                break;
            }
        }
    }
    test
}

/// Defensive check on the resolved cued set
fn verify_cued(cued: &[usize]) -> Result<()> {
    if cued.len() >= ITEM_COUNT {
        return Err(invariant_violation(
            "cued_subset",
            &format!("{} cued items of {ITEM_COUNT}", cued.len()),
        ));
    }
    for &item in cued {
        if item >= ITEM_COUNT {
            return Err(invariant_violation(
                "cued_subset",
                &format!("cued item {item} does not exist"),
            ));
        }
    }
    Ok(())
}
