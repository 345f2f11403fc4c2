//! Bars family: oriented bars with windowed placement and movement
//!
//! Six bars occupy a shuffled 3×2 window of the 4×4 lattice. The cued
//! subset shares color and/or orientation structure per the subset
//! type; the cue names a movement direction, and the test display
//! executes the move. A probe change additionally perturbs the first
//! cued bar's color, orientation, or position.

use crate::io::configuration::{
    BAR_COLORS, BAR_ORIENTATIONS, GRID_COLS, GRID_ROWS, WINDOW_COL_STARTS, WINDOW_COLS,
    WINDOW_ROW_STARTS, WINDOW_ROWS,
};
use crate::io::error::{Result, invariant_violation};
use crate::resolve::palette::{Palette, PalettePicker};
use crate::resolve::sampler::TrialSampler;
use crate::spatial::grid::{Direction, PositionGrid, sample_window_cells};

/// Bars drawn in one display
pub const BAR_COUNT: usize = WINDOW_ROWS * WINDOW_COLS;

/// Structure of the cued subset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubsetKind {
    /// Cued bars share one color, orientations vary
    SingleColorMultiOrientation,
    /// Cued bars share one orientation, colors vary
    MultiColorSingleOrientation,
    /// Both color and orientation vary across cued bars
    MultiColorMultiOrientation,
}

impl SubsetKind {
    /// Decode the 1-based subset code used in trial data
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::SingleColorMultiOrientation),
            2 => Some(Self::MultiColorSingleOrientation),
            3 => Some(Self::MultiColorMultiOrientation),
            _ => None,
        }
    }
}

/// Attribute perturbed by a probe change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeAttribute {
    /// The first cued bar changes color
    Color,
    /// The first cued bar flips orientation
    Orientation,
    /// The first cued bar moves one extra step
    Position,
}

impl ChangeAttribute {
    /// Decode the 1-based attribute code used in trial data
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Color),
            2 => Some(Self::Orientation),
            3 => Some(Self::Position),
            _ => None,
        }
    }
}

/// Validated trial record of the bars family
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarsTrial {
    /// Subject id
    pub subject: u32,
    /// Structure of the cued subset
    pub subset: SubsetKind,
    /// Cue set-size code (1..=3, mapping to 2..=4 cued bars)
    pub cue_items: u8,
    /// Instructed movement direction
    pub direction: Direction,
    /// Whether the probe display differs from the moved display
    pub probe_change: bool,
    /// Attribute perturbed when `probe_change` holds
    pub change_attribute: ChangeAttribute,
}

impl BarsTrial {
    /// Number of cued bars implied by the set-size code
    pub const fn cued_count(&self) -> usize {
        self.cue_items as usize + 1
    }
}

/// Resolved bars assignment
///
/// Colors are indices into the bar palette, angles indices into the
/// two-entry orientation table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarsAssignment {
    /// Subset structure the assignment was resolved from
    pub subset: SubsetKind,
    /// Memory-phase lattice cell per bar
    pub cells: Vec<[usize; 2]>,
    /// Cued bar indices, in draw order
    pub cued: Vec<usize>,
    /// Instructed movement direction
    pub direction: Direction,
    /// Memory-phase color index per bar
    pub colors: Vec<usize>,
    /// Memory-phase orientation index per bar
    pub angles: Vec<usize>,
    /// Test-phase lattice cell per bar
    pub test_cells: Vec<[usize; 2]>,
    /// Test-phase color index per bar
    pub test_colors: Vec<usize>,
    /// Test-phase orientation index per bar
    pub test_angles: Vec<usize>,
}

/// Resolve a bars trial into its assignment
///
/// # Errors
///
/// Returns `InsufficientPool` when sampling outruns the window or
/// palette, and `InvariantViolation` if the cued set or a grid move is
/// malformed.
pub fn resolve(
    trial: &BarsTrial,
    sampler: &mut TrialSampler,
    _picker: &mut PalettePicker,
) -> Result<BarsAssignment> {
    let palette = Palette::new(&BAR_COLORS);

    let cells = sample_window_cells(
        GRID_ROWS,
        GRID_COLS,
        WINDOW_ROWS,
        WINDOW_COLS,
        &WINDOW_ROW_STARTS,
        &WINDOW_COL_STARTS,
        sampler,
    )?;
    let cued = sampler.sample_indices(cells.len(), trial.cued_count())?;
    verify_cued(&cued, cells.len())?;

    let mut colors = Vec::with_capacity(cells.len());
    let mut angles = Vec::with_capacity(cells.len());
    for index in 0..cells.len() {
        if cued.contains(&index) {
            let (color, angle) = match trial.subset {
                SubsetKind::SingleColorMultiOrientation => (0, index % BAR_ORIENTATIONS.len()),
                SubsetKind::MultiColorSingleOrientation => (index % palette.len(), 0),
                SubsetKind::MultiColorMultiOrientation => {
                    (index % palette.len(), index % BAR_ORIENTATIONS.len())
                }
            };
            colors.push(color);
            angles.push(angle);
        } else {
            colors.push(sampler.choice_index(palette.len())?);
            angles.push(sampler.choice_index(BAR_ORIENTATIONS.len())?);
        }
    }

    // Probe perturbation targets the first cued bar
    let mut test_colors = colors.clone();
    let mut test_angles = angles.clone();
    let probe_target = cued.first().copied();
    if trial.probe_change {
        match (trial.change_attribute, probe_target) {
            (ChangeAttribute::Color, Some(target)) => {
                if let Some(slot) = test_colors.get_mut(target) {
                    *slot = palette.first_different(*slot);
                }
            }
            (ChangeAttribute::Orientation, Some(target)) => {
                if let Some(slot) = test_angles.get_mut(target) {
                    *slot = 1 - *slot;
                }
            }
            (ChangeAttribute::Position, _) | (_, None) => {}
        }
    }

    let mut grid = PositionGrid::new(GRID_ROWS, GRID_COLS, &cells)?;
    grid.shift(&cued, trial.direction)?;
    if trial.probe_change && trial.change_attribute == ChangeAttribute::Position {
        if let Some(target) = probe_target {
            grid.shift(&[target], trial.direction)?;
        }
    }
    let test_cells = grid.positions().to_vec();

    Ok(BarsAssignment {
        subset: trial.subset,
        cells,
        cued,
        direction: trial.direction,
        colors,
        angles,
        test_cells,
        test_colors,
        test_angles,
    })
}

/// Defensive check on the resolved cued set
fn verify_cued(cued: &[usize], total: usize) -> Result<()> {
    if cued.len() >= total {
        return Err(invariant_violation(
            "cued_subset",
            &format!("{} cued bars of {total}", cued.len()),
        ));
    }
    for &index in cued {
        if index >= total {
            return Err(invariant_violation(
                "cued_subset",
                &format!("cued bar {index} does not exist"),
            ));
        }
    }
    Ok(())
}
