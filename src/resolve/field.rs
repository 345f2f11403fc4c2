//! Field family: black bar field with a dye-colored cued subset
//!
//! Six black bars occupy a shuffled 3×2 window of the 4×4 lattice. The
//! cue rings carry dye colors that mark the cued subset; the test
//! display starts from the dyed field and perturbs one bar per the
//! consistency code. Unlike the bars family nothing moves here.

use crate::io::configuration::{
    BAR_COLORS, BAR_ORIENTATIONS, GRID_COLS, GRID_ROWS, WINDOW_COL_STARTS, WINDOW_COLS,
    WINDOW_ROW_STARTS, WINDOW_ROWS,
};
use crate::io::error::{Result, invariant_violation};
use crate::resolve::palette::{Palette, PalettePicker};
use crate::resolve::sampler::TrialSampler;
use crate::spatial::grid::sample_window_cells;

/// Bars drawn in one display
pub const BAR_COUNT: usize = WINDOW_ROWS * WINDOW_COLS;

/// Color/orientation structure of the cued subset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldCondition {
    /// One dye color, one shared orientation
    SingleColorSingleOrientation,
    /// One dye color, orientations from the table
    SingleColorMultiOrientation,
    /// Distinct dye colors, one shared orientation
    MultiColorSingleOrientation,
    /// Distinct dye colors, orientations from the table
    MultiColorMultiOrientation,
}

impl FieldCondition {
    /// Decode the 1-based condition code used in trial data
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::SingleColorSingleOrientation),
            2 => Some(Self::SingleColorMultiOrientation),
            3 => Some(Self::MultiColorSingleOrientation),
            4 => Some(Self::MultiColorMultiOrientation),
            _ => None,
        }
    }

    /// Whether the cued bars share one sampled orientation
    pub const fn shared_orientation(self) -> bool {
        matches!(
            self,
            Self::SingleColorSingleOrientation | Self::MultiColorSingleOrientation
        )
    }

    /// Whether the cued bars share one sampled dye color
    pub const fn shared_dye(self) -> bool {
        matches!(
            self,
            Self::SingleColorSingleOrientation | Self::SingleColorMultiOrientation
        )
    }
}

/// Consistency codes of the field family
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldConsistency {
    /// Test display equals the dyed memory display
    Consistent,
    /// The first cued bar changes color
    CuedColorsDiffer,
    /// The first cued bar flips orientation
    CuedOrientationsDiffer,
    /// The first uncued bar flips orientation
    UncuedOrientationsDiffer,
    /// The first uncued bar takes a sampled bar color
    UncuedColorsDiffer,
}

impl FieldConsistency {
    /// Decode the 0-based consistency code used in trial data
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Consistent),
            1 => Some(Self::CuedColorsDiffer),
            2 => Some(Self::CuedOrientationsDiffer),
            3 => Some(Self::UncuedOrientationsDiffer),
            4 => Some(Self::UncuedColorsDiffer),
            _ => None,
        }
    }
}

/// Validated trial record of the field family
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldTrial {
    /// Subject id
    pub subject: u32,
    /// Number of cued bars (1..=5, strict subset of six)
    pub number: u8,
    /// Subset structure condition
    pub condition: FieldCondition,
    /// Consistency code
    pub consistency: FieldConsistency,
}

/// Resolved field assignment
///
/// Bar colors are `Option<usize>` into the bar palette; `None` renders
/// as the neutral ink color of the undyed field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldAssignment {
    /// Condition the assignment was resolved from
    pub condition: FieldCondition,
    /// Lattice cell per bar
    pub cells: Vec<[usize; 2]>,
    /// Cued bar indices, in draw order
    pub cued: Vec<usize>,
    /// Orientation index per bar
    pub angles: Vec<usize>,
    /// Dye color per cued bar, parallel to `cued`
    pub dyes: Vec<usize>,
    /// Dyed color per bar (`None` = ink)
    pub dyed_colors: Vec<Option<usize>>,
    /// Test-phase color per bar
    pub test_colors: Vec<Option<usize>>,
    /// Test-phase orientation index per bar
    pub test_angles: Vec<usize>,
}

/// Resolve a field trial into its assignment
///
/// # Errors
///
/// Returns `InsufficientPool` when sampling outruns the window or
/// palette, and `InvariantViolation` if the cued set is malformed.
pub fn resolve(
    trial: &FieldTrial,
    sampler: &mut TrialSampler,
    _picker: &mut PalettePicker,
) -> Result<FieldAssignment> {
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
    let cued = sampler.sample_indices(cells.len(), trial.number as usize)?;
    verify_cued(&cued, cells.len())?;

    let mut angles = Vec::with_capacity(cells.len());
    for _ in 0..cells.len() {
        angles.push(sampler.choice_index(BAR_ORIENTATIONS.len())?);
    }
    if trial.condition.shared_orientation() {
        let fixed = sampler.choice_index(BAR_ORIENTATIONS.len())?;
        for &index in &cued {
            if let Some(slot) = angles.get_mut(index) {
                *slot = fixed;
            }
        }
    } else {
        for (offset, &index) in cued.iter().enumerate() {
            if let Some(slot) = angles.get_mut(index) {
                *slot = offset % BAR_ORIENTATIONS.len();
            }
        }
    }

    let dyes: Vec<usize> = if trial.condition.shared_dye() {
        let dye = sampler.choice_index(palette.len())?;
        vec![dye; cued.len()]
    } else {
        (0..cued.len()).map(|i| i % palette.len()).collect()
    };

    let mut dyed_colors: Vec<Option<usize>> = vec![None; cells.len()];
    for (&index, &dye) in cued.iter().zip(dyes.iter()) {
        if let Some(slot) = dyed_colors.get_mut(index) {
            *slot = Some(dye);
        }
    }

    let (test_colors, test_angles) = apply_consistency(
        &dyed_colors,
        &angles,
        &cued,
        trial.consistency,
        &palette,
        sampler,
    )?;

    Ok(FieldAssignment {
        condition: trial.condition,
        cells,
        cued,
        angles,
        dyes,
        dyed_colors,
        test_colors,
        test_angles,
    })
}

/// Produce the test-phase colors and orientations from the dyed field
///
/// `Consistent` is the identity. Cued variants perturb the first cued
/// bar; uncued variants perturb the first uncued bar. The uncued color
/// redraw samples the bar palette without excluding ink, so it can
/// land on any bar color.
///
/// # Errors
///
/// Returns `InsufficientPool` only if the bar palette is empty.
pub fn apply_consistency(
    dyed_colors: &[Option<usize>],
    angles: &[usize],
    cued: &[usize],
    consistency: FieldConsistency,
    palette: &Palette,
    sampler: &mut TrialSampler,
) -> Result<(Vec<Option<usize>>, Vec<usize>)> {
    let mut colors_out = dyed_colors.to_vec();
    let mut angles_out = angles.to_vec();
    let first_uncued = (0..dyed_colors.len()).find(|index| !cued.contains(index));

    match consistency {
        FieldConsistency::Consistent => {}
        FieldConsistency::CuedColorsDiffer => {
            if let Some(slot) = cued.first().and_then(|&i| colors_out.get_mut(i)) {
                let current = slot.unwrap_or(0);
                *slot = Some(palette.first_different(current));
            }
        }
        FieldConsistency::CuedOrientationsDiffer => {
            if let Some(slot) = cued.first().and_then(|&i| angles_out.get_mut(i)) {
                *slot = 1 - *slot;
            }
        }
        FieldConsistency::UncuedOrientationsDiffer => {
            if let Some(slot) = first_uncued.and_then(|i| angles_out.get_mut(i)) {
                *slot = 1 - *slot;
            }
        }
        FieldConsistency::UncuedColorsDiffer => {
            let drawn = sampler.choice_index(palette.len())?;
            if let Some(slot) = first_uncued.and_then(|i| colors_out.get_mut(i)) {
                *slot = Some(drawn);
            }
        }
    }
    Ok((colors_out, angles_out))
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
