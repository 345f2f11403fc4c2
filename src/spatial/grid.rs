//! Toroidal position lattice with swap-move semantics
//!
//! Stimulus elements occupy cells of a fixed R×C lattice. Moving an
//! element past an edge re-enters from the opposite edge; moving into
//! an occupied cell swaps the two occupants, so no sequence of moves
//! can lose or duplicate an element. Occupancy is tracked the same way
//! twice (cell -> element and element -> cell) and the bijection
//! between the two views is checked defensively after mutation.

use crate::io::error::{Result, invariant_violation};
use crate::resolve::sampler::TrialSampler;
use ndarray::Array2;

/// One-step movement direction on the lattice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Toward smaller row indices
    Up,
    /// Toward larger row indices
    Down,
    /// Toward smaller column indices
    Left,
    /// Toward larger column indices
    Right,
}

impl Direction {
    /// All four directions, in cue-code order
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Decode the 1-based direction code used in trial data
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Up),
            2 => Some(Self::Down),
            3 => Some(Self::Left),
            4 => Some(Self::Right),
            _ => None,
        }
    }

    /// Row/column delta of a single step
    pub const fn delta(self) -> [i32; 2] {
        match self {
            Self::Up => [-1, 0],
            Self::Down => [1, 0],
            Self::Left => [0, -1],
            Self::Right => [0, 1],
        }
    }

    /// Uppercase label used for cue text
    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

/// Fixed-size lattice tracking which element occupies which cell
///
/// Cell values are 0 for empty, otherwise element id + 1, matching the
/// 1-based occupancy convention of the rest of the crate.
#[derive(Clone, Debug)]
pub struct PositionGrid {
    occupancy: Array2<u32>,
    positions: Vec<[usize; 2]>,
    rows: usize,
    cols: usize,
}

impl PositionGrid {
    /// Create a grid with elements placed at the given cells
    ///
    /// Element ids are the indices of `cells`.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if a cell is out of bounds or two
    /// elements share a cell.
    pub fn new(rows: usize, cols: usize, cells: &[[usize; 2]]) -> Result<Self> {
        let mut occupancy = Array2::zeros((rows, cols));
        for (element, &[row, col]) in cells.iter().enumerate() {
            let slot = occupancy.get_mut([row, col]).ok_or_else(|| {
                invariant_violation(
                    "grid_placement",
                    &format!("cell ({row}, {col}) outside {rows}x{cols} lattice"),
                )
            })?;
            if *slot != 0 {
                return Err(invariant_violation(
                    "grid_placement",
                    &format!("cell ({row}, {col}) already occupied"),
                ));
            }
            *slot = element as u32 + 1;
        }

        Ok(Self {
            occupancy,
            positions: cells.to_vec(),
            rows,
            cols,
        })
    }

    /// Lattice dimensions as (rows, cols)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Current cell of an element
    pub fn position(&self, element: usize) -> Option<[usize; 2]> {
        self.positions.get(element).copied()
    }

    /// Current cells of all elements, indexed by element id
    pub fn positions(&self) -> &[[usize; 2]] {
        &self.positions
    }

    /// Wrap a stepped coordinate back onto the lattice
    const fn wrap(value: usize, delta: i32, extent: usize) -> usize {
        let stepped = value as i32 + delta;
        if stepped < 0 {
            extent - 1
        } else if stepped >= extent as i32 {
            0
        } else {
            stepped as usize
        }
    }

    /// Move the given elements one step in a direction
    ///
    /// Elements are processed in ascending id order. A move onto an
    /// occupied cell swaps the occupants; a move past an edge wraps to
    /// the opposite edge.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if an element id is unknown or the
    /// post-move occupancy is no longer a bijection.
    pub fn shift(&mut self, elements: &[usize], direction: Direction) -> Result<()> {
        let [d_row, d_col] = direction.delta();
        let mut ordered: Vec<usize> = elements.to_vec();
        ordered.sort_unstable();
        ordered.dedup();

        for element in ordered {
            let [row, col] = self.positions.get(element).copied().ok_or_else(|| {
                invariant_violation("grid_shift", &format!("unknown element id {element}"))
            })?;
            let target = [
                Self::wrap(row, d_row, self.rows),
                Self::wrap(col, d_col, self.cols),
            ];

            let occupant = self.occupancy.get(target).copied().unwrap_or(0);
            if occupant != 0 && occupant != element as u32 + 1 {
                // Swap: the displaced element takes the vacated cell
                let displaced = (occupant - 1) as usize;
                if let Some(slot) = self.occupancy.get_mut([row, col]) {
                    *slot = occupant;
                }
                if let Some(pos) = self.positions.get_mut(displaced) {
                    *pos = [row, col];
                }
            } else if let Some(slot) = self.occupancy.get_mut([row, col]) {
                *slot = 0;
            }

            if let Some(slot) = self.occupancy.get_mut(target) {
                *slot = element as u32 + 1;
            }
            if let Some(pos) = self.positions.get_mut(element) {
                *pos = target;
            }
        }

        self.verify_bijection()
    }

    /// Check that cells and elements are still in one-to-one
    /// correspondence
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` when an element is missing from the
    /// occupancy map, duplicated, or disagrees with its recorded cell.
    pub fn verify_bijection(&self) -> Result<()> {
        let occupied = self.occupancy.iter().filter(|&&v| v != 0).count();
        if occupied != self.positions.len() {
            return Err(invariant_violation(
                "grid_bijection",
                &format!(
                    "{} occupied cells for {} elements",
                    occupied,
                    self.positions.len()
                ),
            ));
        }

        for (element, &cell) in self.positions.iter().enumerate() {
            let found = self.occupancy.get(cell).copied().unwrap_or(0);
            if found != element as u32 + 1 {
                return Err(invariant_violation(
                    "grid_bijection",
                    &format!(
                        "element {element} recorded at ({}, {}) but cell holds {found}",
                        cell[0], cell[1]
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Sample a rectangular window of lattice cells
///
/// Chooses a window origin from the allowed start rows/columns and
/// returns the covered cells in shuffled order. This is how the bar
/// families place their six items on the 4×4 lattice without ever
/// leaving its bounds.
///
/// # Errors
///
/// Returns `InvalidParameter` if the window cannot fit the lattice from
/// one of the allowed origins, or `InsufficientPool` if a start list is
/// empty.
pub fn sample_window_cells(
    rows: usize,
    cols: usize,
    window_rows: usize,
    window_cols: usize,
    row_starts: &[usize],
    col_starts: &[usize],
    sampler: &mut TrialSampler,
) -> Result<Vec<[usize; 2]>> {
    for &start in row_starts {
        if start + window_rows > rows {
            return Err(crate::io::error::invalid_parameter(
                "row_starts",
                &start,
                &format!("window of {window_rows} rows exceeds {rows}-row lattice"),
            ));
        }
    }
    for &start in col_starts {
        if start + window_cols > cols {
            return Err(crate::io::error::invalid_parameter(
                "col_starts",
                &start,
                &format!("window of {window_cols} columns exceeds {cols}-column lattice"),
            ));
        }
    }

    let row_start = sampler.choice_copied(row_starts)?;
    let col_start = sampler.choice_copied(col_starts)?;

    let mut cells = Vec::with_capacity(window_rows * window_cols);
    for row in row_start..row_start + window_rows {
        for col in col_start..col_start + window_cols {
            cells.push([row, col]);
        }
    }
    sampler.shuffle(&mut cells);
    Ok(cells)
}
