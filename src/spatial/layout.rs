//! Position layout helpers in abstract display units
//!
//! The display coordinate system is centered on the screen with +x to
//! the right and +y upward; one unit equals one lattice spacing. The
//! rasterizer owns the unit-to-pixel conversion.

/// Center coordinates of a lattice cell
///
/// Row 0 is the top row, so increasing rows map to decreasing y.
pub fn cell_center(cell: [usize; 2], rows: usize, cols: usize, spacing: f32) -> [f32; 2] {
    let [row, col] = cell;
    let x = (col as f32 - (cols as f32 - 1.0) / 2.0) * spacing;
    let y = ((rows as f32 - 1.0) / 2.0 - row as f32) * spacing;
    [x, y]
}

/// Centers of every cell of an R×C lattice, row-major
pub fn grid_centers(rows: usize, cols: usize, spacing: f32) -> Vec<[f32; 2]> {
    let mut centers = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            centers.push(cell_center([row, col], rows, cols, spacing));
        }
    }
    centers
}

/// Evenly spaced positions on a circle, starting at the top and
/// proceeding clockwise
pub fn circular_positions(count: usize, radius: f32) -> Vec<[f32; 2]> {
    let mut positions = Vec::with_capacity(count);
    for index in 0..count {
        let angle = std::f32::consts::FRAC_PI_2 - index as f32 * std::f32::consts::TAU / count as f32;
        positions.push([radius * angle.cos(), radius * angle.sin()]);
    }
    positions
}

/// Endpoints of the lattice outline: one entry per grid line as
/// (center, length, angle in degrees)
///
/// An R×C lattice of cells has R+1 horizontal and C+1 vertical lines.
pub fn lattice_lines(rows: usize, cols: usize, spacing: f32) -> Vec<([f32; 2], f32, f32)> {
    let height = rows as f32 * spacing;
    let width = cols as f32 * spacing;
    let mut lines = Vec::with_capacity(rows + cols + 2);

    for row in 0..=rows {
        let y = height / 2.0 - row as f32 * spacing;
        lines.push(([0.0, y], width, 0.0));
    }
    for col in 0..=cols {
        let x = col as f32 * spacing - width / 2.0;
        lines.push(([x, 0.0], height, 90.0));
    }
    lines
}
