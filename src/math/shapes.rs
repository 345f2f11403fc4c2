//! Polygon point generators for stimulus primitives
//!
//! Everything that is not a circle, line, or text label is expressed as
//! a polygon by points: regular shapes, wedge fans for mask discs and
//! response wheels, arrows, and the radial-frequency blobs of the
//! continuous shape space.

/// Closed set of memory-item shapes referenced by 1-based index in
/// trial data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    /// Axis-aligned square
    Square,
    /// Upward-pointing triangle
    Triangle,
    /// Square rotated 45°
    Diamond,
    /// Regular hexagon
    Hexagon,
    /// Symmetric trapezoid, narrow side up
    Trapezoid,
    /// Filled disc (handled as a circle primitive, not a polygon)
    Circle,
}

impl ShapeKind {
    /// Decode the 1-based shape code used in trial data
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Square),
            2 => Some(Self::Triangle),
            3 => Some(Self::Diamond),
            4 => Some(Self::Hexagon),
            5 => Some(Self::Trapezoid),
            6 => Some(Self::Circle),
            _ => None,
        }
    }

    /// Number of shape codes in the palette
    pub const COUNT: usize = 6;

    /// Deterministic "next in cycle" code, used for mismatching probes
    pub const fn next_in_cycle(code: i64) -> i64 {
        (code % Self::COUNT as i64) + 1
    }

    /// Outline points for polygonal shapes; `None` for [`Self::Circle`]
    pub fn points(self, center: [f32; 2], size: f32) -> Option<Vec<[f32; 2]>> {
        let [cx, cy] = center;
        let r = size / 2.0;
        match self {
            Self::Square => Some(vec![
                [cx - r, cy - r],
                [cx + r, cy - r],
                [cx + r, cy + r],
                [cx - r, cy + r],
            ]),
            Self::Triangle => Some(regular_polygon(center, r, 3, 90.0)),
            Self::Diamond => Some(regular_polygon(center, r, 4, 90.0)),
            Self::Hexagon => Some(regular_polygon(center, r, 6, 0.0)),
            Self::Trapezoid => Some(vec![
                [cx - r * 0.5, cy + r],
                [cx + r * 0.5, cy + r],
                [cx + r, cy - r],
                [cx - r, cy - r],
            ]),
            Self::Circle => None,
        }
    }
}

/// Vertices of a regular polygon
///
/// `rotation_deg` = 0 places the first vertex on the +x axis.
pub fn regular_polygon(
    center: [f32; 2],
    radius: f32,
    sides: usize,
    rotation_deg: f32,
) -> Vec<[f32; 2]> {
    let [cx, cy] = center;
    let mut points = Vec::with_capacity(sides);
    for index in 0..sides {
        let angle =
            rotation_deg.to_radians() + index as f32 * std::f32::consts::TAU / sides as f32;
        points.push([
            radius.mul_add(angle.cos(), cx),
            radius.mul_add(angle.sin(), cy),
        ]);
    }
    points
}

/// Fan polygon approximating a circular wedge
///
/// Returns the center followed by arc points from `start_deg` to
/// `end_deg` counter-clockwise.
pub fn wedge(
    center: [f32; 2],
    radius: f32,
    start_deg: f32,
    end_deg: f32,
    arc_steps: usize,
) -> Vec<[f32; 2]> {
    let [cx, cy] = center;
    let steps = arc_steps.max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for index in 0..=steps {
        let t = index as f32 / steps as f32;
        let angle = (start_deg + t * (end_deg - start_deg)).to_radians();
        points.push([
            radius.mul_add(angle.cos(), cx),
            radius.mul_add(angle.sin(), cy),
        ]);
    }
    points
}

/// Arrow polygon from `start` to `end`
///
/// The shaft width and head size scale with `width`; the head occupies
/// the final third of the arrow length, clamped to a sensible minimum.
pub fn arrow(start: [f32; 2], end: [f32; 2], width: f32) -> Vec<[f32; 2]> {
    let dx = end[0] - start[0];
    let dy = end[1] - start[1];
    let length = dx.hypot(dy);
    if length <= f32::EPSILON {
        return vec![start, start, start];
    }

    let ux = dx / length;
    let uy = dy / length;
    // Unit normal
    let nx = -uy;
    let ny = ux;

    let head_len = (length / 3.0).max(width * 2.0).min(length);
    let head_width = width * 3.0;
    let half = width / 2.0;
    let neck = [
        end[0] - ux * head_len,
        end[1] - uy * head_len,
    ];

    vec![
        [start[0] + nx * half, start[1] + ny * half],
        [neck[0] + nx * half, neck[1] + ny * half],
        [neck[0] + nx * head_width / 2.0, neck[1] + ny * head_width / 2.0],
        end,
        [neck[0] - nx * head_width / 2.0, neck[1] - ny * head_width / 2.0],
        [neck[0] - nx * half, neck[1] - ny * half],
        [start[0] - nx * half, start[1] - ny * half],
    ]
}

/// Radial-frequency blob from the continuous shape space
///
/// Shapes are generated deterministically from a 1-based index into a
/// 360-step morph circle; neighboring indices yield similar outlines.
/// Radii are clamped away from zero so the outline never collapses.
pub fn blob(index: usize, point_count: usize) -> Vec<[f32; 2]> {
    let phi = std::f64::consts::TAU * ((index.wrapping_sub(1)) % 360) as f64 / 360.0;

    let freqs = [2.0_f64, 3.0, 5.0, 7.0];
    let base_cos = [0.18_f64, 0.12, 0.10, 0.08];
    let base_sin = [0.12_f64, -0.10, 0.09, -0.07];

    let mut points = Vec::with_capacity(point_count);
    for step in 0..point_count {
        let theta = std::f64::consts::TAU * step as f64 / point_count as f64;
        let mut r = 1.0_f64;
        for ((&freq, &c_base), &s_base) in freqs.iter().zip(&base_cos).zip(&base_sin) {
            let c_coef = c_base * phi.cos();
            let s_coef = s_base * phi.sin();
            r += c_coef.mul_add((freq * theta).cos(), s_coef * (freq * theta).sin());
        }
        let r = r.max(0.35);
        points.push([(r * theta.cos()) as f32, (r * theta.sin()) as f32]);
    }
    points
}

/// Scale and translate a polygon outline
pub fn place_polygon(points: &[[f32; 2]], center: [f32; 2], scale: f32) -> Vec<[f32; 2]> {
    points
        .iter()
        .map(|&[x, y]| [x.mul_add(scale, center[0]), y.mul_add(scale, center[1])])
        .collect()
}
