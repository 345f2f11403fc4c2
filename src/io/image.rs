//! Scene rasterization and PNG export
//!
//! Converts abstract-unit scenes into pixel images. This module knows
//! nothing about experiments: it consumes primitives and a unit scale,
//! nothing else. Polygons are filled with an even-odd scanline pass;
//! text uses a built-in 5×7 uppercase/digit glyph set.

use crate::io::configuration::{DEFAULT_CANVAS_SIZE, PIXELS_PER_UNIT};
use crate::io::error::{Result, StimulusError};
use crate::scene::element::{Element, HalfSide, Scene};
use image::{ImageBuffer, Rgb, RgbImage};
use std::path::Path;

/// Pixel-space rendering parameters
#[derive(Clone, Copy, Debug)]
pub struct RasterConfig {
    /// Canvas edge length in pixels (canvases are square)
    pub size_px: u32,
    /// Pixels per display unit
    pub pixels_per_unit: f32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            size_px: DEFAULT_CANVAS_SIZE,
            pixels_per_unit: PIXELS_PER_UNIT,
        }
    }
}

impl RasterConfig {
    /// Derive a config for a custom canvas size, keeping the default
    /// proportions
    pub fn for_size(size_px: u32) -> Self {
        Self {
            size_px,
            pixels_per_unit: PIXELS_PER_UNIT * size_px as f32 / DEFAULT_CANVAS_SIZE as f32,
        }
    }

    /// Display-unit point to pixel coordinates (y flips)
    fn to_px(&self, point: [f32; 2]) -> [f32; 2] {
        let half = self.size_px as f32 / 2.0;
        [
            point[0].mul_add(self.pixels_per_unit, half),
            (-point[1]).mul_add(self.pixels_per_unit, half),
        ]
    }
}

/// Render a scene into an RGB image
pub fn render_scene(scene: &Scene, config: &RasterConfig) -> RgbImage {
    let mut img = ImageBuffer::from_pixel(config.size_px, config.size_px, Rgb(scene.background));

    for element in &scene.elements {
        match element {
            Element::Circle {
                center,
                radius,
                color,
                fill,
                stroke,
            } => {
                let center_px = config.to_px(*center);
                let radius_px = radius * config.pixels_per_unit;
                if *fill {
                    fill_disc(&mut img, center_px, radius_px, *color, None);
                } else {
                    let stroke_px = stroke * config.pixels_per_unit;
                    fill_ring(&mut img, center_px, radius_px, stroke_px, *color);
                }
            }
            Element::Semicircle {
                center,
                radius,
                color,
                side,
            } => {
                let center_px = config.to_px(*center);
                let radius_px = radius * config.pixels_per_unit;
                fill_disc(&mut img, center_px, radius_px, *color, Some(*side));
            }
            Element::Polygon { points, color } => {
                let points_px: Vec<[f32; 2]> = points.iter().map(|&p| config.to_px(p)).collect();
                fill_polygon(&mut img, &points_px, *color);
            }
            Element::Line {
                center,
                length,
                angle_deg,
                width,
                color,
            } => {
                let quad = line_quad(*center, *length, *angle_deg, *width);
                let points_px: Vec<[f32; 2]> = quad.iter().map(|&p| config.to_px(p)).collect();
                fill_polygon(&mut img, &points_px, *color);
            }
            Element::Text {
                anchor,
                text,
                height,
                color,
            } => {
                let anchor_px = config.to_px(*anchor);
                let height_px = height * config.pixels_per_unit;
                draw_text(&mut img, anchor_px, text, height_px, *color);
            }
        }
    }

    img
}

/// Render a scene and save it as a PNG
///
/// # Errors
///
/// Returns `FileSystem` if the parent directory cannot be created and
/// `ImageExport` if the save fails.
pub fn export_scene_png(scene: &Scene, config: &RasterConfig, output_path: &Path) -> Result<()> {
    let img = render_scene(scene, config);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StimulusError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| StimulusError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Write one pixel with bounds checking
fn put(img: &mut RgbImage, x: i64, y: i64, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
}

/// Whether a pixel center lies on the requested half-plane
fn on_half_side(dx: f32, dy: f32, side: HalfSide) -> bool {
    // Pixel y grows downward, display y upward
    match side {
        HalfSide::Left => dx <= 0.0,
        HalfSide::Right => dx >= 0.0,
        HalfSide::Top => dy <= 0.0,
        HalfSide::Bottom => dy >= 0.0,
    }
}

/// Fill a disc, optionally restricted to one half
fn fill_disc(
    img: &mut RgbImage,
    center: [f32; 2],
    radius: f32,
    color: [u8; 3],
    half: Option<HalfSide>,
) {
    let [cx, cy] = center;
    let r2 = radius * radius;
    let min_x = (cx - radius).floor() as i64;
    let max_x = (cx + radius).ceil() as i64;
    let min_y = (cy - radius).floor() as i64;
    let max_y = (cy + radius).ceil() as i64;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx.mul_add(dx, dy * dy) > r2 {
                continue;
            }
            if let Some(side) = half {
                if !on_half_side(dx, dy, side) {
                    continue;
                }
            }
            put(img, x, y, color);
        }
    }
}

/// Fill a ring outline centered on the given radius
fn fill_ring(img: &mut RgbImage, center: [f32; 2], radius: f32, stroke: f32, color: [u8; 3]) {
    let [cx, cy] = center;
    let outer = radius + stroke / 2.0;
    let inner = (radius - stroke / 2.0).max(0.0);
    let outer2 = outer * outer;
    let inner2 = inner * inner;
    let min_x = (cx - outer).floor() as i64;
    let max_x = (cx + outer).ceil() as i64;
    let min_y = (cy - outer).floor() as i64;
    let max_y = (cy + outer).ceil() as i64;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let d2 = dx.mul_add(dx, dy * dy);
            if d2 <= outer2 && d2 >= inner2 {
                put(img, x, y, color);
            }
        }
    }
}

/// Corner points of a centered thick line segment
fn line_quad(center: [f32; 2], length: f32, angle_deg: f32, width: f32) -> [[f32; 2]; 4] {
    let angle = angle_deg.to_radians();
    let (sin, cos) = angle.sin_cos();
    let hl = length / 2.0;
    let hw = width / 2.0;
    let [cx, cy] = center;
    // Direction along the segment and its normal
    let dir = [cos * hl, sin * hl];
    let norm = [-sin * hw, cos * hw];
    [
        [cx - dir[0] - norm[0], cy - dir[1] - norm[1]],
        [cx + dir[0] - norm[0], cy + dir[1] - norm[1]],
        [cx + dir[0] + norm[0], cy + dir[1] + norm[1]],
        [cx - dir[0] + norm[0], cy - dir[1] + norm[1]],
    ]
}

/// Even-odd scanline polygon fill over pixel-space points
fn fill_polygon(img: &mut RgbImage, points: &[[f32; 2]], color: [u8; 3]) {
    if points.len() < 3 {
        return;
    }
    let min_y = points
        .iter()
        .map(|p| p[1])
        .fold(f32::INFINITY, f32::min)
        .floor() as i64;
    let max_y = points
        .iter()
        .map(|p| p[1])
        .fold(f32::NEG_INFINITY, f32::max)
        .ceil() as i64;

    let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
    for y in min_y..=max_y {
        let scan_y = y as f32 + 0.5;
        crossings.clear();

        for (index, &[x0, y0]) in points.iter().enumerate() {
            let &[x1, y1] = points
                .get((index + 1) % points.len())
                .unwrap_or(&[x0, y0]);
            if (y0 <= scan_y && y1 > scan_y) || (y1 <= scan_y && y0 > scan_y) {
                let t = (scan_y - y0) / (y1 - y0);
                crossings.push(t.mul_add(x1 - x0, x0));
            }
        }

        crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        for pair in crossings.chunks_exact(2) {
            let start = pair.first().copied().unwrap_or(0.0).round() as i64;
            let end = pair.get(1).copied().unwrap_or(0.0).round() as i64;
            for x in start..end.max(start) {
                put(img, x, y, color);
            }
        }
    }
}

/// 5×7 glyph rows for the characters cue labels use
///
/// Bit 4 of each row byte is the leftmost column.
const GLYPHS: &[(char, [u8; 7])] = &[
    ('A', [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('C', [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E]),
    ('D', [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E]),
    ('E', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F]),
    ('F', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10]),
    ('G', [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0E]),
    ('H', [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('I', [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('L', [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F]),
    ('N', [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11]),
    ('O', [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('P', [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10]),
    ('R', [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11]),
    ('S', [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E]),
    ('T', [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    ('U', [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('W', [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A]),
    ('1', [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('2', [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F]),
];

/// Fallback glyph for characters outside the set
const UNKNOWN_GLYPH: [u8; 7] = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

fn glyph_for(ch: char) -> [u8; 7] {
    GLYPHS
        .iter()
        .find(|(candidate, _)| *candidate == ch)
        .map_or(UNKNOWN_GLYPH, |(_, rows)| *rows)
}

/// Draw a centered text label with the built-in glyph set
fn draw_text(img: &mut RgbImage, anchor: [f32; 2], text: &str, height: f32, color: [u8; 3]) {
    let cell = (height / 7.0).max(1.0);
    let glyph_width = cell * 6.0;
    let total_width = glyph_width * text.chars().count() as f32;
    let origin_x = anchor[0] - total_width / 2.0;
    let origin_y = anchor[1] - height / 2.0;

    for (char_index, ch) in text.chars().enumerate() {
        if ch == ' ' {
            continue;
        }
        let rows = glyph_for(ch);
        let glyph_x = (char_index as f32).mul_add(glyph_width, origin_x);
        for (row_index, &row) in rows.iter().enumerate() {
            for col in 0..5u32 {
                if row & (0x10 >> col) == 0 {
                    continue;
                }
                let x0 = (col as f32).mul_add(cell, glyph_x);
                let y0 = (row_index as f32).mul_add(cell, origin_y);
                for y in y0.floor() as i64..(y0 + cell).ceil() as i64 {
                    for x in x0.floor() as i64..(x0 + cell).ceil() as i64 {
                        put(img, x, y, color);
                    }
                }
            }
        }
    }
}
