//! Phase projection: assignment × phase -> visible elements
//!
//! A pure view over resolved assignments. Projection never mutates an
//! assignment; the test-phase variants were already computed by the
//! resolvers, so every lookup here is a straight read.

use crate::io::configuration as cfg;
use crate::io::error::{Result, invalid_parameter};
use crate::math::color::color_wheel;
use crate::math::shapes::{ShapeKind, arrow, blob, place_polygon, wedge};
use crate::resolve::assignment::{Assignment, Orientation};
use crate::resolve::bars::BarsAssignment;
use crate::resolve::dumbbell::DumbbellAssignment;
use crate::resolve::field::FieldAssignment;
use crate::resolve::palette::PaletteColor;
use crate::resolve::quadrant::QuadrantAssignment;
use crate::resolve::search::{ARRAY_SIZE, CueTarget, SearchAssignment, TargetOrientation};
use crate::resolve::wheel::{WheelAssignment, WheelKind};
use crate::scene::element::{Element, HalfSide, Scene};
use crate::scene::phase::Phase;
use crate::spatial::grid::Direction;
use crate::spatial::layout::{cell_center, circular_positions, grid_centers, lattice_lines};

/// Project one phase of a resolved assignment into a scene
///
/// # Errors
///
/// Returns `InvalidParameter` when the phase is not part of the
/// assignment's family sequence.
pub fn project(assignment: &Assignment, phase: Phase) -> Result<Scene> {
    match assignment {
        Assignment::Dumbbell(a) => project_dumbbell(a, phase),
        Assignment::Quadrant(a) => project_quadrant(a, phase),
        Assignment::Bars(a) => project_bars(a, phase),
        Assignment::Field(a) => project_field(a, phase),
        Assignment::Search(a) => project_search(a, phase),
        Assignment::Wheel(a) => project_wheel(a, phase),
    }
}

fn unsupported_phase(family: &'static str, phase: Phase) -> crate::io::error::StimulusError {
    invalid_parameter(
        "phase",
        &phase.label(),
        &format!("not part of the {family} phase sequence"),
    )
}

/// sRGB value of a display palette index
fn display_rgb(index: usize) -> [u8; 3] {
    cfg::DISPLAY_PALETTE.get(index).map_or([0, 0, 0], |c| c.rgb)
}

/// sRGB value of a bar palette index
fn bar_rgb(index: usize) -> [u8; 3] {
    cfg::BAR_COLORS.get(index).map_or([0, 0, 0], |c| c.rgb)
}

/// Orientation angle in degrees for a bar orientation index
fn bar_angle(index: usize) -> f32 {
    cfg::BAR_ORIENTATIONS.get(index).copied().unwrap_or(0.0)
}

/// Unit display-space vector of a movement direction (+y is up)
const fn direction_vector(direction: Direction) -> [f32; 2] {
    match direction {
        Direction::Up => [0.0, 1.0],
        Direction::Down => [0.0, -1.0],
        Direction::Left => [-1.0, 0.0],
        Direction::Right => [1.0, 0.0],
    }
}

/// Grid lines of the 4×4 lattice
fn lattice_elements() -> Vec<Element> {
    lattice_lines(cfg::GRID_ROWS, cfg::GRID_COLS, cfg::GRID_SPACING)
        .into_iter()
        .map(|(center, length, angle_deg)| Element::Line {
            center,
            length,
            angle_deg,
            width: cfg::GRID_LINE_WIDTH,
            color: cfg::NEUTRAL_GRAY,
        })
        .collect()
}

/// Cue ring outline
fn cue_ring(center: [f32; 2], color: [u8; 3]) -> Element {
    Element::Circle {
        center,
        radius: cfg::CUE_RING_RADIUS,
        color,
        fill: false,
        stroke: cfg::CUE_RING_WIDTH,
    }
}

/// Wedge-disc mask over the lattice, one disc per cell
fn mask_wedge_discs(palette: &[PaletteColor]) -> Vec<Element> {
    let mut elements = Vec::new();
    let angle_step = 360.0 / palette.len().max(1) as f32;
    for center in grid_centers(cfg::GRID_ROWS, cfg::GRID_COLS, cfg::GRID_SPACING) {
        for (index, color) in palette.iter().enumerate() {
            let start = index as f32 * angle_step;
            elements.push(Element::Polygon {
                points: wedge(
                    center,
                    cfg::MASK_DISC_RADIUS,
                    start,
                    start + angle_step,
                    cfg::MASK_WEDGE_STEPS,
                ),
                color: color.rgb,
            });
        }
    }
    elements
}

/// Cross-cluster mask over the lattice, one cluster per cell
fn mask_cross_clusters(palette: &[PaletteColor]) -> Vec<Element> {
    let mut elements = Vec::new();
    for center in grid_centers(cfg::GRID_ROWS, cfg::GRID_COLS, cfg::GRID_SPACING) {
        for angle_deg in [0.0, 45.0, 90.0, 135.0] {
            for color in palette {
                elements.push(Element::Line {
                    center,
                    length: cfg::BAR_LENGTH,
                    angle_deg,
                    width: cfg::MASK_CROSS_WIDTH,
                    color: color.rgb,
                });
            }
        }
    }
    elements
}

/// Dumbbell end positions for one object center
fn dumbbell_ends(center: [f32; 2], orientation: Orientation) -> [[f32; 2]; 2] {
    let [cx, cy] = center;
    let half = cfg::CONNECTOR_LENGTH / 2.0;
    match orientation {
        Orientation::Horizontal => [[cx - half, cy], [cx + half, cy]],
        Orientation::Vertical => [[cx, cy + half], [cx, cy - half]],
    }
}

/// Both dumbbell object centers
const DUMBBELL_CENTERS: [[f32; 2]; 2] = [[-cfg::DUMBBELL_OFFSET, 0.0], [cfg::DUMBBELL_OFFSET, 0.0]];

fn project_dumbbell(a: &DumbbellAssignment, phase: Phase) -> Result<Scene> {
    let mut scene = Scene::new(cfg::BACKGROUND);
    match phase {
        Phase::Memory | Phase::Test => {
            let colors = if phase == Phase::Test { &a.test } else { &a.base };
            for (object, &center) in DUMBBELL_CENTERS.iter().enumerate() {
                let connector_angle = match a.orientation {
                    Orientation::Horizontal => 0.0,
                    Orientation::Vertical => 90.0,
                };
                scene.push(Element::Line {
                    center,
                    length: cfg::CONNECTOR_LENGTH,
                    angle_deg: connector_angle,
                    width: cfg::CONNECTOR_WIDTH,
                    color: cfg::NEUTRAL_GRAY,
                });
                let ends = dumbbell_ends(center, a.orientation);
                for (end, &position) in ends.iter().enumerate() {
                    let index = colors.get(object).and_then(|pair| pair.get(end));
                    scene.push(Element::Circle {
                        center: position,
                        radius: cfg::DUMBBELL_END_RADIUS,
                        color: display_rgb(index.copied().unwrap_or(0)),
                        fill: true,
                        stroke: 0.0,
                    });
                }
            }
        }
        Phase::Cue => {
            for (&(object, end), &dye) in a.cued.iter().zip(a.dyes.iter()) {
                let center = DUMBBELL_CENTERS.get(object).copied().unwrap_or([0.0, 0.0]);
                let ends = dumbbell_ends(center, a.orientation);
                let position = ends.get(end).copied().unwrap_or(center);
                scene.push(cue_ring(position, display_rgb(dye)));
            }
        }
        Phase::Mask => scene.extend(mask_wedge_discs(&cfg::DISPLAY_PALETTE)),
        _ => return Err(unsupported_phase("dumbbell", phase)),
    }
    Ok(scene)
}

fn project_quadrant(a: &QuadrantAssignment, phase: Phase) -> Result<Scene> {
    let mut scene = Scene::new(cfg::BACKGROUND);
    match phase {
        Phase::Memory | Phase::Test => {
            scene.extend(lattice_elements());
            let (cells, colors) = if phase == Phase::Test {
                (&a.test_cells, &a.test_colors)
            } else {
                (&a.memory_cells, &a.memory_colors)
            };
            for (&cell, halves) in cells.iter().zip(colors.iter()) {
                let center =
                    cell_center(cell, cfg::GRID_ROWS, cfg::GRID_COLS, cfg::GRID_SPACING);
                if halves[0] == halves[1] {
                    scene.push(Element::Circle {
                        center,
                        radius: cfg::DISC_RADIUS,
                        color: display_rgb(halves[0]),
                        fill: true,
                        stroke: 0.0,
                    });
                } else {
                    let sides = match a.orientation {
                        Orientation::Horizontal => [HalfSide::Left, HalfSide::Right],
                        Orientation::Vertical => [HalfSide::Top, HalfSide::Bottom],
                    };
                    for (&half, &side) in halves.iter().zip(sides.iter()) {
                        scene.push(Element::Semicircle {
                            center,
                            radius: cfg::DISC_RADIUS,
                            color: display_rgb(half),
                            side,
                        });
                    }
                }
            }
        }
        Phase::Cue => {
            scene.extend(lattice_elements());
            let [dx, dy] = direction_vector(a.direction);
            let half = cfg::CUE_ARROW_LENGTH * cfg::GRID_SPACING / 2.0;
            for &item in &a.cued {
                let cell = a.memory_cells.get(item).copied().unwrap_or([0, 0]);
                let [cx, cy] =
                    cell_center(cell, cfg::GRID_ROWS, cfg::GRID_COLS, cfg::GRID_SPACING);
                let start = [cx - dx * half, cy - dy * half];
                let end = [cx + dx * half, cy + dy * half];
                scene.push(Element::Polygon {
                    points: arrow(start, end, cfg::CUE_ARROW_WIDTH),
                    color: cfg::INK,
                });
            }
        }
        Phase::Mask => scene.extend(mask_wedge_discs(&cfg::DISPLAY_PALETTE)),
        _ => return Err(unsupported_phase("quadrant", phase)),
    }
    Ok(scene)
}

fn bar_element(cell: [usize; 2], color: [u8; 3], angle_index: usize) -> Element {
    Element::Line {
        center: cell_center(cell, cfg::GRID_ROWS, cfg::GRID_COLS, cfg::GRID_SPACING),
        length: cfg::BAR_LENGTH,
        angle_deg: bar_angle(angle_index),
        width: cfg::BAR_WIDTH,
        color,
    }
}

fn project_bars(a: &BarsAssignment, phase: Phase) -> Result<Scene> {
    let mut scene = Scene::new(cfg::BACKGROUND);
    match phase {
        Phase::Memory => {
            scene.extend(lattice_elements());
            for ((&cell, &color), &angle) in
                a.cells.iter().zip(a.colors.iter()).zip(a.angles.iter())
            {
                scene.push(bar_element(cell, bar_rgb(color), angle));
            }
        }
        Phase::Test => {
            scene.extend(lattice_elements());
            for ((&cell, &color), &angle) in a
                .test_cells
                .iter()
                .zip(a.test_colors.iter())
                .zip(a.test_angles.iter())
            {
                scene.push(bar_element(cell, bar_rgb(color), angle));
            }
        }
        Phase::Cue => {
            scene.extend(lattice_elements());
            for &index in &a.cued {
                let cell = a.cells.get(index).copied().unwrap_or([0, 0]);
                let center =
                    cell_center(cell, cfg::GRID_ROWS, cfg::GRID_COLS, cfg::GRID_SPACING);
                scene.push(cue_ring(center, cfg::INK));
            }
            scene.push(Element::Text {
                anchor: [0.0, cfg::CUE_TEXT_OFFSET],
                text: a.direction.label().to_string(),
                height: cfg::CUE_TEXT_HEIGHT,
                color: cfg::INK,
            });
        }
        Phase::Mask => scene.extend(mask_cross_clusters(&cfg::BAR_COLORS)),
        _ => return Err(unsupported_phase("bars", phase)),
    }
    Ok(scene)
}

fn project_field(a: &FieldAssignment, phase: Phase) -> Result<Scene> {
    let mut scene = Scene::new(cfg::FIELD_BACKGROUND);
    match phase {
        Phase::Memory => {
            scene.extend(lattice_elements());
            for (&cell, &angle) in a.cells.iter().zip(a.angles.iter()) {
                scene.push(bar_element(cell, cfg::INK, angle));
            }
        }
        Phase::Test => {
            scene.extend(lattice_elements());
            for ((&cell, &color), &angle) in a
                .cells
                .iter()
                .zip(a.test_colors.iter())
                .zip(a.test_angles.iter())
            {
                let rgb = color.map_or(cfg::INK, bar_rgb);
                scene.push(bar_element(cell, rgb, angle));
            }
        }
        Phase::Cue => {
            scene.extend(lattice_elements());
            for (&index, &dye) in a.cued.iter().zip(a.dyes.iter()) {
                let cell = a.cells.get(index).copied().unwrap_or([0, 0]);
                let center =
                    cell_center(cell, cfg::GRID_ROWS, cfg::GRID_COLS, cfg::GRID_SPACING);
                scene.push(cue_ring(center, bar_rgb(dye)));
            }
        }
        Phase::Mask => scene.extend(mask_cross_clusters(&cfg::BAR_COLORS)),
        _ => return Err(unsupported_phase("field", phase)),
    }
    Ok(scene)
}

/// Shape element at the given center, polygon or circle depending on
/// the shape kind
fn shape_element(code: usize, center: [f32; 2], size: f32, color: [u8; 3]) -> Element {
    let kind = ShapeKind::from_code(code as i64).unwrap_or(ShapeKind::Circle);
    match kind.points(center, size) {
        Some(points) => Element::Polygon { points, color },
        None => Element::Circle {
            center,
            radius: size / 2.0,
            color,
            fill: true,
            stroke: 0.0,
        },
    }
}

fn project_search(a: &SearchAssignment, phase: Phase) -> Result<Scene> {
    let mut scene = Scene::new(cfg::BACKGROUND);
    match phase {
        Phase::Memory => {
            scene.push(shape_element(
                a.memory_shape,
                [0.0, 0.0],
                cfg::MEMORY_ITEM_SIZE,
                display_rgb(a.memory_color),
            ));
        }
        Phase::Cue => {
            let label = match a.cue {
                CueTarget::First => "COLOR",
                CueTarget::Second => "SHAPE",
            };
            scene.push(Element::Text {
                anchor: [0.0, 0.0],
                text: label.to_string(),
                height: cfg::CUE_TEXT_HEIGHT,
                color: cfg::INK,
            });
        }
        Phase::Search => {
            let positions = circular_positions(ARRAY_SIZE, cfg::SEARCH_RADIUS);
            let marker_size = cfg::SEARCH_ITEM_SIZE * cfg::SEARCH_MARKER_RATIO;
            let tilt = match a.target_orientation {
                TargetOrientation::Left => 90.0 + cfg::SEARCH_TARGET_TILT,
                TargetOrientation::Right => 90.0 - cfg::SEARCH_TARGET_TILT,
            };
            for (index, &center) in positions.iter().enumerate() {
                let color = if index == a.singleton_index {
                    a.singleton_color.map_or(cfg::NEUTRAL_GRAY, display_rgb)
                } else {
                    cfg::NEUTRAL_GRAY
                };
                scene.push(Element::Circle {
                    center,
                    radius: cfg::SEARCH_ITEM_SIZE / 2.0,
                    color,
                    fill: true,
                    stroke: 0.0,
                });
                if index == a.target_index {
                    scene.push(Element::Line {
                        center,
                        length: marker_size,
                        angle_deg: tilt,
                        width: cfg::SEARCH_MARKER_WIDTH,
                        color: cfg::INK,
                    });
                } else {
                    for angle_deg in [45.0, 135.0] {
                        scene.push(Element::Line {
                            center,
                            length: marker_size,
                            angle_deg,
                            width: cfg::SEARCH_MARKER_WIDTH,
                            color: cfg::INK,
                        });
                    }
                }
            }
        }
        Phase::Probe1 | Phase::Probe2 => {
            let probe = if phase == Phase::Probe1 {
                CueTarget::First
            } else {
                CueTarget::Second
            };
            let palette = crate::resolve::palette::Palette::new(&cfg::DISPLAY_PALETTE);
            if a.probe_is_color(probe) {
                scene.push(Element::Circle {
                    center: [0.0, 0.0],
                    radius: cfg::MEMORY_ITEM_SIZE / 2.0,
                    color: display_rgb(a.probe_color(probe, &palette)),
                    fill: true,
                    stroke: 0.0,
                });
            } else {
                scene.push(shape_element(
                    a.probe_shape(probe),
                    [0.0, 0.0],
                    cfg::MEMORY_ITEM_SIZE,
                    cfg::NEUTRAL_GRAY,
                ));
            }
        }
        _ => return Err(unsupported_phase("search", phase)),
    }
    Ok(scene)
}

fn project_wheel(a: &WheelAssignment, phase: Phase) -> Result<Scene> {
    let mut scene = Scene::new(cfg::BACKGROUND);
    match phase {
        Phase::Memory => {
            scene.push(wheel_item(a.kind, a.memory_index));
        }
        Phase::Probe1 => {
            // Baseline trials have no probe; the scene stays empty and
            // the batch runner skips the file
            if let Some(index) = a.probe_index {
                scene.push(wheel_item(a.kind, index));
            }
        }
        Phase::Wheel => match a.kind {
            WheelKind::Color => {
                let colors = color_wheel(
                    cfg::WHEEL_ENTRY_COUNT,
                    cfg::WHEEL_LAB_LIGHTNESS,
                    cfg::WHEEL_LAB_A_CENTER,
                    cfg::WHEEL_LAB_B_CENTER,
                    cfg::WHEEL_LAB_RADIUS,
                );
                for (index, &color) in colors.iter().enumerate() {
                    let start = (index as u32 + a.rotation) as f32;
                    scene.push(Element::Polygon {
                        points: wedge([0.0, 0.0], cfg::WHEEL_RADIUS, start, start + 1.0, 2),
                        color,
                    });
                }
                // Cut the wedge fan into a ring
                scene.push(Element::Circle {
                    center: [0.0, 0.0],
                    radius: cfg::WHEEL_RADIUS - cfg::WHEEL_RING_WIDTH,
                    color: cfg::BACKGROUND,
                    fill: true,
                    stroke: 0.0,
                });
            }
            WheelKind::Shape => {
                let step = 360 / cfg::WHEEL_SHAPE_EXEMPLARS;
                let ring_radius = cfg::WHEEL_RADIUS - cfg::WHEEL_SHAPE_SIZE / 2.0;
                for exemplar in 0..cfg::WHEEL_SHAPE_EXEMPLARS {
                    let angle_deg = (a.rotation as usize + exemplar * step) % 360;
                    let angle = (angle_deg as f32).to_radians();
                    let center = [ring_radius * angle.cos(), ring_radius * angle.sin()];
                    let outline = blob(angle_deg + 1, cfg::BLOB_POINT_COUNT);
                    scene.push(Element::Polygon {
                        points: place_polygon(&outline, center, cfg::WHEEL_SHAPE_SIZE / 2.0),
                        color: cfg::INK,
                    });
                }
            }
        },
        _ => return Err(unsupported_phase("wheel", phase)),
    }
    Ok(scene)
}

/// Memory or probe item of the wheel family
fn wheel_item(kind: WheelKind, index: usize) -> Element {
    match kind {
        WheelKind::Color => {
            let colors = color_wheel(
                cfg::WHEEL_ENTRY_COUNT,
                cfg::WHEEL_LAB_LIGHTNESS,
                cfg::WHEEL_LAB_A_CENTER,
                cfg::WHEEL_LAB_B_CENTER,
                cfg::WHEEL_LAB_RADIUS,
            );
            let color = colors
                .get((index.saturating_sub(1)) % cfg::WHEEL_ENTRY_COUNT)
                .copied()
                .unwrap_or([0, 0, 0]);
            Element::Circle {
                center: [0.0, 0.0],
                radius: cfg::MEMORY_ITEM_SIZE / 2.0,
                color,
                fill: true,
                stroke: 0.0,
            }
        }
        WheelKind::Shape => {
            let outline = blob(index, cfg::BLOB_POINT_COUNT);
            Element::Polygon {
                points: place_polygon(&outline, [0.0, 0.0], cfg::MEMORY_ITEM_SIZE / 2.0),
                color: cfg::INK,
            }
        }
    }
}
