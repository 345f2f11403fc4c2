//! Display constants and runtime configuration defaults
//!
//! All geometry is expressed in abstract display units where 1.0 is one
//! lattice spacing; the rasterizer converts units to pixels.

use crate::resolve::palette::PaletteColor;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default canvas edge length in pixels
pub const DEFAULT_CANVAS_SIZE: u32 = 512;
/// Pixels per display unit at the default canvas size
pub const PIXELS_PER_UNIT: f32 = 56.0;

// Shared display palette (1-based when referenced from trial data)
/// Memory-display color palette
pub const DISPLAY_PALETTE: [PaletteColor; 6] = [
    PaletteColor { name: "red", rgb: [220, 44, 44] },
    PaletteColor { name: "green", rgb: [43, 166, 66] },
    PaletteColor { name: "blue", rgb: [46, 94, 222] },
    PaletteColor { name: "yellow", rgb: [235, 204, 28] },
    PaletteColor { name: "magenta", rgb: [196, 52, 184] },
    PaletteColor { name: "cyan", rgb: [45, 189, 194] },
];

/// Bar color palette for the bar families
pub const BAR_COLORS: [PaletteColor; 3] = [
    PaletteColor { name: "red", rgb: [220, 44, 44] },
    PaletteColor { name: "green", rgb: [43, 166, 66] },
    PaletteColor { name: "blue", rgb: [46, 94, 222] },
];

/// The two bar orientations in degrees
pub const BAR_ORIENTATIONS: [f32; 2] = [0.0, 90.0];

/// Neutral color for undyed field bars and markers
pub const INK: [u8; 3] = [20, 20, 20];
/// Gray used for connectors, grid lines and shape probes
pub const NEUTRAL_GRAY: [u8; 3] = [128, 128, 128];
/// Default scene background
pub const BACKGROUND: [u8; 3] = [255, 255, 255];
/// Background for the field family displays
pub const FIELD_BACKGROUND: [u8; 3] = [192, 192, 192];

// Lattice geometry
/// Rows of the position lattice
pub const GRID_ROWS: usize = 4;
/// Columns of the position lattice
pub const GRID_COLS: usize = 4;
/// Lattice spacing in display units
pub const GRID_SPACING: f32 = 1.0;
/// Grid line stroke width in display units
pub const GRID_LINE_WIDTH: f32 = 0.02;

// Windowed bar placement
/// Rows of the placement window
pub const WINDOW_ROWS: usize = 3;
/// Columns of the placement window
pub const WINDOW_COLS: usize = 2;
/// Allowed window start rows
pub const WINDOW_ROW_STARTS: [usize; 2] = [0, 1];
/// Allowed window start columns
pub const WINDOW_COL_STARTS: [usize; 1] = [1];

// Dumbbell family geometry
/// Horizontal offset of each dumbbell center from fixation
pub const DUMBBELL_OFFSET: f32 = 1.1;
/// Radius of a dumbbell end disc
pub const DUMBBELL_END_RADIUS: f32 = 0.32;
/// Length of the dumbbell connector
pub const CONNECTOR_LENGTH: f32 = 1.3;
/// Width of the dumbbell connector
pub const CONNECTOR_WIDTH: f32 = 0.16;

// Quadrant and bar family geometry
/// Radius of a quadrant disc
pub const DISC_RADIUS: f32 = 0.38;
/// Length of an oriented bar
pub const BAR_LENGTH: f32 = 0.66;
/// Stroke width of an oriented bar
pub const BAR_WIDTH: f32 = 0.1;
/// Cue ring radius
pub const CUE_RING_RADIUS: f32 = 0.46;
/// Cue ring stroke width
pub const CUE_RING_WIDTH: f32 = 0.06;
/// Cue arrow length as a fraction of lattice spacing
pub const CUE_ARROW_LENGTH: f32 = 0.8;
/// Cue arrow shaft width
pub const CUE_ARROW_WIDTH: f32 = 0.07;
/// Height of the direction cue text above the lattice
pub const CUE_TEXT_OFFSET: f32 = 2.4;
/// Glyph height of cue text
pub const CUE_TEXT_HEIGHT: f32 = 0.35;

// Mask geometry
/// Radius of one mask disc
pub const MASK_DISC_RADIUS: f32 = 0.38;
/// Arc steps per mask wedge
pub const MASK_WEDGE_STEPS: usize = 12;
/// Stroke width of mask cross lines
pub const MASK_CROSS_WIDTH: f32 = 0.04;

// Search family geometry
/// Radius of the circular search array
pub const SEARCH_RADIUS: f32 = 2.1;
/// Diameter of one search item
pub const SEARCH_ITEM_SIZE: f32 = 0.8;
/// Size of the memory/probe item
pub const MEMORY_ITEM_SIZE: f32 = 1.5;
/// Marker size relative to item size
pub const SEARCH_MARKER_RATIO: f32 = 0.55;
/// Marker stroke width
pub const SEARCH_MARKER_WIDTH: f32 = 0.05;
/// Tilt of the target line marker in degrees
pub const SEARCH_TARGET_TILT: f32 = 20.0;

// Continuous-report wheel
/// Entries on the color and shape wheels
pub const WHEEL_ENTRY_COUNT: usize = 360;
/// CIELAB lightness of the color wheel
pub const WHEEL_LAB_LIGHTNESS: f64 = 70.0;
/// CIELAB a* center of the color circle
pub const WHEEL_LAB_A_CENTER: f64 = 20.0;
/// CIELAB b* center of the color circle
pub const WHEEL_LAB_B_CENTER: f64 = 38.0;
/// CIELAB radius of the color circle
pub const WHEEL_LAB_RADIUS: f64 = 60.0;
/// Outer radius of the response wheel
pub const WHEEL_RADIUS: f32 = 2.3;
/// Ring width of the color response wheel
pub const WHEEL_RING_WIDTH: f32 = 0.5;
/// Shape exemplars shown on the shape response wheel
pub const WHEEL_SHAPE_EXEMPLARS: usize = 12;
/// Size of one shape exemplar on the wheel
pub const WHEEL_SHAPE_SIZE: f32 = 0.55;
/// Outline points per blob shape
pub const BLOB_POINT_COUNT: usize = 180;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to per-file output directories
pub const OUTPUT_SUFFIX: &str = "_stimuli";
