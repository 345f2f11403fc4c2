//! Mathematical utilities for color spaces and shape outlines

/// CIELAB conversion and color-wheel construction
pub mod color;
/// Polygon point generators
pub mod shapes;
