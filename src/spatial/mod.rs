//! Spatial data structures: the position lattice and unit layouts

/// Toroidal position lattice and window sampling
pub mod grid;
/// Position layout helpers in display units
pub mod layout;

pub use grid::{Direction, PositionGrid};
