//! Deterministic reconstruction of psychophysics experiment stimuli
//!
//! The engine expands categorical trial-condition codes into complete
//! stimulus geometry (colors, shapes, positions, orientations) across
//! experiment phases, using per-trial seeded sampling so any trial can
//! be reproduced bit-for-bit from its record and a base seed.

#![forbid(unsafe_code)]

/// Input/output operations, rasterization, and error handling
pub mod io;
/// Color space and shape outline utilities
pub mod math;
/// Condition resolution core: sampler, palettes, and per-family
/// resolvers
pub mod resolve;
/// Visible primitives, phases, and projection
pub mod scene;
/// Position lattice and unit layouts
pub mod spatial;

pub use io::error::{Result, StimulusError};
