//! Visible stimulus description: primitives, phases, and projection

/// Visible primitives and the scene container
pub mod element;
/// Trial phases and per-family phase sequences
pub mod phase;
/// Assignment × phase projection
pub mod project;

pub use element::{Element, Scene};
pub use phase::Phase;
pub use project::project;
