//! Input/output: trial files, rasterization, CLI, and progress

/// CLI definition and batch processing
pub mod cli;
/// Display constants and defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Scene rasterization and PNG export
pub mod image;
/// Batch progress display
pub mod progress;
/// Trial file loading and validation
pub mod trials;
