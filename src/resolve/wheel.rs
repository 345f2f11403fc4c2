//! Wheel family: continuous-report color and shape stimuli
//!
//! Trials reference a 360-entry stimulus space by 1-based index: a
//! circle in CIELAB for color trials, a radial-frequency morph circle
//! for shape trials. The response wheel is drawn at a per-trial
//! sampled rotation so the report mapping cannot be memorized.

use crate::io::configuration::WHEEL_ENTRY_COUNT;
use crate::io::error::Result;
use crate::resolve::palette::PalettePicker;
use crate::resolve::sampler::TrialSampler;

/// Stimulus space a wheel trial draws from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelKind {
    /// CIELAB color circle
    Color,
    /// Radial-frequency shape circle
    Shape,
}

impl WheelKind {
    /// Lowercase label used in trial-file prefixes
    pub const fn label(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Shape => "shape",
        }
    }
}

/// Validated trial record of the wheel family
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WheelTrial {
    /// Subject id
    pub subject: u32,
    /// Stimulus space
    pub kind: WheelKind,
    /// 1-based index of the memory item
    pub memory_index: usize,
    /// 1-based index of the probe item, `None` on baseline trials
    pub probe_index: Option<usize>,
}

/// Resolved wheel assignment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WheelAssignment {
    /// Stimulus space
    pub kind: WheelKind,
    /// 1-based index of the memory item
    pub memory_index: usize,
    /// 1-based index of the probe item, if any
    pub probe_index: Option<usize>,
    /// Wheel rotation in whole degrees (0..360)
    pub rotation: u32,
}

/// Resolve a wheel trial into its assignment
///
/// # Errors
///
/// Propagates sampler failures; cannot otherwise fail.
pub fn resolve(
    trial: &WheelTrial,
    sampler: &mut TrialSampler,
    _picker: &mut PalettePicker,
) -> Result<WheelAssignment> {
    let rotation = sampler.range(WHEEL_ENTRY_COUNT as u32)?;
    Ok(WheelAssignment {
        kind: trial.kind,
        memory_index: trial.memory_index,
        probe_index: trial.probe_index,
        rotation,
    })
}
