//! Search family: memory item, singleton search array, and probes
//!
//! A colored shape is held in memory across a visual search task. The
//! search array is eight circles on a ring; one carries the target's
//! tilted line, the rest carry X markers, and at most one is a color
//! singleton related (or unrelated) to the memory item. Probes test
//! the color and shape features in cue-determined order.
//!
//! The two "related" distractor codes render the same singleton; the
//! codes differ only in later analysis, and the source data
//! documentation treats the shared rendering as intended.

use crate::io::configuration::DISPLAY_PALETTE;
use crate::io::error::{Result, invariant_violation};
use crate::math::shapes::ShapeKind;
use crate::resolve::palette::{Palette, PaletteMask, PalettePicker};
use crate::resolve::sampler::TrialSampler;

/// Items in the circular search array
pub const ARRAY_SIZE: usize = 8;

/// Relationship of the search singleton to the memory item
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistractorCondition {
    /// Singleton matches the feature probed first
    RelatedFirst,
    /// Singleton matches the feature probed second
    RelatedSecond,
    /// Singleton takes a color unrelated to the memory item
    Unrelated,
    /// No singleton in the array
    NoSingleton,
}

impl DistractorCondition {
    /// Decode the 1-based distractor code used in trial data
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::RelatedFirst),
            2 => Some(Self::RelatedSecond),
            3 => Some(Self::Unrelated),
            4 => Some(Self::NoSingleton),
            _ => None,
        }
    }
}

/// Tilt direction of the target line marker
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetOrientation {
    /// Tilted counter-clockwise from vertical
    Left,
    /// Tilted clockwise from vertical
    Right,
}

impl TargetOrientation {
    /// Decode the 1-based orientation code used in trial data
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Left),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}

/// Which memory feature the cue names for the first probe
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueTarget {
    /// Color is probed first
    First,
    /// Shape is probed first
    Second,
}

impl CueTarget {
    /// Decode the 1-based cue code used in trial data
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            _ => None,
        }
    }
}

/// Probe agreement condition across the two probes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeCondition {
    /// Only the first probe matches memory
    OnlyFirstSame,
    /// Only the second probe matches memory
    OnlySecondSame,
    /// Neither probe matches
    BothDifferent,
    /// Both probes match
    BothSame,
}

impl ProbeCondition {
    /// Decode the 1-based probe code used in trial data
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::OnlyFirstSame),
            2 => Some(Self::OnlySecondSame),
            3 => Some(Self::BothDifferent),
            4 => Some(Self::BothSame),
            _ => None,
        }
    }
}

/// Validated trial record of the search family
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchTrial {
    /// Subject id
    pub subject: u32,
    /// 1-based palette index of the memory color
    pub memory_color: usize,
    /// 1-based shape code of the memory shape
    pub memory_shape: usize,
    /// Singleton relationship
    pub distractor: DistractorCondition,
    /// Target line tilt
    pub target_orientation: TargetOrientation,
    /// Feature probed first
    pub cue: CueTarget,
    /// Probe agreement condition
    pub probe_condition: ProbeCondition,
}

/// Resolved search assignment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchAssignment {
    /// 0-based palette index of the memory color
    pub memory_color: usize,
    /// 1-based shape code of the memory shape
    pub memory_shape: usize,
    /// Feature probed first
    pub cue: CueTarget,
    /// Probe agreement condition
    pub probe_condition: ProbeCondition,
    /// Target line tilt
    pub target_orientation: TargetOrientation,
    /// Array position of the search target
    pub target_index: usize,
    /// Array position of the singleton slot
    pub singleton_index: usize,
    /// Singleton color (0-based), `None` when the array has no
    /// singleton
    pub singleton_color: Option<usize>,
}

/// Resolve a search trial into its assignment
///
/// # Errors
///
/// Returns `InsufficientPool` if the display palette is empty and
/// `InvariantViolation` if the sampled array positions collide.
pub fn resolve(
    trial: &SearchTrial,
    sampler: &mut TrialSampler,
    picker: &mut PalettePicker,
) -> Result<SearchAssignment> {
    let palette = Palette::new(&DISPLAY_PALETTE);
    let memory_color = trial.memory_color.saturating_sub(1);

    let target_index = sampler.choice_index(ARRAY_SIZE)?;
    let other_slots: Vec<usize> = (0..ARRAY_SIZE).filter(|&i| i != target_index).collect();
    let singleton_index = sampler.choice_copied(&other_slots)?;
    if singleton_index == target_index {
        return Err(invariant_violation(
            "search_array",
            &format!("target and singleton both at slot {target_index}"),
        ));
    }

    let singleton_color = match trial.distractor {
        DistractorCondition::NoSingleton => None,
        // Both related codes render the memory color singleton
        DistractorCondition::RelatedFirst | DistractorCondition::RelatedSecond => {
            Some(memory_color)
        }
        DistractorCondition::Unrelated => {
            let avoid = PaletteMask::with(palette.len(), &[memory_color]);
            Some(picker.pick_one(&palette, sampler, &avoid)?)
        }
    };

    Ok(SearchAssignment {
        memory_color,
        memory_shape: trial.memory_shape,
        cue: trial.cue,
        probe_condition: trial.probe_condition,
        target_orientation: trial.target_orientation,
        target_index,
        singleton_index,
        singleton_color,
    })
}

impl SearchAssignment {
    /// Whether the given probe should match the memory item
    pub const fn probe_matches(&self, probe: CueTarget) -> bool {
        match probe {
            CueTarget::First => matches!(
                self.probe_condition,
                ProbeCondition::OnlyFirstSame | ProbeCondition::BothSame
            ),
            CueTarget::Second => matches!(
                self.probe_condition,
                ProbeCondition::OnlySecondSame | ProbeCondition::BothSame
            ),
        }
    }

    /// Whether the given probe tests the color feature
    ///
    /// The cue names the feature probed first, so probe order and cue
    /// value together decide which feature each probe shows.
    pub const fn probe_is_color(&self, probe: CueTarget) -> bool {
        matches!(
            (self.cue, probe),
            (CueTarget::First, CueTarget::First) | (CueTarget::Second, CueTarget::Second)
        )
    }

    /// Probed color for a color probe (0-based palette index)
    ///
    /// Mismatching probes use the deterministic next palette entry.
    pub fn probe_color(&self, probe: CueTarget, palette: &Palette) -> usize {
        if self.probe_matches(probe) {
            self.memory_color
        } else {
            palette.next_in_cycle(self.memory_color)
        }
    }

    /// Probed shape code for a shape probe (1-based)
    pub fn probe_shape(&self, probe: CueTarget) -> usize {
        if self.probe_matches(probe) {
            self.memory_shape
        } else {
            ShapeKind::next_in_cycle(self.memory_shape as i64) as usize
        }
    }
}
