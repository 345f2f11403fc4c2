//! Experiment families, trial records, and resolved assignments
//!
//! This module ties the per-family resolvers together: a [`Trial`] is
//! the validated categorical record read from disk, an [`Assignment`]
//! is the fully resolved stimulus description, and [`reconstruct`] is
//! the single entry point mapping one to the other under a trial seed.

use crate::io::error::Result;
use crate::resolve::palette::PalettePicker;
use crate::resolve::sampler::TrialSampler;
use crate::resolve::{bars, dumbbell, field, quadrant, search, wheel};
use crate::scene::phase::{BINDING_PHASES, Phase, SEARCH_PHASES, WHEEL_PHASES};

/// Dumbbell / disc split orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Ends or halves arranged left/right
    Horizontal,
    /// Ends or halves arranged top/bottom
    Vertical,
}

impl Orientation {
    /// Decode the 0/1 orientation code used in trial data
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Horizontal),
            1 => Some(Self::Vertical),
            _ => None,
        }
    }
}

/// The six experiment families the engine can reconstruct
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Experiment {
    /// Two dumbbell objects with colored ends
    Dumbbell,
    /// Four discs on the inner lattice cells, movement cues
    Quadrant,
    /// Oriented bars with windowed placement and movement cues
    Bars,
    /// Bar field with dye-colored cued subset
    Field,
    /// Memory item, search array, and probes
    Search,
    /// Continuous-report color/shape wheel
    Wheel,
}

impl Experiment {
    /// Numeric id used in the trial seed derivation
    pub const fn id(self) -> u64 {
        match self {
            Self::Dumbbell => 1,
            Self::Quadrant => 2,
            Self::Bars => 3,
            Self::Field => 4,
            Self::Search => 5,
            Self::Wheel => 6,
        }
    }

    /// Lowercase family name, also the trial-file prefix
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dumbbell => "dumbbell",
            Self::Quadrant => "quadrant",
            Self::Bars => "bars",
            Self::Field => "field",
            Self::Search => "search",
            Self::Wheel => "wheel",
        }
    }

    /// Ordered phase sequence rendered for each trial of this family
    pub const fn phases(self) -> &'static [Phase] {
        match self {
            Self::Dumbbell | Self::Quadrant | Self::Bars | Self::Field => &BINDING_PHASES,
            Self::Search => &SEARCH_PHASES,
            Self::Wheel => &WHEEL_PHASES,
        }
    }
}

/// One validated trial record
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trial {
    /// Dumbbell family record
    Dumbbell(dumbbell::DumbbellTrial),
    /// Quadrant family record
    Quadrant(quadrant::QuadrantTrial),
    /// Bars family record
    Bars(bars::BarsTrial),
    /// Field family record
    Field(field::FieldTrial),
    /// Search family record
    Search(search::SearchTrial),
    /// Wheel family record
    Wheel(wheel::WheelTrial),
}

impl Trial {
    /// Subject the trial belongs to
    pub const fn subject(&self) -> u32 {
        match self {
            Self::Dumbbell(t) => t.subject,
            Self::Quadrant(t) => t.subject,
            Self::Bars(t) => t.subject,
            Self::Field(t) => t.subject,
            Self::Search(t) => t.subject,
            Self::Wheel(t) => t.subject,
        }
    }

    /// Family the trial belongs to
    pub const fn experiment(&self) -> Experiment {
        match self {
            Self::Dumbbell(_) => Experiment::Dumbbell,
            Self::Quadrant(_) => Experiment::Quadrant,
            Self::Bars(_) => Experiment::Bars,
            Self::Field(_) => Experiment::Field,
            Self::Search(_) => Experiment::Search,
            Self::Wheel(_) => Experiment::Wheel,
        }
    }
}

/// Fully resolved stimulus description for one trial
#[derive(Clone, Debug, PartialEq)]
pub enum Assignment {
    /// Dumbbell family assignment
    Dumbbell(dumbbell::DumbbellAssignment),
    /// Quadrant family assignment
    Quadrant(quadrant::QuadrantAssignment),
    /// Bars family assignment
    Bars(bars::BarsAssignment),
    /// Field family assignment
    Field(field::FieldAssignment),
    /// Search family assignment
    Search(search::SearchAssignment),
    /// Wheel family assignment
    Wheel(wheel::WheelAssignment),
}

/// Result of resolving one trial
#[derive(Debug)]
pub struct Reconstruction {
    /// The resolved assignment
    pub assignment: Assignment,
    /// Times a palette constraint had to be relaxed during resolution
    pub relaxations: usize,
}

/// Resolve one trial into its assignment under the given seed
///
/// Creates the trial-scoped sampler and picker, dispatches to the
/// family resolver, and reports the relaxation tally alongside the
/// assignment.
///
/// # Errors
///
/// Propagates resolver failures: empty palettes, impossible sampling
/// requests, or defensive invariant violations.
pub fn reconstruct(trial: &Trial, seed: u64) -> Result<Reconstruction> {
    let mut sampler = TrialSampler::new(seed);
    let mut picker = PalettePicker::new();

    let assignment = match trial {
        Trial::Dumbbell(t) => {
            Assignment::Dumbbell(dumbbell::resolve(t, &mut sampler, &mut picker)?)
        }
        Trial::Quadrant(t) => {
            Assignment::Quadrant(quadrant::resolve(t, &mut sampler, &mut picker)?)
        }
        Trial::Bars(t) => Assignment::Bars(bars::resolve(t, &mut sampler, &mut picker)?),
        Trial::Field(t) => Assignment::Field(field::resolve(t, &mut sampler, &mut picker)?),
        Trial::Search(t) => Assignment::Search(search::resolve(t, &mut sampler, &mut picker)?),
        Trial::Wheel(t) => Assignment::Wheel(wheel::resolve(t, &mut sampler, &mut picker)?),
    };

    Ok(Reconstruction {
        assignment,
        relaxations: picker.relaxations(),
    })
}
