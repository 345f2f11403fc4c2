//! Trial phases and per-family phase sequences
//!
//! A phase never creates or destroys assignment data; it only selects
//! which elements are visible and in what role. Phase order within a
//! trial is a static per-family list, not a computed transition.

/// One named stage of stimulus presentation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Initial study display
    Memory,
    /// Cue markers or cue text
    Cue,
    /// Decorative pattern mask
    Mask,
    /// Post-manipulation test display
    Test,
    /// Visual search array
    Search,
    /// First probe item
    Probe1,
    /// Second probe item
    Probe2,
    /// Continuous-report response wheel
    Wheel,
}

impl Phase {
    /// Label used in output filenames
    pub const fn label(self) -> &'static str {
        match self {
            Self::Memory => "Memory",
            Self::Cue => "Cue",
            Self::Mask => "Mask",
            Self::Test => "Test",
            Self::Search => "Search",
            Self::Probe1 => "Probe1",
            Self::Probe2 => "Probe2",
            Self::Wheel => "Wheel",
        }
    }
}

/// Phase sequence of the binding families (dumbbell, quadrant, bars,
/// field)
pub const BINDING_PHASES: [Phase; 4] = [Phase::Memory, Phase::Cue, Phase::Mask, Phase::Test];

/// Phase sequence of the search family
pub const SEARCH_PHASES: [Phase; 5] = [
    Phase::Memory,
    Phase::Cue,
    Phase::Search,
    Phase::Probe1,
    Phase::Probe2,
];

/// Phase sequence of the wheel family
pub const WHEEL_PHASES: [Phase; 3] = [Phase::Memory, Phase::Probe1, Phase::Wheel];
