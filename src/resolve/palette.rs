//! Finite stimulus palettes and constraint-aware picking
//!
//! Trial data references palette entries with 1-based indices; the
//! crate uses 0-based indices internally. Avoid-sets over a palette are
//! tracked with a fixed-size bitmask so distinctness constraints stay
//! O(1) per membership test.

use crate::io::error::{Result, insufficient_pool};
use crate::resolve::sampler::TrialSampler;
use bitvec::prelude::{BitVec, bitvec};
use std::fmt;

/// One named palette color with its sRGB value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteColor {
    /// Human-readable color name
    pub name: &'static str,
    /// sRGB components
    pub rgb: [u8; 3],
}

/// Ordered, fixed-size set of stimulus colors
#[derive(Clone, Debug)]
pub struct Palette {
    entries: Vec<PaletteColor>,
}

impl Palette {
    /// Build a palette from a static color table
    pub fn new(entries: &[PaletteColor]) -> Self {
        Self {
            entries: entries.to_vec(),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by 0-based index
    pub fn get(&self, index: usize) -> Option<PaletteColor> {
        self.entries.get(index).copied()
    }

    /// sRGB value for a 0-based index, black when out of range
    pub fn rgb(&self, index: usize) -> [u8; 3] {
        self.entries.get(index).map_or([0, 0, 0], |c| c.rgb)
    }

    /// Restrict to the first `count` entries
    pub fn truncated(&self, count: usize) -> Self {
        Self {
            entries: self.entries.iter().copied().take(count).collect(),
        }
    }

    /// Deterministic "next in cycle" index, used for mismatching probes
    pub fn next_in_cycle(&self, index: usize) -> usize {
        if self.entries.is_empty() {
            return 0;
        }
        (index + 1) % self.entries.len()
    }

    /// First palette index differing from `index`, or `index` itself
    /// when the palette has no alternative
    ///
    /// Deterministic counterpart of [`pick_different`], used where the
    /// test display must not depend on additional sampler draws.
    pub fn first_different(&self, index: usize) -> usize {
        (0..self.entries.len()).find(|&i| i != index).unwrap_or(index)
    }
}

/// Sample a palette index different from `current`
///
/// Degrades to returning `current` when the palette holds no
/// alternative; a one-color palette cannot express a change.
///
/// # Errors
///
/// Returns `InsufficientPool` only if the palette itself is empty.
pub fn pick_different(
    palette: &Palette,
    sampler: &mut TrialSampler,
    current: usize,
) -> Result<usize> {
    if palette.is_empty() {
        return Err(insufficient_pool("pick_different", 1, 0));
    }
    let candidates: Vec<usize> = (0..palette.len()).filter(|&i| i != current).collect();
    if candidates.is_empty() {
        return Ok(current);
    }
    sampler.choice_copied(&candidates)
}

/// Fixed-size bitmask over palette indices
///
/// Indices are 0-based to match internal palette indexing. Used to
/// express "must differ from set X" constraints during picking.
#[derive(Clone, Debug, Default)]
pub struct PaletteMask {
    bits: BitVec,
}

impl PaletteMask {
    /// Create an empty mask sized for a palette
    pub fn new(len: usize) -> Self {
        Self {
            bits: bitvec![0; len],
        }
    }

    /// Create a mask with the given indices set
    pub fn with(len: usize, indices: &[usize]) -> Self {
        let mut mask = Self::new(len);
        for &index in indices {
            mask.insert(index);
        }
        mask
    }

    /// Mark an index as excluded
    pub fn insert(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Test whether an index is excluded
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Number of excluded indices
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Whether no index is excluded
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }
}

impl fmt::Display for PaletteMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indices: Vec<usize> = self.bits.iter_ones().collect();
        write!(f, "PaletteMask({} excluded: {indices:?})", self.count())
    }
}

/// Constraint-aware palette picker
///
/// Stateless apart from a relaxation tally: when an avoid-set covers
/// the entire palette the picker falls back to the unrestricted
/// palette instead of failing, and counts the event so the batch
/// runner can surface undersized palettes without aborting trials.
#[derive(Debug, Default)]
pub struct PalettePicker {
    relaxations: usize,
}

impl PalettePicker {
    /// Create a picker with a zeroed relaxation tally
    pub const fn new() -> Self {
        Self { relaxations: 0 }
    }

    /// Number of times a constraint had to be relaxed so far
    pub const fn relaxations(&self) -> usize {
        self.relaxations
    }

    /// Pick one palette index outside the avoid-set
    ///
    /// Falls back to the unrestricted palette when every entry is
    /// excluded.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientPool` only if the palette itself is empty.
    pub fn pick_one(
        &mut self,
        palette: &Palette,
        sampler: &mut TrialSampler,
        avoid: &PaletteMask,
    ) -> Result<usize> {
        if palette.is_empty() {
            return Err(insufficient_pool("pick_one", 1, 0));
        }

        let candidates: Vec<usize> = (0..palette.len()).filter(|&i| !avoid.contains(i)).collect();
        if candidates.is_empty() {
            self.relaxations += 1;
            return sampler.choice_index(palette.len());
        }
        sampler.choice_copied(&candidates)
    }

    /// Pick two distinct palette indices outside the avoid-set
    ///
    /// Degrades gracefully: one remaining candidate is returned twice;
    /// an exhausted candidate set drops the avoid constraint for the
    /// first pick and keeps only pairwise distinctness for the second.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientPool` only if the palette itself is empty.
    pub fn pick_distinct_pair(
        &mut self,
        palette: &Palette,
        sampler: &mut TrialSampler,
        avoid: &PaletteMask,
    ) -> Result<(usize, usize)> {
        if palette.is_empty() {
            return Err(insufficient_pool("pick_distinct_pair", 2, 0));
        }

        let candidates: Vec<usize> = (0..palette.len()).filter(|&i| !avoid.contains(i)).collect();
        if candidates.len() >= 2 {
            let pair = sampler.sample(&candidates, 2)?;
            let first = pair.first().copied().unwrap_or(0);
            let second = pair.get(1).copied().unwrap_or(first);
            return Ok((first, second));
        }

        if let Some(&only) = candidates.first() {
            self.relaxations += 1;
            return Ok((only, only));
        }

        // Nothing survives the constraint: drop it entirely
        self.relaxations += 1;
        let first = sampler.choice_index(palette.len())?;
        let others: Vec<usize> = (0..palette.len()).filter(|&i| i != first).collect();
        let second = if others.is_empty() {
            first
        } else {
            sampler.choice_copied(&others)?
        };
        Ok((first, second))
    }
}
