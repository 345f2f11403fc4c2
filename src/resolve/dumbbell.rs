//! Dumbbell family: two two-ended objects, color-binding conditions
//!
//! Each trial shows two dumbbells whose end colors encode the binding
//! condition: a "one binding" condition reuses a single color across
//! the cued pair of ends, a "two bindings" condition draws mutually
//! distinct colors. Cue rings carry dye colors that simulate the
//! instructed manipulation; the test display starts from the dyed state
//! and perturbs cued or uncued ends per the consistency code.

use crate::io::configuration::DISPLAY_PALETTE;
use crate::io::error::{Result, invariant_violation};
use crate::resolve::assignment::Orientation;
use crate::resolve::palette::{Palette, PaletteMask, PalettePicker, pick_different};
use crate::resolve::sampler::TrialSampler;

/// Binding-condition taxonomy shared by the dumbbell and quadrant
/// families
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingCondition {
    /// One binding spread over one object
    OneBindingOneObject,
    /// One binding spread over two objects
    OneBindingTwoObjects,
    /// Two bindings within one object
    TwoBindingsOneObject,
    /// Two bindings across two objects
    TwoBindingsTwoObjects,
}

impl BindingCondition {
    /// Decode the 1-based condition code used in trial data
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::OneBindingOneObject),
            2 => Some(Self::OneBindingTwoObjects),
            3 => Some(Self::TwoBindingsOneObject),
            4 => Some(Self::TwoBindingsTwoObjects),
            _ => None,
        }
    }
}

/// Consistency codes of the dumbbell family
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DumbbellConsistency {
    /// Test display equals the manipulated memory display
    Consistent,
    /// Every cued end changes color
    CuedChanged,
    /// Every uncued end changes color
    UncuedChanged,
}

impl DumbbellConsistency {
    /// Decode the 0-based consistency code used in trial data
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Consistent),
            1 => Some(Self::CuedChanged),
            2 => Some(Self::UncuedChanged),
            _ => None,
        }
    }
}

/// Validated trial record of the dumbbell family
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DumbbellTrial {
    /// Subject id
    pub subject: u32,
    /// Binding condition
    pub condition: BindingCondition,
    /// Dumbbell orientation
    pub orientation: Orientation,
    /// Consistency code
    pub consistency: DumbbellConsistency,
}

/// Resolved dumbbell assignment
///
/// Colors are 0-based indices into the display palette, stored per
/// object per end. `base` is the memory display, `dyed` the display
/// after dye application, `test` the post-consistency test display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumbbellAssignment {
    /// Dumbbell orientation for both objects
    pub orientation: Orientation,
    /// Binding condition the assignment was resolved from
    pub condition: BindingCondition,
    /// Memory-phase end colors
    pub base: [[usize; 2]; 2],
    /// End colors after dye application to cued ends
    pub dyed: [[usize; 2]; 2],
    /// Test-phase end colors
    pub test: [[usize; 2]; 2],
    /// Cued (object, end) pairs, in cue order
    pub cued: Vec<(usize, usize)>,
    /// Dye color per cued slot
    pub dyes: [usize; 2],
}

/// Resolve a dumbbell trial into its assignment
///
/// # Errors
///
/// Returns `InsufficientPool` if the display palette is empty and
/// `InvariantViolation` if the resolved cued set is malformed.
pub fn resolve(
    trial: &DumbbellTrial,
    sampler: &mut TrialSampler,
    picker: &mut PalettePicker,
) -> Result<DumbbellAssignment> {
    let palette = Palette::new(&DISPLAY_PALETTE);
    let none = PaletteMask::new(palette.len());

    let mut base = [[0usize; 2]; 2];
    let cued: Vec<(usize, usize)>;
    let dyes: [usize; 2];

    match trial.condition {
        BindingCondition::OneBindingOneObject => {
            let cue_obj = sampler.choice_copied(&[0usize, 1])?;
            let shared = picker.pick_one(&palette, sampler, &none)?;
            let avoid = PaletteMask::with(palette.len(), &[shared]);
            let other = [
                picker.pick_one(&palette, sampler, &avoid)?,
                picker.pick_one(&palette, sampler, &avoid)?,
            ];
            set_object(&mut base, cue_obj, [shared, shared]);
            set_object(&mut base, 1 - cue_obj, other);
            cued = vec![(cue_obj, 0), (cue_obj, 1)];
            let dye = picker.pick_one(&palette, sampler, &avoid)?;
            dyes = [dye, dye];
        }
        BindingCondition::OneBindingTwoObjects => {
            let shared = picker.pick_one(&palette, sampler, &none)?;
            let avoid = PaletteMask::with(palette.len(), &[shared]);
            let first = [shared, picker.pick_one(&palette, sampler, &avoid)?];
            let second = [shared, picker.pick_one(&palette, sampler, &avoid)?];
            set_object(&mut base, 0, first);
            set_object(&mut base, 1, second);
            cued = vec![(0, 0), (1, 0)];
            let dye = picker.pick_one(&palette, sampler, &avoid)?;
            dyes = [dye, dye];
        }
        BindingCondition::TwoBindingsOneObject => {
            let cue_obj = sampler.choice_copied(&[0usize, 1])?;
            let color_a = picker.pick_one(&palette, sampler, &none)?;
            let avoid_a = PaletteMask::with(palette.len(), &[color_a]);
            let color_b = picker.pick_one(&palette, sampler, &avoid_a)?;
            let avoid_ab = PaletteMask::with(palette.len(), &[color_a, color_b]);
            let other = [
                picker.pick_one(&palette, sampler, &avoid_ab)?,
                picker.pick_one(&palette, sampler, &avoid_ab)?,
            ];
            set_object(&mut base, cue_obj, [color_a, color_b]);
            set_object(&mut base, 1 - cue_obj, other);
            cued = vec![(cue_obj, 0), (cue_obj, 1)];
            let (dye_a, dye_b) = picker.pick_distinct_pair(&palette, sampler, &avoid_ab)?;
            dyes = [dye_a, dye_b];
        }
        BindingCondition::TwoBindingsTwoObjects => {
            let color_a = picker.pick_one(&palette, sampler, &none)?;
            let avoid_a = PaletteMask::with(palette.len(), &[color_a]);
            let color_b = picker.pick_one(&palette, sampler, &avoid_a)?;
            let avoid_ab = PaletteMask::with(palette.len(), &[color_a, color_b]);
            let first = [color_a, picker.pick_one(&palette, sampler, &avoid_ab)?];
            let second = [color_b, picker.pick_one(&palette, sampler, &avoid_ab)?];
            set_object(&mut base, 0, first);
            set_object(&mut base, 1, second);
            cued = vec![(0, 0), (1, 0)];
            let (dye_a, dye_b) = picker.pick_distinct_pair(&palette, sampler, &avoid_ab)?;
            dyes = [dye_a, dye_b];
        }
    }

    verify_cued(&cued)?;

    let dyed = apply_dye(&base, &cued, &dyes);
    let test = apply_consistency(&dyed, &cued, trial.consistency, &palette, sampler)?;

    Ok(DumbbellAssignment {
        orientation: trial.orientation,
        condition: trial.condition,
        base,
        dyed,
        test,
        cued,
        dyes,
    })
}

/// Overwrite one object's end-color pair
fn set_object(colors: &mut [[usize; 2]; 2], object: usize, pair: [usize; 2]) {
    if let Some(slot) = colors.get_mut(object) {
        *slot = pair;
    }
}

/// Replace the cued end colors with their dye colors
fn apply_dye(
    base: &[[usize; 2]; 2],
    cued: &[(usize, usize)],
    dyes: &[usize; 2],
) -> [[usize; 2]; 2] {
    let mut dyed = *base;
    for (&(obj, end), &dye) in cued.iter().zip(dyes.iter()) {
        if let Some(slot) = dyed.get_mut(obj).and_then(|pair| pair.get_mut(end)) {
            *slot = dye;
        }
    }
    dyed
}

/// Produce the test-phase end colors from the dyed display
///
/// `Consistent` is the identity. Changed ends resample from the
/// palette excluding their current color; uncued ends are visited in
/// ascending (object, end) order so the draw sequence is deterministic.
///
/// # Errors
///
/// Returns `InsufficientPool` only if the palette is empty.
pub fn apply_consistency(
    dyed: &[[usize; 2]; 2],
    cued: &[(usize, usize)],
    consistency: DumbbellConsistency,
    palette: &Palette,
    sampler: &mut TrialSampler,
) -> Result<[[usize; 2]; 2]> {
    let mut test = *dyed;
    match consistency {
        DumbbellConsistency::Consistent => {}
        DumbbellConsistency::CuedChanged => {
            for &(obj, end) in cued {
                if let Some(slot) = test.get_mut(obj).and_then(|pair| pair.get_mut(end)) {
                    *slot = pick_different(palette, sampler, *slot)?;
                }
            }
        }
        DumbbellConsistency::UncuedChanged => {
            for obj in 0..2 {
                for end in 0..2 {
                    if cued.contains(&(obj, end)) {
                        continue;
                    }
                    if let Some(slot) = test.get_mut(obj).and_then(|pair| pair.get_mut(end)) {
                        *slot = pick_different(palette, sampler, *slot)?;
                    }
                }
            }
        }
    }
    Ok(test)
}

/// Defensive check on the resolved cued set
fn verify_cued(cued: &[(usize, usize)]) -> Result<()> {
    // Four slots total; the cued set must be a strict subset
    if cued.len() >= 4 {
        return Err(invariant_violation(
            "cued_subset",
            &format!("{} cued slots of 4", cued.len()),
        ));
    }
    for &(obj, end) in cued {
        if obj > 1 || end > 1 {
            return Err(invariant_violation(
                "cued_subset",
                &format!("cued slot ({obj}, {end}) does not exist"),
            ));
        }
    }
    Ok(())
}
