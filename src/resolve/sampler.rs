//! Deterministic per-trial random sampling
//!
//! Every trial owns exactly one sampler, seeded from the trial identity.
//! Two samplers built from the same seed produce identical result
//! sequences for identical call sequences, which is what makes a
//! reconstruction run reproducible and parallelizable without shared
//! RNG state.

use crate::io::error::{Result, insufficient_pool};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Multiplier applied to the experiment id when deriving a trial seed
const EXPERIMENT_SEED_STRIDE: u64 = 1_000_000;
/// Multiplier applied to the subject id when deriving a trial seed
const SUBJECT_SEED_STRIDE: u64 = 10_000;

/// Derive the seed for one trial from the run's base seed
///
/// The strides keep seeds of distinct (experiment, subject, trial)
/// triples disjoint within a run, so no two trials ever share a
/// sampler stream.
pub const fn trial_seed(base: u64, experiment_id: u64, subject: u64, trial_index: u64) -> u64 {
    base.wrapping_add(experiment_id.wrapping_mul(EXPERIMENT_SEED_STRIDE))
        .wrapping_add(subject.wrapping_mul(SUBJECT_SEED_STRIDE))
        .wrapping_add(trial_index)
}

/// Seeded random source scoped to a single trial
///
/// Wraps a [`StdRng`] and exposes the small set of operations the
/// condition resolvers need: uniform choice, distinct sampling, and
/// in-place shuffling. All state lives inside the sampler; there is no
/// process-level RNG anywhere in the crate.
#[derive(Debug)]
pub struct TrialSampler {
    rng: StdRng,
}

impl TrialSampler {
    /// Create a sampler from a trial seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform index into a collection of the given length
    ///
    /// # Errors
    ///
    /// Returns `InsufficientPool` if `len` is zero.
    pub fn choice_index(&mut self, len: usize) -> Result<usize> {
        if len == 0 {
            return Err(insufficient_pool("choice", 1, 0));
        }
        Ok(self.rng.random_range(0..len))
    }

    /// Uniform choice of one element
    ///
    /// # Errors
    ///
    /// Returns `InsufficientPool` if the slice is empty.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T> {
        let index = self.choice_index(items.len())?;
        items
            .get(index)
            .ok_or_else(|| insufficient_pool("choice", 1, items.len()))
    }

    /// Uniform choice of one element, copied out
    ///
    /// # Errors
    ///
    /// Returns `InsufficientPool` if the slice is empty.
    pub fn choice_copied<T: Copy>(&mut self, items: &[T]) -> Result<T> {
        self.choice(items).copied()
    }

    /// Sample `k` distinct indices from `0..len`
    ///
    /// Partial Fisher-Yates over an index vector; the result order is
    /// the draw order, not the source order.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientPool` if `k > len`.
    pub fn sample_indices(&mut self, len: usize, k: usize) -> Result<Vec<usize>> {
        if k > len {
            return Err(insufficient_pool("sample", k, len));
        }

        let mut pool: Vec<usize> = (0..len).collect();
        let mut drawn = Vec::with_capacity(k);
        for _ in 0..k {
            let slot = self.rng.random_range(0..pool.len());
            drawn.push(pool.swap_remove(slot));
        }
        Ok(drawn)
    }

    /// Sample `k` distinct elements from a slice
    ///
    /// # Errors
    ///
    /// Returns `InsufficientPool` if `k` exceeds the slice length.
    pub fn sample<T: Copy>(&mut self, items: &[T], k: usize) -> Result<Vec<T>> {
        let indices = self.sample_indices(items.len(), k)?;
        Ok(indices.iter().filter_map(|&i| items.get(i).copied()).collect())
    }

    /// Shuffle a slice in place (Fisher-Yates)
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rng.random_range(0..=i);
            items.swap(i, j);
        }
    }

    /// Uniform value in `0..bound`
    ///
    /// # Errors
    ///
    /// Returns `InsufficientPool` if `bound` is zero.
    pub fn range(&mut self, bound: u32) -> Result<u32> {
        if bound == 0 {
            return Err(insufficient_pool("range", 1, 0));
        }
        Ok(self.rng.random_range(0..bound))
    }
}
