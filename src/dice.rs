//! Dice sources: the randomness seam of the engine.
//!
//! ## Key Features
//!
//! - **Injectable**: the engine draws faces through the [`DiceRoller`]
//!   trait, so tests substitute a deterministic sequence instead of
//!   patching engine internals
//! - **Deterministic**: [`WeightedDice`] with the same seed produces an
//!   identical face sequence
//! - **Serializable**: O(1) state capture and restore via
//!   [`WeightedDiceState`]
//!
//! ## The weighted die
//!
//! The house die is deliberately loaded. Each face is drawn by sampling a
//! uniform integer in `[0, 9]` and bucketing:
//!
//! | sample  | face | probability |
//! |---------|------|-------------|
//! | 0, 1, 2 | 1    | 3/10        |
//! | 3, 4    | 2    | 2/10        |
//! | 5, 6    | 3    | 2/10        |
//! | 7       | 4    | 1/10        |
//! | 8       | 5    | 1/10        |
//! | 9       | 6    | 1/10        |
//!
//! This mapping is a fixed game rule and must not be replaced with a fair
//! die.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A source of single die faces in `[1, 6]`.
///
/// The engine rolls two dice per call by drawing two faces in order
/// (die 1 first). Implementations must only ever return values in
/// `[1, 6]`.
pub trait DiceRoller {
    /// Draw the next face.
    fn roll_die(&mut self) -> u8;

    /// Draw a pair of faces, die 1 first.
    fn roll_pair(&mut self) -> (u8, u8) {
        let d1 = self.roll_die();
        let d2 = self.roll_die();
        (d1, d2)
    }
}

/// Map a uniform sample in `[0, 9]` to a die face.
///
/// Reproduces the loaded-die table exactly; see the module docs.
#[must_use]
pub(crate) const fn weighted_face(sample: u8) -> u8 {
    match sample {
        0..=2 => 1,
        3..=4 => 2,
        5..=6 => 3,
        7 => 4,
        8 => 5,
        _ => 6,
    }
}

/// Production dice source backed by a deterministic ChaCha8 stream.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality
/// randomness. Seed-constructed instances replay identical sequences,
/// which keeps full sessions reproducible.
#[derive(Clone, Debug)]
pub struct WeightedDice {
    inner: ChaCha8Rng,
    seed: u64,
}

impl WeightedDice {
    /// Create a dice source with a fresh entropy seed.
    #[must_use]
    pub fn from_entropy() -> Self {
        let mut seeder = ChaCha8Rng::from_entropy();
        Self::seeded(seeder.gen())
    }

    /// Create a dice source with the given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> WeightedDiceState {
        WeightedDiceState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &WeightedDiceState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl DiceRoller for WeightedDice {
    fn roll_die(&mut self) -> u8 {
        weighted_face(self.inner.gen_range(0..10))
    }
}

/// Serializable dice source state for checkpointing.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of
/// how many faces have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedDiceState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Deterministic dice source that plays back a scripted face sequence.
///
/// Once the script is exhausted, draws fall through to a weighted
/// fallback, so a test can seed a handful of decisive rolls and let the
/// session keep running.
///
/// ```
/// use craps_engine::dice::{DiceRoller, ScriptedDice};
///
/// let mut dice = ScriptedDice::new([4, 3]);
/// assert_eq!(dice.roll_pair(), (4, 3));
/// ```
pub struct ScriptedDice {
    script: VecDeque<u8>,
    fallback: WeightedDice,
}

impl ScriptedDice {
    /// Create a scripted source that falls back to a fixed-seed
    /// weighted die when the script runs out.
    #[must_use]
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        Self {
            script: faces.into_iter().collect(),
            fallback: WeightedDice::seeded(0),
        }
    }

    /// Replace the fallback source.
    #[must_use]
    pub fn with_fallback(mut self, fallback: WeightedDice) -> Self {
        self.fallback = fallback;
        self
    }

    /// Append more faces to the end of the script.
    pub fn extend_script(&mut self, faces: impl IntoIterator<Item = u8>) {
        self.script.extend(faces);
    }

    /// Number of scripted faces not yet drawn.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DiceRoller for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        match self.script.pop_front() {
            Some(face) => face,
            None => self.fallback.roll_die(),
        }
    }
}
