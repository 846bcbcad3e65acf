//! The `ChoiceSource` trait: where the computer's pick comes from.
//!
//! The controller never calls a random number generator directly. It asks
//! its source for a draw, so tests can substitute a fixed script and
//! exercise exact matchups.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rpsls_rules::Choice;

use crate::RoundError;

/// Supplies the computer's choice for each round.
///
/// `Send + 'static` because the source is moved into the controller task.
pub trait ChoiceSource: Send + 'static {
    /// Draws the computer's choice for the next round.
    fn draw(&mut self) -> Choice;
}

// ---------------------------------------------------------------------------
// RandomSource
// ---------------------------------------------------------------------------

/// Uniform draw over the five choices, independent of the player's pick.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Seeds from the thread-local generator.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible sequence of draws for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ChoiceSource for RandomSource {
    fn draw(&mut self) -> Choice {
        Choice::ALL[self.rng.random_range(0..Choice::ALL.len())]
    }
}

// ---------------------------------------------------------------------------
// ScriptedSource
// ---------------------------------------------------------------------------

/// Replays a fixed sequence of choices, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<Choice>,
    next: usize,
}

impl ScriptedSource {
    /// Builds a source from a non-empty script.
    ///
    /// # Errors
    /// Returns [`RoundError::EmptyScript`] if `script` yields nothing.
    pub fn new(script: impl IntoIterator<Item = Choice>) -> Result<Self, RoundError> {
        let script: Vec<Choice> = script.into_iter().collect();
        if script.is_empty() {
            return Err(RoundError::EmptyScript);
        }
        Ok(Self { script, next: 0 })
    }

    /// Always draws the same choice.
    pub fn always(choice: Choice) -> Self {
        Self {
            script: vec![choice],
            next: 0,
        }
    }
}

impl ChoiceSource for ScriptedSource {
    fn draw(&mut self) -> Choice {
        let choice = self.script[self.next];
        self.next = (self.next + 1) % self.script.len();
        choice
    }
}
