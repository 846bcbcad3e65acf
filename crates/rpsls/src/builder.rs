//! `GameBuilder`: configures and spawns a session's round controller.
//!
//! Ties the layers together: rules → settle timer → round controller.

use std::time::Duration;

use rpsls_round::{ChoiceSource, RandomSource, RoundConfig, RoundController};
use rpsls_settle::SettleConfig;

/// Builder for a session's [`RoundController`].
///
/// # Example
///
/// ```rust,ignore
/// use rpsls::prelude::*;
///
/// let game = GameBuilder::new()
///     .settle_delay(Duration::from_millis(500))
///     .seed(42)
///     .spawn();
/// ```
pub struct GameBuilder {
    config: RoundConfig,
    seed: Option<u64>,
    source: Option<Box<dyn ChoiceSource>>,
}

impl GameBuilder {
    /// Creates a builder with default settings (800 ms reveal, 10 rounds
    /// of history, unseeded random computer).
    pub fn new() -> Self {
        Self {
            config: RoundConfig::default(),
            seed: None,
            source: None,
        }
    }

    /// Replaces the whole round configuration.
    pub fn config(mut self, config: RoundConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets how long the outcome is withheld after a submission.
    ///
    /// Values above [`SettleConfig::MAX_DELAY`] are clamped.
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.config.settle_delay = SettleConfig::with_delay(delay).validated().delay;
        self
    }

    /// Sets how many completed rounds are kept in history.
    ///
    /// Clamped to `1..=`[`RoundConfig::MAX_HISTORY`] (10).
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    /// Seeds the computer's random draws for a reproducible session.
    ///
    /// Ignored if a custom [`source`](Self::source) is set.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the computer's choice source (for example a
    /// [`ScriptedSource`](rpsls_round::ScriptedSource) in tests).
    pub fn source(mut self, source: impl ChoiceSource) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The configuration the controller will be spawned with.
    pub fn round_config(&self) -> RoundConfig {
        self.config.clone().validated()
    }

    /// Spawns the round controller. Must be called inside a Tokio runtime.
    pub fn spawn(self) -> RoundController {
        let source: Box<dyn ChoiceSource> = match (self.source, self.seed) {
            (Some(source), _) => source,
            (None, Some(seed)) => Box::new(RandomSource::seeded(seed)),
            (None, None) => Box::new(RandomSource::new()),
        };
        tracing::debug!(seeded = self.seed.is_some(), "spawning round controller");
        RoundController::spawn_boxed(self.config, source)
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}
