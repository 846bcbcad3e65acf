//! Round configuration and phase state machine.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

// ---------------------------------------------------------------------------
// RoundConfig
// ---------------------------------------------------------------------------

/// Configuration for a round controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundConfig {
    /// How long the outcome is held back after both choices are shown.
    /// Cosmetic only; zero reveals on the next controller iteration.
    pub settle_delay: Duration,

    /// Number of completed rounds kept in history (most recent first).
    pub history_capacity: usize,

    /// Command channel capacity. Senders wait when it is full.
    pub channel_size: usize,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(800),
            history_capacity: 10,
            channel_size: 32,
        }
    }
}

impl RoundConfig {
    /// Upper bound for `history_capacity`. History never grows past this.
    pub const MAX_HISTORY: usize = 10;

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// - `history_capacity` clamped to `1..=MAX_HISTORY`.
    /// - `channel_size` at least 1 (a zero-capacity mpsc channel panics).
    ///
    /// The settle delay is clamped by the settle timer itself.
    pub fn validated(mut self) -> Self {
        let history = self.history_capacity.clamp(1, Self::MAX_HISTORY);
        if history != self.history_capacity {
            warn!(
                requested = self.history_capacity,
                using = history,
                "history_capacity out of range, clamping"
            );
            self.history_capacity = history;
        }
        if self.channel_size == 0 {
            warn!("channel_size of 0 is invalid, using 1");
            self.channel_size = 1;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Which view the presentation layer shows.
///
/// ```text
/// Choosing --submit--> Result --reset--> Choosing
/// ```
///
/// - **Choosing**: awaiting the player's pick. The only phase that
///   accepts a submission.
/// - **Result**: both choices are known. The outcome is pending until the
///   settle delay elapses, then revealed. Stays here until reset.
///
/// There is no terminal phase; the loop lasts as long as the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Choosing,
    Result,
}

impl Phase {
    /// Returns `true` if a player choice may be submitted.
    pub fn accepts_input(&self) -> bool {
        matches!(self, Self::Choosing)
    }

    /// Returns `true` if moving to `target` is a legal transition.
    ///
    /// Reset is legal from either phase, so `Choosing → Choosing` is
    /// allowed; `Result → Result` is not.
    pub fn can_transition_to(self, target: Self) -> bool {
        match (self, target) {
            (Self::Choosing, Self::Result) => true,
            (_, Self::Choosing) => true,
            (Self::Result, Self::Result) => false,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Choosing => write!(f, "choosing"),
            Self::Result => write!(f, "result"),
        }
    }
}
