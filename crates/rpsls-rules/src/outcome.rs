//! The result of comparing two choices.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Headline shown while a round's outcome is still undetermined.
pub const PENDING_HEADLINE: &str = "Calculating...";

/// Result of a round, always from the player's point of view.
///
/// A round whose outcome is not known yet holds `Option<Outcome>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

impl Outcome {
    /// The same round seen from the computer's side.
    pub fn reversed(self) -> Self {
        match self {
            Self::Win => Self::Lose,
            Self::Lose => Self::Win,
            Self::Draw => Self::Draw,
        }
    }

    /// Result banner text.
    pub fn headline(self) -> &'static str {
        match self {
            Self::Win => "You Win!",
            Self::Lose => "Computer Wins!",
            Self::Draw => "It's a Draw!",
        }
    }

    /// Compact label for history rows.
    pub fn short_label(self) -> &'static str {
        match self {
            Self::Win => "Win",
            Self::Lose => "Loss",
            Self::Draw => "Draw",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win => write!(f, "win"),
            Self::Lose => write!(f, "lose"),
            Self::Draw => write!(f, "draw"),
        }
    }
}
