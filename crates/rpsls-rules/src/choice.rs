//! The five moves a party can make.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseChoiceError;

// ---------------------------------------------------------------------------
// Choice
// ---------------------------------------------------------------------------

/// One of the five game moves.
///
/// There is deliberately no "none" variant: a round that has no choice yet
/// holds `Option<Choice>::None`, so the rule engine can never be asked to
/// compare an unset move.
///
/// Serializes as the lowercase name, so `Choice::Spock` becomes `"spock"`
/// in JSON. That is the value a browser front end keys its icon table on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
    Lizard,
    Spock,
}

impl Choice {
    /// All five choices in canonical (button) order.
    pub const ALL: [Choice; 5] = [
        Choice::Rock,
        Choice::Paper,
        Choice::Scissors,
        Choice::Lizard,
        Choice::Spock,
    ];

    /// Lowercase name, identical to the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
            Self::Lizard => "lizard",
            Self::Spock => "spock",
        }
    }

    /// Title-case label for display ("Rock", "Spock").
    pub fn label(self) -> &'static str {
        match self {
            Self::Rock => "Rock",
            Self::Paper => "Paper",
            Self::Scissors => "Scissors",
            Self::Lizard => "Lizard",
            Self::Spock => "Spock",
        }
    }

    /// Single-letter shorthand accepted by [`FromStr`].
    ///
    /// Spock uses `k` because `s` is taken by scissors.
    pub fn shorthand(self) -> char {
        match self {
            Self::Rock => 'r',
            Self::Paper => 'p',
            Self::Scissors => 's',
            Self::Lizard => 'l',
            Self::Spock => 'k',
        }
    }

    /// The two choices this one defeats.
    pub fn victims(self) -> [Choice; 2] {
        match self {
            Self::Rock => [Self::Scissors, Self::Lizard],
            Self::Paper => [Self::Rock, Self::Spock],
            Self::Scissors => [Self::Paper, Self::Lizard],
            Self::Lizard => [Self::Paper, Self::Spock],
            Self::Spock => [Self::Scissors, Self::Rock],
        }
    }

    /// The two choices that defeat this one.
    pub fn predators(self) -> [Choice; 2] {
        let mut out = [self; 2];
        let mut n = 0;
        for other in Self::ALL {
            if other.victims().contains(&self) {
                out[n] = other;
                n += 1;
            }
        }
        out
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Choice {
    type Err = ParseChoiceError;

    /// Accepts a full name in any case or the one-letter shorthand.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| {
                wanted == c.name()
                    || (wanted.len() == 1 && wanted.starts_with(c.shorthand()))
            })
            .ok_or_else(|| ParseChoiceError {
                input: s.to_string(),
            })
    }
}
