//! The beats-relation and outcome resolution.
//!
//! The relation is a regular tournament on five nodes: each choice beats
//! exactly two others and loses to the remaining two, so the only draw is
//! a choice meeting itself.

use std::fmt;

use serde::Serialize;

use crate::{Choice, Outcome};

/// One edge of the beats-relation, with the verb that narrates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub winner: Choice,
    pub verb: &'static str,
    pub loser: Choice,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.winner.label(), self.verb, self.loser.label())
    }
}

// Grouped by winner, in canonical choice order.
const RULES: [Rule; 10] = [
    rule(Choice::Rock, "crushes", Choice::Scissors),
    rule(Choice::Rock, "crushes", Choice::Lizard),
    rule(Choice::Paper, "covers", Choice::Rock),
    rule(Choice::Paper, "disproves", Choice::Spock),
    rule(Choice::Scissors, "cuts", Choice::Paper),
    rule(Choice::Scissors, "decapitates", Choice::Lizard),
    rule(Choice::Lizard, "eats", Choice::Paper),
    rule(Choice::Lizard, "poisons", Choice::Spock),
    rule(Choice::Spock, "smashes", Choice::Scissors),
    rule(Choice::Spock, "vaporizes", Choice::Rock),
];

const fn rule(winner: Choice, verb: &'static str, loser: Choice) -> Rule {
    Rule { winner, verb, loser }
}

/// All ten edges of the beats-relation.
pub fn rules() -> [Rule; 10] {
    RULES
}

/// Returns `true` if `a` defeats `b`.
pub fn beats(a: Choice, b: Choice) -> bool {
    a.victims().contains(&b)
}

/// Resolves a round. Pure and deterministic.
///
/// - Same choice on both sides → [`Outcome::Draw`].
/// - `computer` is one of `player`'s victims → [`Outcome::Win`].
/// - Otherwise → [`Outcome::Lose`].
pub fn resolve(player: Choice, computer: Choice) -> Outcome {
    if player == computer {
        Outcome::Draw
    } else if beats(player, computer) {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

/// The rule deciding a pair of distinct choices, whichever order they come in.
///
/// Returns `None` when `a == b`.
pub fn rule_between(a: Choice, b: Choice) -> Option<Rule> {
    RULES
        .iter()
        .copied()
        .find(|r| (r.winner == a && r.loser == b) || (r.winner == b && r.loser == a))
}
