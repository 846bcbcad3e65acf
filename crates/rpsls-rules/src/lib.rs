//! Rule engine for Rock-Paper-Scissors-Lizard-Spock.
//!
//! This crate is the pure bottom layer of the game:
//!
//! - **Values** ([`Choice`], [`Outcome`]) — the five moves and the result of
//!   comparing two of them, always from the player's perspective.
//! - **Rules** ([`resolve`], [`beats`], [`rules`]) — the fixed beats-relation.
//!   Every choice beats exactly two others and loses to the remaining two.
//! - **Errors** ([`ParseChoiceError`]) — what can go wrong turning text
//!   into a [`Choice`].
//!
//! Nothing here holds state or performs I/O. An unset choice or a pending
//! outcome is expressed by the caller as `Option<Choice>` /
//! `Option<Outcome>`.
//!
//! ```text
//! Presentation (labels) → Round (state machine) → Rules (this crate)
//! ```

mod choice;
mod engine;
mod error;
mod outcome;

pub use choice::Choice;
pub use engine::{beats, resolve, rule_between, rules, Rule};
pub use error::ParseChoiceError;
pub use outcome::{Outcome, PENDING_HEADLINE};
