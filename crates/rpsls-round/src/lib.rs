//! Round controller for Rock-Paper-Scissors-Lizard-Spock.
//!
//! One controller per session owns the transient round state (choices,
//! outcome, phase) and the cumulative state (score, last-N history). It runs
//! as an isolated Tokio task and talks to its presentation layer through a
//! command channel in and a snapshot channel out.
//!
//! # Key types
//!
//! - [`RoundController`] — cloneable handle: submit, reset, snapshot, subscribe
//! - [`RoundState`] — the synchronous state machine the actor drives
//! - [`ChoiceSource`] — where the computer's draw comes from
//! - [`Snapshot`] — immutable view published after every change
//! - [`Phase`] — `Choosing` ⇄ `Result`
//! - [`RoundConfig`] — settle delay, history capacity, channel size

mod config;
mod controller;
mod error;
mod source;
mod state;

pub use config::{Phase, RoundConfig};
pub use controller::RoundController;
pub use error::RoundError;
pub use source::{ChoiceSource, RandomSource, ScriptedSource};
pub use state::{unix_millis, History, RoundId, RoundRecord, RoundState, Score, Snapshot};
