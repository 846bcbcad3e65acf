//! # rpsls
//!
//! Game core for Rock-Paper-Scissors-Lizard-Spock.
//!
//! A presentation layer (browser, terminal, anything) builds one
//! [`RoundController`] per session with [`GameBuilder`], forwards the
//! player's clicks as [`submit_choice`](RoundController::submit_choice) and
//! [`reset_round`](RoundController::reset_round), and renders the
//! [`Snapshot`]s the controller publishes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rpsls::prelude::*;
//!
//! # async fn demo() -> Result<(), RpslsError> {
//! let game = GameBuilder::new().spawn();
//! let mut updates = game.subscribe();
//!
//! game.submit_choice(Choice::Spock).await?;
//! let snapshot = updates.wait_for(|s| s.outcome.is_some()).await
//!     .map_err(|_| RoundError::Unavailable)?
//!     .clone();
//! println!("{:?}", snapshot.outcome);
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
pub mod telemetry;

pub use builder::GameBuilder;
pub use error::RpslsError;

pub use rpsls_round as round;
pub use rpsls_rules as rules;

pub mod prelude {
    pub use crate::{GameBuilder, RpslsError};
    pub use rpsls_round::{
        ChoiceSource, Phase, RandomSource, RoundConfig, RoundController, RoundError, RoundId,
        RoundRecord, ScriptedSource, Score, Snapshot,
    };
    pub use rpsls_rules::{
        beats, resolve, rule_between, rules, Choice, Outcome, ParseChoiceError, Rule,
        PENDING_HEADLINE,
    };
}
