//! Round state: the synchronous core the controller actor drives.
//!
//! Everything here is plain data and pure transitions. Timing lives in the
//! actor ([`crate::RoundController`]); this module only knows that a round
//! is "pending" between `submit` and `settle`.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rpsls_rules::{resolve, Choice, Outcome};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ChoiceSource, Phase, RoundConfig};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Sequence number of a round within one controller. Starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(pub u64);

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round-{}", self.0)
    }
}

/// Milliseconds since the UNIX epoch, or 0 if the clock is before it.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

/// Cumulative wins for the session. Never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub computer: u32,
}

impl Score {
    /// Credits the winner of a round. Draws credit nobody.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.player = self.player.saturating_add(1),
            Outcome::Lose => self.computer = self.computer.saturating_add(1),
            Outcome::Draw => {}
        }
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// A completed round. Created once, never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: RoundId,
    pub player_choice: Choice,
    pub computer_choice: Choice,
    pub outcome: Outcome,
    /// Milliseconds since the UNIX epoch when the outcome was resolved.
    pub timestamp_ms: u64,
}

/// Most-recent-first list of completed rounds with a fixed capacity.
///
/// Pushing onto a full history evicts the oldest record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    records: Vec<RoundRecord>,
    capacity: usize,
}

impl History {
    /// An empty history holding at most `capacity` records, clamped to
    /// `1..=RoundConfig::MAX_HISTORY`.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, RoundConfig::MAX_HISTORY);
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Inserts `record` at the front, truncating to capacity.
    pub fn push(&mut self, record: RoundRecord) {
        self.records.insert(0, record);
        self.records.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&RoundRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoundRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[RoundRecord] {
        &self.records
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything the presentation layer renders, captured at one instant.
///
/// A fresh snapshot is built after every change, so a reader never sees a
/// half-applied update (say, a new outcome with the old score).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    /// The round on display, if any.
    pub round: Option<RoundId>,
    pub player_choice: Option<Choice>,
    pub computer_choice: Option<Choice>,
    /// `None` while choosing and during the settle delay.
    pub outcome: Option<Outcome>,
    pub score: Score,
    pub history: Vec<RoundRecord>,
}

impl Snapshot {
    /// Returns `true` if both choices are shown but the outcome is not yet.
    pub fn is_settling(&self) -> bool {
        self.phase == Phase::Result && self.outcome.is_none()
    }
}

// ---------------------------------------------------------------------------
// RoundState
// ---------------------------------------------------------------------------

/// The round state machine.
///
/// Transient fields (`player_choice`, `computer_choice`, `outcome`) belong
/// to the round on display. `score` and `history` accumulate for the whole
/// session and are untouched by [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct RoundState {
    phase: Phase,
    player_choice: Option<Choice>,
    computer_choice: Option<Choice>,
    outcome: Option<Outcome>,
    score: Score,
    history: History,
    current: Option<RoundId>,
    /// Round submitted but not yet settled. Cleared by settle and reset.
    pending: Option<RoundId>,
    next_round: u64,
}

impl RoundState {
    /// A fresh session in the `Choosing` phase.
    pub fn new(history_capacity: usize) -> Self {
        Self {
            phase: Phase::Choosing,
            player_choice: None,
            computer_choice: None,
            outcome: None,
            score: Score::default(),
            history: History::with_capacity(history_capacity),
            current: None,
            pending: None,
            next_round: 1,
        }
    }

    /// Starts a round with the player's `choice`.
    ///
    /// Stores the choice, draws the computer's choice from `source`, and
    /// moves to `Result` with the outcome still undetermined. Returns the
    /// id of the round that now awaits [`settle`](Self::settle).
    ///
    /// Outside `Choosing` this is a no-op returning `None`; nothing is drawn.
    pub fn submit(&mut self, choice: Choice, source: &mut dyn ChoiceSource) -> Option<RoundId> {
        if !self.phase.accepts_input() {
            debug!(phase = %self.phase, player = %choice, "submission outside choosing phase ignored");
            return None;
        }

        let round = RoundId(self.next_round);
        self.next_round += 1;

        debug_assert!(self.phase.can_transition_to(Phase::Result));
        let computer = source.draw();
        self.player_choice = Some(choice);
        self.computer_choice = Some(computer);
        self.outcome = None;
        self.phase = Phase::Result;
        self.current = Some(round);
        self.pending = Some(round);

        debug!(%round, player = %choice, %computer, "choices locked in");
        Some(round)
    }

    /// Reveals the outcome of `round`.
    ///
    /// Resolves the two choices, credits the score, and pushes a record to
    /// the front of history. Returns the record.
    ///
    /// Only the currently pending round can settle. Anything else (a round
    /// that was reset, or one already settled) is stale and ignored.
    pub fn settle(&mut self, round: RoundId, timestamp_ms: u64) -> Option<RoundRecord> {
        if self.pending != Some(round) {
            debug!(%round, pending = ?self.pending, "stale settle ignored");
            return None;
        }
        self.pending = None;

        let (Some(player_choice), Some(computer_choice)) = (self.player_choice, self.computer_choice)
        else {
            return None;
        };

        let outcome = resolve(player_choice, computer_choice);
        self.outcome = Some(outcome);
        self.score.record(outcome);

        let record = RoundRecord {
            round,
            player_choice,
            computer_choice,
            outcome,
            timestamp_ms,
        };
        self.history.push(record.clone());
        Some(record)
    }

    /// Returns to `Choosing` and clears the round on display.
    ///
    /// Valid in any phase. Score and history are kept. A round still
    /// waiting to settle is abandoned and returned, so the caller can
    /// cancel its timer.
    pub fn reset(&mut self) -> Option<RoundId> {
        debug_assert!(self.phase.can_transition_to(Phase::Choosing));
        let abandoned = self.pending.take();
        self.phase = Phase::Choosing;
        self.player_choice = None;
        self.computer_choice = None;
        self.outcome = None;
        self.current = None;
        if let Some(round) = abandoned {
            debug!(%round, "unsettled round abandoned by reset");
        }
        abandoned
    }

    /// Immutable copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            round: self.current,
            player_choice: self.player_choice,
            computer_choice: self.computer_choice,
            outcome: self.outcome,
            score: self.score,
            history: self.history.as_slice().to_vec(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_choice(&self) -> Option<Choice> {
        self.player_choice
    }

    pub fn computer_choice(&self) -> Option<Choice> {
        self.computer_choice
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The round waiting to settle, if any.
    pub fn pending(&self) -> Option<RoundId> {
        self.pending
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedSource;

    fn play(state: &mut RoundState, source: &mut ScriptedSource, choice: Choice) -> RoundRecord {
        let round = state.submit(choice, source).expect("submit accepted");
        let record = state.settle(round, 1_000).expect("settle applied");
        state.reset();
        record
    }

    #[test]
    fn test_new_state_is_choosing_and_empty() {
        let state = RoundState::default();
        assert_eq!(state.phase(), Phase::Choosing);
        assert_eq!(state.player_choice(), None);
        assert_eq!(state.computer_choice(), None);
        assert_eq!(state.outcome(), None);
        assert_eq!(state.score(), Score::default());
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_submit_shows_choices_before_outcome() {
        let mut state = RoundState::default();
        let mut source = ScriptedSource::always(Choice::Rock);

        let round = state.submit(Choice::Paper, &mut source).unwrap();
        assert_eq!(round, RoundId(1));
        assert_eq!(state.phase(), Phase::Result);
        assert_eq!(state.player_choice(), Some(Choice::Paper));
        assert_eq!(state.computer_choice(), Some(Choice::Rock));
        assert_eq!(state.outcome(), None);
        assert!(state.snapshot().is_settling());
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_paper_beats_rock() {
        let mut state = RoundState::default();
        let mut source = ScriptedSource::always(Choice::Rock);

        let round = state.submit(Choice::Paper, &mut source).unwrap();
        let record = state.settle(round, 42).unwrap();

        assert_eq!(record.outcome, Outcome::Win);
        assert_eq!(state.outcome(), Some(Outcome::Win));
        assert_eq!(state.score(), Score { player: 1, computer: 0 });
        let latest = state.history().latest().unwrap();
        assert_eq!(latest.player_choice, Choice::Paper);
        assert_eq!(latest.computer_choice, Choice::Rock);
        assert_eq!(latest.outcome, Outcome::Win);
        assert_eq!(latest.timestamp_ms, 42);
    }

    #[test]
    fn test_lizard_poisons_spock_and_spock_vaporizes_rock() {
        let mut state = RoundState::default();
        let mut source = ScriptedSource::new([Choice::Spock, Choice::Spock]).unwrap();

        assert_eq!(play(&mut state, &mut source, Choice::Lizard).outcome, Outcome::Win);
        assert_eq!(play(&mut state, &mut source, Choice::Rock).outcome, Outcome::Lose);
        assert_eq!(state.score(), Score { player: 1, computer: 1 });
    }

    #[test]
    fn test_draw_credits_nobody() {
        let mut state = RoundState::default();
        let mut source = ScriptedSource::always(Choice::Scissors);
        let record = play(&mut state, &mut source, Choice::Scissors);
        assert_eq!(record.outcome, Outcome::Draw);
        assert_eq!(state.score(), Score::default());
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_submit_during_result_is_noop() {
        let mut state = RoundState::default();
        let mut source = ScriptedSource::new([Choice::Rock, Choice::Paper]).unwrap();

        state.submit(Choice::Paper, &mut source).unwrap();
        let before = state.snapshot();
        assert_eq!(state.submit(Choice::Spock, &mut source), None);
        assert_eq!(state.snapshot(), before);

        // The rejected call must not consume a draw.
        let round = state.pending().unwrap();
        state.settle(round, 0);
        state.reset();
        state.submit(Choice::Rock, &mut source).unwrap();
        assert_eq!(state.computer_choice(), Some(Choice::Paper));
    }

    #[test]
    fn test_submit_after_settle_still_rejected_until_reset() {
        let mut state = RoundState::default();
        let mut source = ScriptedSource::always(Choice::Rock);
        let round = state.submit(Choice::Paper, &mut source).unwrap();
        state.settle(round, 0);
        let before = state.snapshot();
        assert_eq!(state.submit(Choice::Rock, &mut source), None);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_reset_clears_round_but_keeps_score_and_history() {
        let mut state = RoundState::default();
        let mut source = ScriptedSource::always(Choice::Rock);
        let round = state.submit(Choice::Paper, &mut source).unwrap();
        state.settle(round, 0);

        assert_eq!(state.reset(), None);
        assert_eq!(state.phase(), Phase::Choosing);
        assert_eq!(state.player_choice(), None);
        assert_eq!(state.computer_choice(), None);
        assert_eq!(state.outcome(), None);
        assert_eq!(state.score().player, 1);
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.snapshot().round, None);
    }

    #[test]
    fn test_reset_in_choosing_is_harmless() {
        let mut state = RoundState::default();
        state.reset();
        state.reset();
        assert_eq!(state.phase(), Phase::Choosing);
    }

    #[test]
    fn test_reset_before_settle_makes_round_stale() {
        let mut state = RoundState::default();
        let mut source = ScriptedSource::always(Choice::Rock);

        let round = state.submit(Choice::Paper, &mut source).unwrap();
        assert_eq!(state.reset(), Some(round));

        assert_eq!(state.settle(round, 0), None);
        assert_eq!(state.score(), Score::default());
        assert!(state.history().is_empty());
        assert_eq!(state.phase(), Phase::Choosing);
    }

    #[test]
    fn test_stale_round_cannot_settle_newer_round() {
        let mut state = RoundState::default();
        let mut source = ScriptedSource::new([Choice::Rock, Choice::Scissors]).unwrap();

        let first = state.submit(Choice::Paper, &mut source).unwrap();
        state.reset();
        let second = state.submit(Choice::Paper, &mut source).unwrap();
        assert_ne!(first, second);

        assert_eq!(state.settle(first, 0), None);
        assert_eq!(state.outcome(), None);

        let record = state.settle(second, 0).unwrap();
        assert_eq!(record.computer_choice, Choice::Scissors);
        assert_eq!(record.outcome, Outcome::Lose);
    }

    #[test]
    fn test_settle_twice_applies_once() {
        let mut state = RoundState::default();
        let mut source = ScriptedSource::always(Choice::Rock);
        let round = state.submit(Choice::Paper, &mut source).unwrap();
        assert!(state.settle(round, 0).is_some());
        assert!(state.settle(round, 0).is_none());
        assert_eq!(state.score().player, 1);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_history_is_capped_and_most_recent_first() {
        let mut state = RoundState::new(10);
        let mut source = ScriptedSource::always(Choice::Rock);
        for _ in 0..15 {
            play(&mut state, &mut source, Choice::Paper);
            assert!(state.history().len() <= 10);
        }

        let rounds: Vec<u64> = state.history().iter().map(|r| r.round.0).collect();
        assert_eq!(rounds, (6..=15).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_history_never_exceeds_ten_even_when_asked_for_more() {
        let mut state = RoundState::new(50);
        assert_eq!(state.history().capacity(), 10);

        let mut source = ScriptedSource::always(Choice::Rock);
        for _ in 0..15 {
            play(&mut state, &mut source, Choice::Paper);
        }
        assert_eq!(state.history().len(), 10);
        assert_eq!(History::with_capacity(0).capacity(), 1);
    }

    #[test]
    fn test_score_never_decreases() {
        let mut state = RoundState::default();
        let mut source = ScriptedSource::new(Choice::ALL).unwrap();
        let mut last = state.score();
        for (i, player) in Choice::ALL.iter().cycle().take(40).enumerate() {
            let record = play(&mut state, &mut source, *player);
            let now = state.score();
            assert!(now.player >= last.player && now.computer >= last.computer, "round {i}");
            match record.outcome {
                Outcome::Win => assert_eq!((now.player, now.computer), (last.player + 1, last.computer)),
                Outcome::Lose => assert_eq!((now.player, now.computer), (last.player, last.computer + 1)),
                Outcome::Draw => assert_eq!(now, last),
            }
            last = now;
        }
    }

    #[test]
    fn test_latest_record_matches_resolve() {
        let mut state = RoundState::default();
        let mut source = ScriptedSource::new([Choice::Lizard, Choice::Paper, Choice::Spock]).unwrap();
        for player in Choice::ALL {
            let record = play(&mut state, &mut source, player);
            let latest = state.history().latest().unwrap();
            assert_eq!(latest, &record);
            assert_eq!(latest.player_choice, player);
            assert_eq!(latest.outcome, resolve(player, latest.computer_choice));
        }
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut state = RoundState::default();
        let mut source = ScriptedSource::always(Choice::Rock);
        let round = state.submit(Choice::Lizard, &mut source).unwrap();
        state.settle(round, 5);

        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["phase"], "result");
        assert_eq!(json["round"], 1);
        assert_eq!(json["player_choice"], "lizard");
        assert_eq!(json["computer_choice"], "rock");
        assert_eq!(json["outcome"], "lose");
        assert_eq!(json["score"]["computer"], 1);
        assert_eq!(json["history"][0]["timestamp_ms"], 5);
    }

    #[test]
    fn test_round_id_display() {
        assert_eq!(RoundId(3).to_string(), "round-3");
    }
}
