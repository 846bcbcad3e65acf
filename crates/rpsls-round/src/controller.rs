//! Round controller actor: an isolated Tokio task that owns a session.
//!
//! The presentation layer never touches [`RoundState`] directly. It sends
//! commands through a [`RoundController`] handle and renders the
//! [`Snapshot`]s the actor publishes on a `watch` channel. One task owns all
//! the state, so updates are applied one at a time and no locking is needed.

use rpsls_rules::Choice;
use rpsls_settle::{SettleConfig, SettleTimer};
use tokio::sync::{mpsc, oneshot, watch};

use crate::{unix_millis, ChoiceSource, RoundConfig, RoundError, RoundId, RoundState, Snapshot};

/// Commands sent to the controller actor through its channel.
///
/// `Snapshot` carries a reply channel: the caller sends the command and
/// waits for the answer on the oneshot.
enum RoundCommand {
    /// The player picked a choice.
    Submit { choice: Choice },

    /// Back to choosing.
    Reset,

    /// Request the current snapshot.
    Snapshot { reply: oneshot::Sender<Snapshot> },

    /// Stop the actor.
    Shutdown,
}

/// Handle to a running round controller.
///
/// Cheap to clone: an `mpsc::Sender` plus a `watch::Receiver`. All clones
/// talk to the same single actor, which exclusively owns the session's
/// score, history, and round state.
#[derive(Clone)]
pub struct RoundController {
    sender: mpsc::Sender<RoundCommand>,
    snapshots: watch::Receiver<Snapshot>,
}

impl RoundController {
    /// Spawns a controller task and returns a handle to it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(config: RoundConfig, source: impl ChoiceSource) -> Self {
        Self::spawn_boxed(config, Box::new(source))
    }

    /// Like [`spawn`](Self::spawn), for a source that is already boxed.
    pub fn spawn_boxed(config: RoundConfig, source: Box<dyn ChoiceSource>) -> Self {
        let config = config.validated();
        let state = RoundState::new(config.history_capacity);
        let (tx, rx) = mpsc::channel(config.channel_size);
        let (publisher, snapshots) = watch::channel(state.snapshot());

        let actor = RoundActor {
            state,
            source,
            timer: SettleTimer::new(SettleConfig::with_delay(config.settle_delay)),
            receiver: rx,
            publisher,
        };

        tokio::spawn(actor.run());

        Self {
            sender: tx,
            snapshots,
        }
    }

    /// Submits the player's choice (fire-and-forget).
    ///
    /// Ignored by the controller unless it is in the `Choosing` phase.
    pub async fn submit_choice(&self, choice: Choice) -> Result<(), RoundError> {
        self.send(RoundCommand::Submit { choice }).await
    }

    /// Returns to the `Choosing` phase, abandoning any unrevealed outcome.
    pub async fn reset_round(&self) -> Result<(), RoundError> {
        self.send(RoundCommand::Reset).await
    }

    /// Requests the current snapshot.
    ///
    /// Reflects every command this handle sent before the call.
    pub async fn snapshot(&self) -> Result<Snapshot, RoundError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(RoundCommand::Snapshot { reply: reply_tx }).await?;
        reply_rx.await.map_err(|_| RoundError::Unavailable)
    }

    /// The most recently published snapshot, without a round trip.
    pub fn latest(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified of every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Tells the controller to stop.
    pub async fn shutdown(&self) -> Result<(), RoundError> {
        self.send(RoundCommand::Shutdown).await
    }

    /// Returns `true` once the controller task has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    async fn send(&self, cmd: RoundCommand) -> Result<(), RoundError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| RoundError::Unavailable)
    }
}

/// The internal actor state. Runs inside a Tokio task.
struct RoundActor {
    state: RoundState,
    source: Box<dyn ChoiceSource>,
    timer: SettleTimer,
    receiver: mpsc::Receiver<RoundCommand>,
    publisher: watch::Sender<Snapshot>,
}

impl RoundActor {
    /// Runs the actor loop until shutdown or until every handle is dropped.
    async fn run(mut self) {
        tracing::info!(
            settle_ms = self.timer.delay().as_millis() as u64,
            history = self.state.history().capacity(),
            "round controller started"
        );

        loop {
            tokio::select! {
                // A due reveal goes before any command queued behind it.
                biased;

                round = self.timer.wait() => {
                    self.handle_settle(RoundId(round));
                }
                cmd = self.receiver.recv() => {
                    match cmd {
                        Some(RoundCommand::Submit { choice }) => self.handle_submit(choice),
                        Some(RoundCommand::Reset) => self.handle_reset(),
                        Some(RoundCommand::Snapshot { reply }) => {
                            let _ = reply.send(self.state.snapshot());
                        }
                        Some(RoundCommand::Shutdown) => {
                            tracing::info!("round controller shutting down");
                            break;
                        }
                        None => break,
                    }
                }
            }
        }

        tracing::info!(
            player = self.state.score().player,
            computer = self.state.score().computer,
            reveals = self.timer.metrics().fired,
            "round controller stopped"
        );
    }

    fn handle_submit(&mut self, choice: Choice) {
        let Some(round) = self.state.submit(choice, self.source.as_mut()) else {
            return;
        };
        self.timer.arm(round.0);
        self.publish();
    }

    fn handle_settle(&mut self, round: RoundId) {
        let Some(record) = self.state.settle(round, unix_millis()) else {
            return;
        };
        tracing::info!(
            %round,
            player = %record.player_choice,
            computer = %record.computer_choice,
            outcome = %record.outcome,
            "round resolved"
        );
        self.publish();
    }

    fn handle_reset(&mut self) {
        if self.state.reset().is_some() {
            self.timer.cancel();
        }
        tracing::debug!(phase = %self.state.phase(), "round reset");
        self.publish();
    }

    fn publish(&self) {
        let snapshot = self.state.snapshot();
        tracing::trace!(phase = %snapshot.phase, round = ?snapshot.round, "snapshot published");
        self.publisher.send_replace(snapshot);
    }
}
