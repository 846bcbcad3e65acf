//! Cancellable one-shot settle timer.
//!
//! After a player submits a choice, both choices are shown at once but the
//! outcome is held back for a short settle delay so the reveal animation can
//! play. This crate provides that delay as a timer keyed by a round number:
//! the timer remembers *which* round it is settling, so a round that was
//! reset (and the timer cancelled or re-armed) can never have a stale
//! outcome applied to it.
//!
//! # Integration
//!
//! The timer is designed to sit inside the round controller's
//! `tokio::select!` loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* submit arms, reset cancels */ }
//!         round = timer.wait() => {
//!             state.settle(round);
//!         }
//!     }
//! }
//! ```
//!
//! When nothing is armed, [`SettleTimer::wait`] pends forever, so the
//! `select!` only ever wakes for commands.

use std::time::Duration;

use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the settle timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettleConfig {
    /// How long the outcome is withheld after a submission.
    /// Zero settles on the next poll.
    pub delay: Duration,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            delay: Self::DEFAULT_DELAY,
        }
    }
}

impl SettleConfig {
    /// Delay used when none is configured.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(800);

    /// Longest delay accepted. Anything above is clamped.
    pub const MAX_DELAY: Duration = Duration::from_secs(10);

    /// Create a config with a specific delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`SettleTimer::new`].
    pub fn validated(mut self) -> Self {
        if self.delay > Self::MAX_DELAY {
            warn!(
                delay_ms = self.delay.as_millis() as u64,
                max_ms = Self::MAX_DELAY.as_millis() as u64,
                "settle delay exceeds maximum, clamping"
            );
            self.delay = Self::MAX_DELAY;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Counters for the settle timer's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettleMetrics {
    /// Times the timer was armed.
    pub armed: u64,
    /// Times a deadline elapsed and a round was handed back.
    pub fired: u64,
    /// Times a pending round was dropped by `cancel` or by re-arming.
    pub cancelled: u64,
}

// ---------------------------------------------------------------------------
// Timer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Pending {
    round: u64,
    deadline: Instant,
}

/// One-shot timer that hands back the round it was armed for.
///
/// At most one round is pending at a time. Owned by a single round
/// controller; not shared.
#[derive(Debug)]
pub struct SettleTimer {
    config: SettleConfig,
    pending: Option<Pending>,
    metrics: SettleMetrics,
}

impl SettleTimer {
    /// Create an unarmed timer from config.
    pub fn new(config: SettleConfig) -> Self {
        let config = config.validated();
        debug!(
            delay_ms = config.delay.as_millis() as u64,
            "settle timer created"
        );
        Self {
            config,
            pending: None,
            metrics: SettleMetrics::default(),
        }
    }

    /// Create an unarmed timer with a specific delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self::new(SettleConfig::with_delay(delay))
    }

    /// Start the settle delay for `round`.
    ///
    /// If another round was still pending it is dropped and counted as
    /// cancelled; only the newest round can ever fire.
    pub fn arm(&mut self, round: u64) {
        if let Some(previous) = self.pending.take() {
            self.metrics.cancelled += 1;
            debug!(
                previous = previous.round,
                round, "settle timer re-armed, dropping pending round"
            );
        }
        self.pending = Some(Pending {
            round,
            deadline: Instant::now() + self.config.delay,
        });
        self.metrics.armed += 1;
        trace!(round, "settle timer armed");
    }

    /// Drop the pending round, if any, and return it.
    ///
    /// Idempotent: cancelling an unarmed timer returns `None` and changes
    /// nothing.
    pub fn cancel(&mut self) -> Option<u64> {
        let round = self.pending.take()?.round;
        self.metrics.cancelled += 1;
        debug!(round, "settle timer cancelled");
        Some(round)
    }

    /// Wait for the pending round's deadline and return that round.
    ///
    /// Unarmed, this future pends forever. It is cancel-safe: dropping it
    /// before the deadline leaves the round pending.
    pub async fn wait(&mut self) -> u64 {
        let Some(Pending { round, deadline }) = self.pending else {
            std::future::pending::<()>().await;
            unreachable!()
        };

        time::sleep_until(deadline).await;

        self.pending = None;
        self.metrics.fired += 1;
        trace!(
            round,
            late_us = Instant::now().saturating_duration_since(deadline).as_micros() as u64,
            "settle timer fired"
        );
        round
    }

    /// The round currently waiting to settle.
    pub fn pending(&self) -> Option<u64> {
        self.pending.map(|p| p.round)
    }

    /// Whether a round is waiting to settle.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending round fires.
    pub fn remaining(&self) -> Option<Duration> {
        self.pending
            .map(|p| p.deadline.saturating_duration_since(Instant::now()))
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.config.delay
    }

    /// Snapshot of lifetime counters.
    pub fn metrics(&self) -> &SettleMetrics {
        &self.metrics
    }
}

impl Default for SettleTimer {
    fn default() -> Self {
        Self::new(SettleConfig::default())
    }
}
