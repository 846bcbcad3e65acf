//! Error types for the round layer.
//!
//! Game-level misuse (submitting outside `Choosing`) is not an error: it is
//! a silent no-op. These variants only cover plumbing failures.

/// Errors that can occur when talking to a round controller.
#[derive(Debug, thiserror::Error)]
pub enum RoundError {
    /// The controller task has stopped, so its command channel is closed.
    #[error("round controller is unavailable")]
    Unavailable,

    /// A scripted choice source needs at least one choice to replay.
    #[error("scripted choice source needs at least one choice")]
    EmptyScript,
}
