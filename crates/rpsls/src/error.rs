//! Unified error type for the game core.

use rpsls_round::RoundError;
use rpsls_rules::ParseChoiceError;

/// Top-level error that wraps every crate-specific error.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum RpslsError {
    /// Typed input that does not name a choice.
    #[error(transparent)]
    Parse(#[from] ParseChoiceError),

    /// The round controller is gone, or was misconfigured.
    #[error(transparent)]
    Round(#[from] RoundError),
}
