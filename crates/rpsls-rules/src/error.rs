//! Error types for the rules layer.

/// Text that does not name one of the five choices.
///
/// Only front ends that accept typed input ever see this. The round
/// controller itself takes a [`Choice`](crate::Choice), so an invalid move
/// cannot reach it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown choice {input:?}, expected one of rock, paper, scissors, lizard, spock")]
pub struct ParseChoiceError {
    /// The rejected input, as given.
    pub input: String,
}
