use thiserror::Error;

use crate::{Rank, RoundPhase};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("cannot draw {requested} cards, only {remaining} remain in the deck")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("invalid card rank {0}, it must be in [0, 12]")]
    InvalidRank(Rank),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("{operation} needs the {expected:?} phase, the round is in {actual:?}")]
    WrongPhase {
        operation: &'static str,
        expected: RoundPhase,
        actual: RoundPhase,
    },
    #[error("a round needs at least one player")]
    NoPlayers,
}
