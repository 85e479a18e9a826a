mod error;
pub mod outcome;
pub mod simulation;
pub mod strategy;
pub mod tables;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};

pub use error::{DeckError, RoundError};
pub use simulation::deck::Deck;
pub use simulation::hand::{feasible_totals, FeasibleTotals, Hand, HandValue};
pub use simulation::{play_round, DealerFinish, Round, RoundOutcome, RoundPhase, SeatHand};

/// Identifies a card's face regardless of suit. 0 is the Ace, 1 to 8 are the
/// cards 2 to 9, and 9 to 12 are 10, J, Q, K.
pub type Rank = u8;

pub const ACE: Rank = 0;
pub const NUMBER_OF_RANKS: usize = 13;

/// Maps a rank to its blackjack value. Ace counts as 1 here; the optional 10
/// extra points are handled by `feasible_totals`.
pub static RANK_TO_BLACKJACK_VALUE: [u8; NUMBER_OF_RANKS] =
    [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub use_split: bool,
    /// The safe-draw fraction a player needs before hitting a total in 11..=17.
    pub certainty: f64,
    pub payout_blackjack: f64,
    pub bonus_suppression: BonusSuppression,
}

impl Rule {
    pub fn new(use_split: bool, certainty: f64) -> Self {
        Rule {
            use_split,
            certainty,
            ..Default::default()
        }
    }
}

impl Default for Rule {
    fn default() -> Self {
        Rule {
            use_split: true,
            certainty: 0.85,
            payout_blackjack: 1.5,
            bonus_suppression: BonusSuppression::DealerTwentyOne,
        }
    }
}

/// Decides when the dealer's hand takes away a player's blackjack bonus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize_enum_str, Deserialize_enum_str)]
pub enum BonusSuppression {
    /// Any dealer hand that can count 21, however many cards it holds.
    DealerTwentyOne,
    /// Only a dealer natural: exactly two cards counting 21.
    DealerNatural,
}

impl BonusSuppression {
    pub fn suppresses(&self, dealer_cards: &[Rank], dealer_value: &HandValue) -> bool {
        match self {
            BonusSuppression::DealerTwentyOne => dealer_value.contains(21),
            BonusSuppression::DealerNatural => dealer_cards.len() == 2 && dealer_value.contains(21),
        }
    }
}

/// Who is asking to draw. The dealer plays a fixed rule, players follow the
/// certainty threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Player,
    Dealer,
}

/// How a seat opened its hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Hit,
    Stand,
    Double,
    Split,
}
