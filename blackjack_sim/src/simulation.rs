pub mod deck;
pub mod hand;

use crate::{outcome, strategy, tables, Actor, Decision, Rank, RoundError, Rule};
use blackjack_sim_macros::allowed_phase;
use rand::Rng;
use strum_macros::{Display, EnumIter};

use self::{
    deck::Deck,
    hand::{Hand, HandValue},
};

/// Each hit takes two cards at once, for the dealer as well as the players.
const CARDS_PER_HIT: usize = 2;
const CARDS_PER_DOUBLE: usize = 1;
const INITIAL_CARDS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    DealerOpen,
    PlayerTurns,
    DealerResolution,
    Settlement,
}

/// A finished hand owned by a seat. A seat that splits owns two of these.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatHand {
    pub owner: usize,
    pub hand: Hand,
    pub value: HandValue,
    /// 2 after a double down, 1 otherwise.
    pub stake: u8,
    pub opening: Decision,
}

impl SeatHand {
    pub fn new(owner: usize, hand: Hand, stake: u8, opening: Decision) -> Self {
        let value = hand.value();
        SeatHand {
            owner,
            hand,
            value,
            stake,
            opening,
        }
    }

    pub fn cards(&self) -> &[Rank] {
        self.hand.cards()
    }
}

/// Where the dealer ended up, the x axis of the payout-by-dealer chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum DealerFinish {
    #[strum(serialize = "bust")]
    Bust,
    #[strum(serialize = "below 17")]
    Below17,
    #[strum(serialize = "17")]
    Seventeen,
    #[strum(serialize = "18")]
    Eighteen,
    #[strum(serialize = "19")]
    Nineteen,
    #[strum(serialize = "20")]
    Twenty,
    #[strum(serialize = "21")]
    TwentyOne,
}

impl From<&HandValue> for DealerFinish {
    fn from(value: &HandValue) -> Self {
        match value.best() {
            None => DealerFinish::Bust,
            Some(17) => DealerFinish::Seventeen,
            Some(18) => DealerFinish::Eighteen,
            Some(19) => DealerFinish::Nineteen,
            Some(20) => DealerFinish::Twenty,
            Some(21) => DealerFinish::TwentyOne,
            Some(_) => DealerFinish::Below17,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    /// Payout multiplier of every seat, indexed by seat.
    pub payouts: Vec<f64>,
    pub dealer_hand: Hand,
    pub dealer: HandValue,
    pub hands: Vec<SeatHand>,
}

impl RoundOutcome {
    pub fn dealer_up_card(&self) -> Rank {
        self.dealer_hand.cards()[0]
    }

    pub fn dealer_finish(&self) -> DealerFinish {
        DealerFinish::from(&self.dealer)
    }
}

/// Plays a full round on `deck`: the dealer's up card, every seat in order,
/// the dealer's hand, then settlement.
pub fn play_round<R: Rng + ?Sized>(
    deck: &mut Deck,
    number_of_players: usize,
    rule: &Rule,
    rng: &mut R,
) -> Result<RoundOutcome, RoundError> {
    let mut round = Round::new(deck, rng, number_of_players, rule)?;
    round.open_dealer()?;
    round.play_players()?;
    round.resolve_dealer()?;
    round.settle()
}

/// One round of the table. The phases must be driven in order; each phase
/// method fails with `RoundError::WrongPhase` otherwise.
pub struct Round<'a, R: Rng + ?Sized> {
    rule: Rule,
    number_of_players: usize,
    phase: RoundPhase,
    deck: &'a mut Deck,
    rng: &'a mut R,
    dealer_hand: Hand,
    dealer_value: Option<HandValue>,
    hands: Vec<SeatHand>,
}

impl<'a, R: Rng + ?Sized> Round<'a, R> {
    pub fn new(
        deck: &'a mut Deck,
        rng: &'a mut R,
        number_of_players: usize,
        rule: &Rule,
    ) -> Result<Self, RoundError> {
        if number_of_players == 0 {
            return Err(RoundError::NoPlayers);
        }
        Ok(Round {
            rule: *rule,
            number_of_players,
            phase: RoundPhase::DealerOpen,
            deck,
            rng,
            dealer_hand: Hand::new(),
            dealer_value: None,
            hands: Vec::with_capacity(number_of_players),
        })
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn deck(&self) -> &Deck {
        self.deck
    }

    /// Deals the dealer's visible card. Returns its rank.
    #[allowed_phase(DealerOpen)]
    pub fn open_dealer(&mut self) -> Result<Rank, RoundError> {
        let cards = self.draw(1)?;
        self.dealer_hand.receive_cards(&cards);
        self.phase = RoundPhase::PlayerTurns;
        Ok(cards[0])
    }

    /// Plays every seat to completion, one after another.
    #[allowed_phase(PlayerTurns)]
    pub fn play_players(&mut self) -> Result<(), RoundError> {
        let dealer_up_card = self.dealer_hand.cards()[0];
        for owner in 0..self.number_of_players {
            self.play_seat(owner, dealer_up_card)?;
        }
        self.phase = RoundPhase::DealerResolution;
        Ok(())
    }

    /// Draws the dealer's hand under the house rule.
    #[allowed_phase(DealerResolution)]
    pub fn resolve_dealer(&mut self) -> Result<HandValue, RoundError> {
        let mut dealer_hand = std::mem::take(&mut self.dealer_hand);
        let value = self.draw_until_stop(&mut dealer_hand, Actor::Dealer);
        self.dealer_hand = dealer_hand;
        let value = value?;
        log::debug!("dealer finishes {:?} with {:?}", value.best(), self.dealer_hand.cards());
        self.dealer_value = Some(value);
        self.phase = RoundPhase::Settlement;
        Ok(value)
    }

    /// Scores the round and consumes it.
    #[allowed_phase(Settlement)]
    pub fn settle(self) -> Result<RoundOutcome, RoundError> {
        let dealer = self.dealer_value.unwrap_or_else(|| self.dealer_hand.value());
        let payouts = outcome::settle(
            self.number_of_players,
            &self.hands,
            self.dealer_hand.cards(),
            &dealer,
            &self.rule,
        );
        Ok(RoundOutcome {
            payouts,
            dealer_hand: self.dealer_hand,
            dealer,
            hands: self.hands,
        })
    }

    fn play_seat(&mut self, owner: usize, dealer_up_card: Rank) -> Result<(), RoundError> {
        let cards = self.draw(INITIAL_CARDS)?;
        let (first, second) = (cards[0], cards[1]);

        if first == second && self.rule.use_split && tables::can_split(first, dealer_up_card) {
            log::debug!(
                "seat {} splits a pair of rank {} against {}",
                owner,
                first,
                dealer_up_card
            );
            for card in [first, second] {
                let mut hand = Hand::from_cards(vec![card]);
                self.draw_until_stop(&mut hand, Actor::Player)?;
                self.hands.push(SeatHand::new(owner, hand, 1, Decision::Split));
            }
            return Ok(());
        }

        let mut hand = Hand::from_cards(cards);
        if tables::should_double(hand.cards(), dealer_up_card) {
            log::debug!("seat {} doubles {:?} against {}", owner, hand.cards(), dealer_up_card);
            let card = self.draw(CARDS_PER_DOUBLE)?;
            hand.receive_cards(&card);
            self.hands.push(SeatHand::new(owner, hand, 2, Decision::Double));
            return Ok(());
        }

        let initial_cards = hand.len();
        self.draw_until_stop(&mut hand, Actor::Player)?;
        let opening = if hand.len() > initial_cards {
            Decision::Hit
        } else {
            Decision::Stand
        };
        log::debug!("seat {} finishes with {:?} ({:?})", owner, hand.cards(), opening);
        self.hands.push(SeatHand::new(owner, hand, 1, opening));
        Ok(())
    }

    /// Keeps drawing while the policy says so. Stops right away on bust.
    fn draw_until_stop(&mut self, hand: &mut Hand, actor: Actor) -> Result<HandValue, RoundError> {
        let mut totals = hand.totals();
        while strategy::should_draw(&totals, self.deck, actor, self.rule.certainty) {
            let cards = self.draw(CARDS_PER_HIT)?;
            hand.receive_cards(&cards);
            totals = hand.totals();
            if totals.is_empty() {
                return Ok(HandValue::Bust);
            }
        }
        Ok(HandValue::Totals(totals))
    }

    fn draw(&mut self, n: usize) -> Result<Vec<Rank>, RoundError> {
        let cards = self.deck.draw(n, &mut *self.rng)?;
        log::trace!("drew {:?}, {} cards left", cards, self.deck.len());
        Ok(cards)
    }
}
