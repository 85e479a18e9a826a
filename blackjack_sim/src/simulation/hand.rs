use crate::{Rank, ACE, RANK_TO_BLACKJACK_VALUE};

pub const BLACKJACK: u8 = 21;
const ACE_BONUS: u32 = 10;

/// The set of totals in [0, 21] a hand can count. Aces may count as 1 or 11,
/// so a hand with `a` aces has up to `a + 1` totals. Empty means bust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeasibleTotals {
    bits: u32,
}

impl FeasibleTotals {
    pub const EMPTY: FeasibleTotals = FeasibleTotals { bits: 0 };

    /// Totals above 21 are dropped.
    pub fn from_totals<I: IntoIterator<Item = u32>>(totals: I) -> Self {
        let mut bits = 0;
        for total in totals {
            if total <= BLACKJACK as u32 {
                bits |= 1 << total;
            }
        }
        FeasibleTotals { bits }
    }

    pub fn contains(&self, total: u8) -> bool {
        total <= BLACKJACK && self.bits & (1 << total) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn max(&self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some((31 - self.bits.leading_zeros()) as u8)
        }
    }

    pub fn min(&self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some(self.bits.trailing_zeros() as u8)
        }
    }

    pub fn any_above(&self, total: u8) -> bool {
        self.bits.checked_shr(total as u32 + 1).unwrap_or(0) != 0
    }

    pub fn any_below(&self, total: u8) -> bool {
        let mask = 1u32.checked_shl(total as u32).map_or(u32::MAX, |bit| bit - 1);
        self.bits & mask != 0
    }

    /// Iterates the totals in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=BLACKJACK).filter(|&total| self.contains(total))
    }
}

/// Computes every total in [0, 21] the given cards can count.
///
/// With `a` aces and non-ace value sum `s` the totals are
/// `s + a + 10k` for `k` in `0..=a`.
pub fn feasible_totals(cards: &[Rank]) -> FeasibleTotals {
    let aces = cards.iter().filter(|&&card| card == ACE).count() as u32;
    let base: u32 = cards
        .iter()
        .map(|&card| RANK_TO_BLACKJACK_VALUE[card as usize] as u32)
        .sum();
    FeasibleTotals::from_totals((0..=aces).map(|k| base + ACE_BONUS * k))
}

/// What a finished hand is worth when it gets compared against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandValue {
    Bust,
    Totals(FeasibleTotals),
}

impl HandValue {
    pub fn of(cards: &[Rank]) -> Self {
        feasible_totals(cards).into()
    }

    pub fn is_bust(&self) -> bool {
        matches!(self, HandValue::Bust)
    }

    pub fn contains(&self, total: u8) -> bool {
        match self {
            HandValue::Bust => false,
            HandValue::Totals(totals) => totals.contains(total),
        }
    }

    /// The best total of the hand, or `None` if it busted.
    pub fn best(&self) -> Option<u8> {
        match self {
            HandValue::Bust => None,
            HandValue::Totals(totals) => totals.max(),
        }
    }
}

impl From<FeasibleTotals> for HandValue {
    fn from(totals: FeasibleTotals) -> Self {
        if totals.is_empty() {
            HandValue::Bust
        } else {
            HandValue::Totals(totals)
        }
    }
}

/// Cards of one hand in drawing order. A hand only grows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hand {
    cards: Vec<Rank>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(3),
        }
    }

    pub fn from_cards(cards: Vec<Rank>) -> Hand {
        Hand { cards }
    }

    pub fn receive_cards(&mut self, cards: &[Rank]) {
        self.cards.extend_from_slice(cards);
    }

    pub fn cards(&self) -> &[Rank] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn has_ace(&self) -> bool {
        self.cards.contains(&ACE)
    }

    pub fn totals(&self) -> FeasibleTotals {
        feasible_totals(&self.cards)
    }

    pub fn value(&self) -> HandValue {
        self.totals().into()
    }
}
