use std::ops::Index;

use rand::Rng;

use crate::{DeckError, Rank, NUMBER_OF_RANKS};

const CARDS_PER_STANDARD_DECK: usize = 52;
const SUITS: u16 = 4;

/// Represents the cards left in a shoe. The order of the cards carries no
/// meaning, cards are always drawn uniformly at random.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    cards: Vec<Rank>,
    counts: [u16; NUMBER_OF_RANKS],
}

impl Deck {
    /// Creates a shoe made of `number_of_decks` standard decks.
    pub fn with_number_of_decks(number_of_decks: u8) -> Deck {
        let mut cards = Vec::with_capacity(number_of_decks as usize * CARDS_PER_STANDARD_DECK);
        for _ in 0..number_of_decks as u16 * SUITS {
            for rank in 0..NUMBER_OF_RANKS as Rank {
                cards.push(rank);
            }
        }
        Deck {
            cards,
            counts: [number_of_decks as u16 * SUITS; NUMBER_OF_RANKS],
        }
    }

    /// Creates a deck holding exactly the given cards.
    pub fn from_ranks(cards: Vec<Rank>) -> Result<Deck, DeckError> {
        let mut counts = [0; NUMBER_OF_RANKS];
        for &rank in &cards {
            let count = counts
                .get_mut(rank as usize)
                .ok_or(DeckError::InvalidRank(rank))?;
            *count += 1;
        }
        Ok(Deck { cards, counts })
    }

    /// Draws `n` cards without replacement. Fails without touching the deck
    /// if fewer than `n` cards remain.
    ///
    /// Every draw picks a uniform index in the remaining cards and
    /// swap-removes it, so with a generator that always yields index 0 the
    /// first card comes from the front and the rest from the back.
    pub fn draw<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Result<Vec<Rank>, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            let index = rng.gen_range(0..self.cards.len());
            let card = self.cards.swap_remove(index);
            self.counts[card as usize] -= 1;
            drawn.push(card);
        }
        Ok(drawn)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the number of remaining cards whose rank is strictly lower than `rank`.
    pub fn count_lower(&self, rank: Rank) -> usize {
        self.counts
            .iter()
            .take(rank as usize)
            .map(|&count| count as usize)
            .sum()
    }

    /// Checks if the shoe dropped below half of a fresh `number_of_decks` shoe.
    pub fn needs_replacement(&self, number_of_decks: u8) -> bool {
        (self.cards.len() as f64) < number_of_decks as f64 / 2.0 * CARDS_PER_STANDARD_DECK as f64
    }
}

impl Index<Rank> for Deck {
    type Output = u16;
    fn index(&self, rank: Rank) -> &Self::Output {
        &self.counts[rank as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn number_of_cards_is_correct(deck: &Deck) -> bool {
        let mut counts = [0 as u16; NUMBER_OF_RANKS];
        for &card in &deck.cards {
            counts[card as usize] += 1;
        }
        counts == deck.counts
    }

    #[test]
    fn new_shoe_has_four_of_each_rank_per_deck() {
        let deck = Deck::with_number_of_decks(3);
        assert_eq!(deck.len(), 3 * 52);
        assert!(number_of_cards_is_correct(&deck));
        for rank in 0..13 {
            assert_eq!(deck[rank], 12);
        }
    }

    #[test]
    fn draw_removes_cards_and_keeps_counts_synced() {
        let mut deck = Deck::with_number_of_decks(2);
        let mut rng = StdRng::seed_from_u64(7);
        let drawn = deck.draw(30, &mut rng).unwrap();
        assert_eq!(drawn.len(), 30);
        assert_eq!(deck.len(), 2 * 52 - 30);
        assert!(number_of_cards_is_correct(&deck));
        for rank in 0..13 {
            let drawn_of_rank = drawn.iter().filter(|&&card| card == rank).count() as u16;
            assert_eq!(deck[rank] + drawn_of_rank, 8);
        }
    }

    #[test]
    fn zero_rng_draws_front_then_back() {
        let mut deck = Deck::from_ranks(vec![4, 1, 2, 3]).unwrap();
        let mut rng = StepRng::new(0, 0);
        assert_eq!(deck.draw(1, &mut rng).unwrap(), vec![4]);
        assert_eq!(deck.draw(2, &mut rng).unwrap(), vec![3, 2]);
        assert_eq!(deck.draw(1, &mut rng).unwrap(), vec![1]);
        assert!(deck.is_empty());
    }

    #[test]
    fn drawing_too_many_cards_fails_and_keeps_deck() {
        let mut deck = Deck::from_ranks(vec![0, 9, 12]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            deck.draw(4, &mut rng),
            Err(DeckError::InsufficientCards {
                requested: 4,
                remaining: 3
            })
        );
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.draw(3, &mut rng).unwrap().len(), 3);
    }

    #[test]
    fn invalid_rank_is_rejected() {
        assert_eq!(Deck::from_ranks(vec![3, 13]), Err(DeckError::InvalidRank(13)));
    }

    #[test]
    fn count_lower_is_strict() {
        let deck = Deck::from_ranks(vec![0, 0, 3, 5, 5, 9, 12]).unwrap();
        assert_eq!(deck.count_lower(0), 0);
        assert_eq!(deck.count_lower(3), 2);
        assert_eq!(deck.count_lower(5), 3);
        assert_eq!(deck.count_lower(9), 5);
        assert_eq!(deck.count_lower(13), 7);
    }

    #[test]
    fn replacement_threshold_is_half_a_shoe() {
        let mut deck = Deck::with_number_of_decks(8);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(!deck.needs_replacement(8));
        deck.draw(8 * 52 - 208, &mut rng).unwrap();
        assert_eq!(deck.len(), 208);
        assert!(!deck.needs_replacement(8));
        deck.draw(1, &mut rng).unwrap();
        assert!(deck.needs_replacement(8));

        let single = Deck::from_ranks(vec![0; 25]).unwrap();
        assert!(single.needs_replacement(1));
        let single = Deck::from_ranks(vec![0; 26]).unwrap();
        assert!(!single.needs_replacement(1));
    }
}
