use crate::{Actor, Deck, FeasibleTotals, Rank, NUMBER_OF_RANKS, RANK_TO_BLACKJACK_VALUE};

/// The dealer stands once any total is above this.
pub const DEALER_STANDS_ABOVE: u8 = 16;
/// A player stands once any total is above this.
pub const PLAYER_STANDS_ABOVE: u8 = 17;
/// A player always hits while any total is below this, since no card can bust it.
pub const PLAYER_ALWAYS_HITS_BELOW: u8 = 11;

/// Decides whether the hand with `totals` takes more cards.
///
/// The dealer follows the house rule and ignores `certainty`. A player with a
/// total in 11..=17 hits only when the safe-draw fraction of `deck` for the
/// largest total is strictly above `certainty`.
pub fn should_draw(totals: &FeasibleTotals, deck: &Deck, actor: Actor, certainty: f64) -> bool {
    match actor {
        Actor::Dealer => !totals.is_empty() && !totals.any_above(DEALER_STANDS_ABOVE),
        Actor::Player => {
            if totals.any_above(PLAYER_STANDS_ABOVE) {
                false
            } else if totals.any_below(PLAYER_ALWAYS_HITS_BELOW) {
                true
            } else {
                match totals.max() {
                    Some(total) => safe_draw_fraction(total, deck) > certainty,
                    None => false,
                }
            }
        }
    }
}

/// Fraction of `deck` holding a rank strictly lower than the rank that brings
/// `total` to exactly 21. Zero for an empty deck or an unreachable 21.
pub fn safe_draw_fraction(total: u8, deck: &Deck) -> f64 {
    if deck.is_empty() {
        return 0.0;
    }
    match 21u8.checked_sub(total).and_then(required_rank) {
        Some(rank) => deck.count_lower(rank) as f64 / deck.len() as f64,
        None => 0.0,
    }
}

/// Finds the lowest rank whose blackjack value is exactly `value`.
pub fn required_rank(value: u8) -> Option<Rank> {
    (0..NUMBER_OF_RANKS as Rank).find(|&rank| RANK_TO_BLACKJACK_VALUE[rank as usize] == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(values: &[u32]) -> FeasibleTotals {
        FeasibleTotals::from_totals(values.iter().copied())
    }

    fn low_deck() -> Deck {
        // Nothing but Aces and 2s.
        Deck::from_ranks([0, 1].repeat(20)).unwrap()
    }

    fn high_deck() -> Deck {
        Deck::from_ranks([9, 10, 11, 12].repeat(10)).unwrap()
    }

    #[test]
    fn dealer_stands_on_seventeen_regardless_of_certainty() {
        for certainty in [0.0, 0.5, 1.0] {
            assert!(!should_draw(&totals(&[17]), &low_deck(), Actor::Dealer, certainty));
            assert!(!should_draw(&totals(&[7, 17]), &low_deck(), Actor::Dealer, certainty));
            assert!(should_draw(&totals(&[16]), &high_deck(), Actor::Dealer, certainty));
            assert!(should_draw(&totals(&[6, 16]), &high_deck(), Actor::Dealer, certainty));
        }
    }

    #[test]
    fn player_below_eleven_always_hits() {
        for certainty in [0.0, 0.5, 1.0] {
            assert!(should_draw(&totals(&[9]), &high_deck(), Actor::Player, certainty));
            assert!(should_draw(&totals(&[9]), &low_deck(), Actor::Player, certainty));
            assert!(should_draw(&totals(&[7, 17]), &high_deck(), Actor::Player, certainty));
        }
    }

    #[test]
    fn player_above_seventeen_stands() {
        assert!(!should_draw(&totals(&[18]), &low_deck(), Actor::Player, 0.0));
        assert!(!should_draw(&totals(&[8, 18]), &low_deck(), Actor::Player, 0.0));
    }

    #[test]
    fn player_in_between_follows_the_threshold() {
        // Hard 15 needs a 6 (rank 5), every card in the low deck is below it.
        assert_eq!(safe_draw_fraction(15, &low_deck()), 1.0);
        assert!(should_draw(&totals(&[15]), &low_deck(), Actor::Player, 0.99));
        assert!(!should_draw(&totals(&[15]), &low_deck(), Actor::Player, 1.0));
        assert_eq!(safe_draw_fraction(15, &high_deck()), 0.0);
        assert!(!should_draw(&totals(&[15]), &high_deck(), Actor::Player, 0.0));

        let half = Deck::from_ranks(vec![0, 1, 9, 9]).unwrap();
        assert_eq!(safe_draw_fraction(12, &half), 0.5);
        assert!(should_draw(&totals(&[12]), &half, Actor::Player, 0.49));
        assert!(!should_draw(&totals(&[12]), &half, Actor::Player, 0.5));
    }

    #[test]
    fn fraction_counts_cards_below_the_required_rank() {
        let deck = Deck::from_ranks(vec![0, 2, 4, 6, 8, 9]).unwrap();
        // 11 needs a 10 (rank 9): five of six cards are below.
        assert!((safe_draw_fraction(11, &deck) - 5.0 / 6.0).abs() < 1e-12);
        // 17 needs a 4 (rank 3): Ace and 3 are below.
        assert!((safe_draw_fraction(17, &deck) - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn empty_deck_or_bust_never_draws() {
        let empty = Deck::from_ranks(vec![]).unwrap();
        assert!(!should_draw(&totals(&[14]), &empty, Actor::Player, 0.0));
        assert!(!should_draw(&FeasibleTotals::EMPTY, &low_deck(), Actor::Player, 0.0));
        assert!(!should_draw(&FeasibleTotals::EMPTY, &low_deck(), Actor::Dealer, 0.0));
    }

    #[test]
    fn required_rank_is_the_first_with_that_value() {
        assert_eq!(required_rank(1), Some(0));
        assert_eq!(required_rank(4), Some(3));
        assert_eq!(required_rank(10), Some(9));
        assert_eq!(required_rank(11), None);
    }
}
