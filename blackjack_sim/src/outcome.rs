use crate::simulation::hand::BLACKJACK;
use crate::{HandValue, Rank, Rule, SeatHand};

pub const WIN: f64 = 1.0;
pub const PUSH: f64 = 0.0;
pub const LOSS: f64 = -1.0;

/// Payout multiplier of one hand before its stake is applied.
///
/// A two-card 21 earns `rule.payout_blackjack` unless the dealer's hand
/// suppresses it under `rule.bonus_suppression`. Otherwise the best totals are
/// compared. A bust hand always loses, also when the dealer busts too.
pub fn base_payout(
    cards: &[Rank],
    value: &HandValue,
    dealer_cards: &[Rank],
    dealer_value: &HandValue,
    rule: &Rule,
) -> f64 {
    let blackjack = cards.len() == 2 && value.contains(BLACKJACK);
    if blackjack && !rule.bonus_suppression.suppresses(dealer_cards, dealer_value) {
        return rule.payout_blackjack;
    }

    match (value.best(), dealer_value.best()) {
        (None, _) => LOSS,
        (Some(_), None) => WIN,
        (Some(total), Some(dealer_total)) => {
            if total > dealer_total {
                WIN
            } else if total == dealer_total {
                PUSH
            } else {
                LOSS
            }
        }
    }
}

/// Scores every hand of the round and adds the staked payouts onto their
/// owners. Seats without hands (all of their cards went to split hands that
/// are listed separately) only collect what those hands earn.
pub fn settle(
    number_of_players: usize,
    hands: &[SeatHand],
    dealer_cards: &[Rank],
    dealer_value: &HandValue,
    rule: &Rule,
) -> Vec<f64> {
    let mut payouts = vec![0.0; number_of_players];
    for hand in hands {
        let payout = base_payout(hand.cards(), &hand.value, dealer_cards, dealer_value, rule);
        payouts[hand.owner] += payout * hand.stake as f64;
    }
    payouts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BonusSuppression, Decision, Hand};

    fn seat(owner: usize, cards: &[Rank], stake: u8, opening: Decision) -> SeatHand {
        let hand = Hand::from_cards(cards.to_vec());
        SeatHand::new(owner, hand, stake, opening)
    }

    fn payout(cards: &[Rank], dealer_cards: &[Rank], rule: &Rule) -> f64 {
        base_payout(
            cards,
            &HandValue::of(cards),
            dealer_cards,
            &HandValue::of(dealer_cards),
            rule,
        )
    }

    #[test]
    fn blackjack_pays_one_and_a_half() {
        let rule = Rule::default();
        // Ace + King against a dealer 10 + 8.
        assert_eq!(payout(&[0, 12], &[9, 7], &rule), 1.5);
        // Dealer bust does not change the bonus.
        assert_eq!(payout(&[0, 12], &[9, 5, 9], &rule), 1.5);
    }

    #[test]
    fn three_card_twenty_one_is_a_plain_win() {
        let rule = Rule::default();
        assert_eq!(payout(&[6, 6, 6], &[9, 7], &rule), WIN);
    }

    #[test]
    fn dealer_twenty_one_suppresses_bonus_by_default() {
        let rule = Rule::default();
        assert_eq!(rule.bonus_suppression, BonusSuppression::DealerTwentyOne);
        // Dealer natural: both count 21, a push.
        assert_eq!(payout(&[0, 12], &[0, 9], &rule), PUSH);
        // Dealer reaches 21 with three cards, which also takes the bonus away.
        assert_eq!(payout(&[0, 12], &[9, 5, 4], &rule), PUSH);
    }

    #[test]
    fn dealer_natural_rule_only_suppresses_two_card_twenty_one() {
        let rule = Rule {
            bonus_suppression: BonusSuppression::DealerNatural,
            ..Default::default()
        };
        assert_eq!(payout(&[0, 12], &[0, 9], &rule), PUSH);
        assert_eq!(payout(&[0, 12], &[9, 5, 4], &rule), 1.5);
    }

    #[test]
    fn comparisons() {
        let rule = Rule::default();
        assert_eq!(payout(&[9, 8], &[9, 7], &rule), WIN);
        assert_eq!(payout(&[9, 7], &[9, 7], &rule), PUSH);
        assert_eq!(payout(&[9, 6], &[9, 7], &rule), LOSS);
        // Soft totals compare by their best total: Ace + 7 is 18.
        assert_eq!(payout(&[0, 6], &[9, 6], &rule), WIN);
    }

    #[test]
    fn mutual_bust_is_a_loss() {
        let rule = Rule::default();
        assert_eq!(
            base_payout(&[9, 5, 9], &HandValue::Bust, &[9, 4, 9], &HandValue::Bust, &rule),
            LOSS
        );
        assert_eq!(payout(&[9, 5, 9], &[9, 7], &rule), LOSS);
        assert_eq!(payout(&[9, 5], &[9, 4, 9], &rule), WIN);
    }

    #[test]
    fn settle_applies_stakes_and_adds_split_hands_to_owner() {
        let rule = Rule::default();
        let dealer_cards = [9, 7];
        let dealer_value = HandValue::of(&dealer_cards);
        let hands = vec![
            // Doubled 20 wins twice.
            seat(0, &[5, 3, 9], 2, Decision::Double),
            // Seat 1 split eights: one wins, one loses.
            seat(1, &[7, 9, 0], 1, Decision::Split),
            seat(1, &[7, 1, 2], 1, Decision::Split),
            // Seat 2 loses a doubled 12.
            seat(2, &[5, 3, 1], 2, Decision::Double),
        ];
        let payouts = settle(3, &hands, &dealer_cards, &dealer_value, &rule);
        assert_eq!(payouts, vec![2.0, 0.0, -2.0]);
    }
}
