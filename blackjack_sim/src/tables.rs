//! Fixed split and double-down charts. Columns are the dealer's up-card rank.
//! A key outside a chart means "not eligible".

use crate::{feasible_totals, Rank, ACE, NUMBER_OF_RANKS};

const T: bool = true;
const F: bool = false;

/// Rows are the rank of the pair.
static SPLIT_CHART: [[bool; NUMBER_OF_RANKS]; NUMBER_OF_RANKS] = [
    //A  2  3  4  5  6  7  8  9  T  J  Q  K
    [T, F, F, F, F, F, F, T, T, T, T, T, T], // Double Ace
    [F, F, F, T, T, T, T, F, F, F, F, F, F], // Double 2
    [F, F, F, T, T, T, T, F, F, F, F, F, F],
    [F, F, F, F, F, F, F, F, F, F, F, F, F],
    [F, F, F, F, F, F, F, F, F, F, F, F, F],
    [F, F, T, T, T, T, F, F, F, F, F, F, F],
    [T, T, T, T, T, T, T, F, F, F, F, F, F],
    [T, T, T, T, T, T, T, T, T, T, T, T, T],
    [F, T, T, T, T, T, F, T, T, F, F, F, F], // Double 9
    [F, F, F, F, F, F, F, F, F, F, F, F, F], // Double 10
    [F, F, F, F, F, F, F, F, F, F, F, F, F],
    [F, F, F, F, F, F, F, F, F, F, F, F, F],
    [F, F, F, F, F, F, F, F, F, F, F, F, F], // Double K
];

const SOFT_DOUBLE_FIRST_TOTAL: u8 = 14;
/// Rows are the best total of a hand holding an Ace, from soft 14.
static SOFT_DOUBLE_CHART: [[bool; NUMBER_OF_RANKS]; 5] = [
    //A  2  3  4  5  6  7  8  9  T  J  Q  K
    [F, F, F, F, F, T, T, F, F, F, F, F, F], // 14
    [F, F, F, F, T, T, T, F, F, F, F, F, F],
    [F, F, F, F, T, T, T, F, F, F, F, F, F],
    [F, F, F, T, T, T, T, F, F, F, F, F, F],
    [F, F, F, T, T, T, T, F, F, F, F, F, F], // 18
];

const HARD_DOUBLE_FIRST_TOTAL: u8 = 9;
/// Rows are the total of a hand without Aces, from hard 9.
static HARD_DOUBLE_CHART: [[bool; NUMBER_OF_RANKS]; 3] = [
    //A  2  3  4  5  6  7  8  9  T  J  Q  K
    [F, F, F, T, T, T, T, F, F, F, F, F, F], // 9
    [F, F, T, T, T, T, T, T, T, T, F, F, F],
    [F, F, T, T, T, T, T, T, T, T, T, F, F], // 11
];

fn lookup<const ROWS: usize>(
    chart: &[[bool; NUMBER_OF_RANKS]; ROWS],
    row: usize,
    dealer_up_card: Rank,
) -> bool {
    chart
        .get(row)
        .and_then(|columns| columns.get(dealer_up_card as usize))
        .copied()
        .unwrap_or(false)
}

/// Checks the split chart for a pair of `pair_rank` against the dealer's up card.
pub fn can_split(pair_rank: Rank, dealer_up_card: Rank) -> bool {
    lookup(&SPLIT_CHART, pair_rank as usize, dealer_up_card)
}

pub fn can_double_soft(total: u8, dealer_up_card: Rank) -> bool {
    match total.checked_sub(SOFT_DOUBLE_FIRST_TOTAL) {
        Some(row) => lookup(&SOFT_DOUBLE_CHART, row as usize, dealer_up_card),
        None => false,
    }
}

pub fn can_double_hard(total: u8, dealer_up_card: Rank) -> bool {
    match total.checked_sub(HARD_DOUBLE_FIRST_TOTAL) {
        Some(row) => lookup(&HARD_DOUBLE_CHART, row as usize, dealer_up_card),
        None => false,
    }
}

/// A hand with an Ace is looked up by its best total in the soft chart, any
/// other hand by its single total in the hard chart.
pub fn should_double(cards: &[Rank], dealer_up_card: Rank) -> bool {
    let totals = feasible_totals(cards);
    if cards.contains(&ACE) {
        totals
            .max()
            .map_or(false, |total| can_double_soft(total, dealer_up_card))
    } else {
        totals
            .min()
            .map_or(false, |total| can_double_hard(total, dealer_up_card))
    }
}
