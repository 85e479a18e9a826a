//! Plays many shoes in parallel and collects what every round paid.

use crate::{validate_rule, ConfigBlackjackSimulator, DriverError};
use blackjack_sim::{play_round, DealerFinish, Deck, HandValue, Rank, RoundOutcome, Rule};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop flag. Workers look at it before every round.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub payouts: Vec<f64>,
    pub dealer: HandValue,
    pub dealer_up_card: Rank,
}

impl GameRecord {
    pub fn dealer_finish(&self) -> DealerFinish {
        DealerFinish::from(&self.dealer)
    }
}

impl From<RoundOutcome> for GameRecord {
    fn from(outcome: RoundOutcome) -> Self {
        let dealer_up_card = outcome.dealer_up_card();
        GameRecord {
            payouts: outcome.payouts,
            dealer: outcome.dealer,
            dealer_up_card,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    pub number_of_players: usize,
    pub games: Vec<GameRecord>,
    pub shoe_replacements: u64,
}

impl BatchResult {
    pub fn total_payout_per_player(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.number_of_players];
        for game in &self.games {
            for (total, payout) in totals.iter_mut().zip(&game.payouts) {
                *total += payout;
            }
        }
        totals
    }

    /// Mean payout of every seat over the games actually played.
    pub fn mean_payout_per_player(&self) -> Vec<f64> {
        let games = self.games.len().max(1) as f64;
        self.total_payout_per_player()
            .into_iter()
            .map(|total| total / games)
            .collect()
    }

    fn merge(number_of_players: usize, shoes: Vec<BatchResult>) -> BatchResult {
        let mut merged = BatchResult {
            number_of_players,
            ..Default::default()
        };
        for shoe in shoes {
            merged.games.extend(shoe.games);
            merged.shoe_replacements += shoe.shoe_replacements;
        }
        merged
    }
}

/// Runs `settings.number_of_shoes()` shoes of `settings.games_per_deck` rounds
/// each on a rayon pool. Fails with `DriverError::Interrupted` carrying every
/// finished round once `interrupt` is triggered.
pub fn simulate(
    rule: &Rule,
    settings: &ConfigBlackjackSimulator,
    interrupt: &Interrupt,
) -> Result<BatchResult, DriverError> {
    settings.validate()?;
    validate_rule(rule)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.number_of_threads)
        .build()?;
    let number_of_shoes = settings.number_of_shoes();
    log::info!(
        "simulating {} shoes of {} games with {} players, certainty {:.2}",
        number_of_shoes,
        settings.games_per_deck,
        settings.number_of_players,
        rule.certainty
    );

    let shoes = pool.install(|| {
        (0..number_of_shoes)
            .into_par_iter()
            .map(|shoe_index| play_shoe(rule, settings, shoe_index, interrupt))
            .collect::<Result<Vec<_>, DriverError>>()
    })?;
    let result = BatchResult::merge(settings.number_of_players, shoes);

    if interrupt.is_triggered() {
        log::warn!("interrupted after {} games", result.games.len());
        return Err(DriverError::Interrupted { partial: result });
    }
    log::info!(
        "finished {} games, {} shoe replacements",
        result.games.len(),
        result.shoe_replacements
    );
    Ok(result)
}

fn play_shoe(
    rule: &Rule,
    settings: &ConfigBlackjackSimulator,
    shoe_index: u64,
    interrupt: &Interrupt,
) -> Result<BatchResult, DriverError> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(shoe_index)),
        None => StdRng::from_entropy(),
    };
    let mut deck = Deck::with_number_of_decks(settings.number_of_decks);
    let mut result = BatchResult {
        number_of_players: settings.number_of_players,
        games: Vec::with_capacity(settings.games_per_deck as usize),
        shoe_replacements: 0,
    };

    for _ in 0..settings.games_per_deck {
        if interrupt.is_triggered() {
            break;
        }
        if deck.needs_replacement(settings.number_of_decks) {
            log::debug!("shoe {} replaced with {} cards left", shoe_index, deck.len());
            deck = Deck::with_number_of_decks(settings.number_of_decks);
            result.shoe_replacements += 1;
        }
        let outcome = play_round(&mut deck, settings.number_of_players, rule, &mut rng)?;
        result.games.push(outcome.into());
    }
    Ok(result)
}
