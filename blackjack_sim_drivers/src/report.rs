//! Aggregates behind the payout charts, written out as YAML.

use crate::{simulate, BatchResult, ConfigBlackjackSimulator, DriverError, Interrupt};
use blackjack_sim::{DealerFinish, Rule};
use serde::Serialize;
use std::fs;
use strum::IntoEnumIterator;

const SWEEP_STEPS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealerRow {
    pub dealer: String,
    pub games: usize,
    /// Summed payout of every seat over the games the dealer finished this way.
    pub payouts: Vec<f64>,
}

/// Groups the games by where the dealer finished, one row per `DealerFinish`.
pub fn payout_by_dealer(result: &BatchResult) -> Vec<DealerRow> {
    DealerFinish::iter()
        .map(|finish| {
            let mut row = DealerRow {
                dealer: finish.to_string(),
                games: 0,
                payouts: vec![0.0; result.number_of_players],
            };
            for game in result.games.iter().filter(|game| game.dealer_finish() == finish) {
                row.games += 1;
                for (total, payout) in row.payouts.iter_mut().zip(&game.payouts) {
                    *total += payout;
                }
            }
            row
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertaintyPoint {
    pub certainty: f64,
    pub mean_payouts: Vec<f64>,
}

/// 0.00, 0.05, ..., 1.00
pub fn sweep_certainties() -> Vec<f64> {
    (0..=SWEEP_STEPS)
        .map(|step| step as f64 / SWEEP_STEPS as f64)
        .collect()
}

/// Runs a full batch for every certainty, everything else in `rule` unchanged.
///
/// Stops at the first interrupted batch with `DriverError::SweepInterrupted`,
/// which carries the finished points and the rounds of the interrupted one.
pub fn certainty_sweep(
    rule: &Rule,
    settings: &ConfigBlackjackSimulator,
    certainties: &[f64],
    interrupt: &Interrupt,
) -> Result<Vec<CertaintyPoint>, DriverError> {
    sweep_with(rule, certainties, |rule| simulate(rule, settings, interrupt))
}

fn sweep_with<F>(
    rule: &Rule,
    certainties: &[f64],
    mut run_batch: F,
) -> Result<Vec<CertaintyPoint>, DriverError>
where
    F: FnMut(&Rule) -> Result<BatchResult, DriverError>,
{
    let mut points = Vec::with_capacity(certainties.len());
    for &certainty in certainties {
        let rule = Rule { certainty, ..*rule };
        let result = match run_batch(&rule) {
            Ok(result) => result,
            Err(DriverError::Interrupted { partial }) => {
                log::warn!("sweep interrupted after {} points", points.len());
                return Err(DriverError::SweepInterrupted { points, partial });
            }
            Err(err) => return Err(err),
        };
        let mean_payouts = result.mean_payout_per_player();
        log::info!("certainty {:.2}: {:?}", certainty, mean_payouts);
        points.push(CertaintyPoint {
            certainty,
            mean_payouts,
        });
    }
    Ok(points)
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub use_split: bool,
    pub certainty: f64,
    pub games: usize,
    pub shoe_replacements: u64,
    pub mean_payouts: Vec<f64>,
    pub by_dealer: Vec<DealerRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sweep: Vec<CertaintyPoint>,
}

impl Report {
    pub fn new(rule: &Rule, result: &BatchResult, sweep: Vec<CertaintyPoint>) -> Self {
        Report {
            use_split: rule.use_split,
            certainty: rule.certainty,
            games: result.games.len(),
            shoe_replacements: result.shoe_replacements,
            mean_payouts: result.mean_payout_per_player(),
            by_dealer: payout_by_dealer(result),
            sweep,
        }
    }
}

pub fn write_report(path: &str, report: &Report) -> Result<(), DriverError> {
    let content = serde_yaml::to_string(report)?;
    fs::write(path, content)?;
    Ok(())
}
