pub mod batch;
mod error;
pub mod report;

use serde::{Deserialize, Serialize};
use std::fs;

pub use batch::{simulate, BatchResult, GameRecord, Interrupt};
pub use error::DriverError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rule: ConfigRule,
    pub blackjack_simulator: ConfigBlackjackSimulator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRule {
    pub use_split: bool,
    pub certainty: f64,
    pub payout_blackjack: f64,
    pub bonus_suppression: String,
}

impl Default for ConfigRule {
    fn default() -> Self {
        let rule = blackjack_sim::Rule::default();
        ConfigRule {
            use_split: rule.use_split,
            certainty: rule.certainty,
            payout_blackjack: rule.payout_blackjack,
            bonus_suppression: String::from("DealerTwentyOne"),
        }
    }
}

impl TryInto<blackjack_sim::Rule> for ConfigRule {
    type Error = serde::de::value::Error;

    fn try_into(self) -> Result<blackjack_sim::Rule, Self::Error> {
        let rule = blackjack_sim::Rule {
            use_split: self.use_split,
            certainty: self.certainty,
            payout_blackjack: self.payout_blackjack,
            bonus_suppression: self.bonus_suppression.parse()?,
        };

        Ok(rule)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigBlackjackSimulator {
    pub number_of_players: usize,
    pub number_of_decks: u8,
    /// Total number of rounds. Every shoe plays `games_per_deck` of them, so
    /// the remainder of the division is not played.
    pub number_of_games: u64,
    pub games_per_deck: u64,
    /// 0 lets rayon pick the number of worker threads.
    pub number_of_threads: usize,
    /// Seeds shoe `i` with `seed + i`. Without a seed every shoe draws from entropy.
    pub seed: Option<u64>,
}

impl Default for ConfigBlackjackSimulator {
    fn default() -> Self {
        ConfigBlackjackSimulator {
            number_of_players: 4,
            number_of_decks: 8,
            number_of_games: 100,
            games_per_deck: 40,
            number_of_threads: 0,
            seed: None,
        }
    }
}

impl ConfigBlackjackSimulator {
    pub fn number_of_shoes(&self) -> u64 {
        self.number_of_games / self.games_per_deck
    }

    pub fn validate(&self) -> Result<(), DriverError> {
        if self.number_of_players == 0 {
            return Err(DriverError::Setting(String::from(
                "number_of_players must be at least 1",
            )));
        }
        if self.number_of_decks == 0 {
            return Err(DriverError::Setting(String::from(
                "number_of_decks must be at least 1",
            )));
        }
        if self.games_per_deck == 0 {
            return Err(DriverError::Setting(String::from(
                "games_per_deck must be at least 1",
            )));
        }
        Ok(())
    }
}

/// Checks what the round engine takes for granted about a rule.
pub fn validate_rule(rule: &blackjack_sim::Rule) -> Result<(), DriverError> {
    if !(0.0..=1.0).contains(&rule.certainty) {
        return Err(DriverError::Setting(format!(
            "certainty must be in [0, 1], got {}",
            rule.certainty
        )));
    }
    Ok(())
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: &str) -> Result<Config, DriverError> {
    let file_content = fs::read_to_string(filename)?;
    parse_config(&file_content)
}

pub fn parse_config(content: &str) -> Result<Config, DriverError> {
    Ok(serde_yaml::from_str(content)?)
}
