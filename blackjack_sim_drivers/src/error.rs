use crate::report::CertaintyPoint;
use crate::BatchResult;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid rule: {0}")]
    Rule(#[from] serde::de::value::Error),
    #[error("invalid setting: {0}")]
    Setting(String),
    #[error(transparent)]
    Round(#[from] blackjack_sim::RoundError),
    #[error("cannot build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("interrupted after {} games", .partial.games.len())]
    Interrupted { partial: BatchResult },
    #[error("sweep interrupted after {} certainties", .points.len())]
    SweepInterrupted {
        points: Vec<CertaintyPoint>,
        partial: BatchResult,
    },
}
