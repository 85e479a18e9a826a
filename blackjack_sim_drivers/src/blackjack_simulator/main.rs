mod simulation;

use anyhow::{bail, Context};
use blackjack_sim_drivers::{parse_config_from_file, validate_rule, Config, Interrupt};
use clap::Parser;
use std::io::BufRead;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "~/.blackjack_sim.yml";
const DEFAULT_CONFIG_FILE_NAME: &str = ".blackjack_sim.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Overrides the certainty of the config file
    #[arg(long)]
    certainty: Option<f64>,

    /// Also runs the batch for every certainty from 0.00 to 1.00
    #[arg(long)]
    sweep: bool,

    /// Writes a YAML report to this path
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CommandLineArgs::parse();
    let config = load_config(&args.config)?;
    let mut rule: blackjack_sim::Rule = config.rule.try_into()?;
    if let Some(certainty) = args.certainty {
        rule.certainty = certainty;
    }
    validate_rule(&rule)?;

    let interrupt = Interrupt::new();
    watch_stdin(interrupt.clone());

    simulation::run(
        &rule,
        &config.blackjack_simulator,
        args.sweep,
        args.output.as_deref(),
        &interrupt,
    )
}

fn load_config(config: &str) -> anyhow::Result<Config> {
    let path = if config == DEFAULT_CONFIG_PATH {
        let home_dir = home::home_dir().context("cannot find home directory")?;
        let config_file_path = home_dir.join(DEFAULT_CONFIG_FILE_NAME);
        if !config_file_path.exists() {
            log::warn!(
                "{} does not exist, using the default config",
                config_file_path.display()
            );
            return Ok(Config::default());
        }
        config_file_path
    } else {
        Path::new(config).to_path_buf()
    };
    if path.is_dir() {
        bail!("{} should be a file rather than a directory", path.display());
    }

    let path = path
        .to_str()
        .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
    let config = parse_config_from_file(path).with_context(|| format!("loading {}", path))?;
    log::debug!("{:#?}", config);
    Ok(config)
}

/// Type "Q" + Enter to stop after the rounds in progress.
fn watch_stdin(interrupt: Interrupt) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) if line.trim().eq_ignore_ascii_case("q") => {
                    log::warn!("interrupt requested, finishing the rounds in progress...");
                    interrupt.trigger();
                    break;
                }
                Ok(_) => continue,
                Err(_) => break,
            }
        }
    });
}
