use anyhow::Context;
use blackjack_sim::Rule;
use blackjack_sim_drivers::report::{
    certainty_sweep, payout_by_dealer, sweep_certainties, write_report, CertaintyPoint, Report,
};
use blackjack_sim_drivers::{
    simulate, BatchResult, ConfigBlackjackSimulator, DriverError, Interrupt,
};

pub fn run(
    rule: &Rule,
    settings: &ConfigBlackjackSimulator,
    sweep: bool,
    output: Option<&str>,
    interrupt: &Interrupt,
) -> anyhow::Result<()> {
    let result = match simulate(rule, settings, interrupt) {
        Ok(result) => result,
        Err(DriverError::Interrupted { partial }) => {
            print_summary(rule, &partial);
            save_report(output, rule, &partial, Vec::new())?;
            return Err(DriverError::Interrupted { partial }.into());
        }
        Err(err) => return Err(err.into()),
    };
    print_summary(rule, &result);

    if !sweep {
        return save_report(output, rule, &result, Vec::new());
    }
    match certainty_sweep(rule, settings, &sweep_certainties(), interrupt) {
        Ok(points) => {
            print_sweep(&points);
            save_report(output, rule, &result, points)
        }
        Err(DriverError::SweepInterrupted { points, partial }) => {
            print_sweep(&points);
            save_report(output, rule, &result, points.clone())?;
            Err(DriverError::SweepInterrupted { points, partial }.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn save_report(
    output: Option<&str>,
    rule: &Rule,
    result: &BatchResult,
    points: Vec<CertaintyPoint>,
) -> anyhow::Result<()> {
    if let Some(path) = output {
        let report = Report::new(rule, result, points);
        write_report(path, &report).with_context(|| format!("writing report to {}", path))?;
        log::info!("report written to {}", path);
    }
    Ok(())
}

fn print_summary(rule: &Rule, result: &BatchResult) {
    println!(
        "Games: {}. Shoe replacements: {}. Split: {}. Certainty: {:.2}.",
        result.games.len(),
        result.shoe_replacements,
        rule.use_split,
        rule.certainty
    );
    for (seat, (total, mean)) in result
        .total_payout_per_player()
        .iter()
        .zip(result.mean_payout_per_player())
        .enumerate()
    {
        println!("Player {}: total {:+.1}, mean {:+.4}", seat, total, mean);
    }
    println!("----------------------------------------------------");

    print!("{:>10}{:>8}", "Dealer", "Games");
    for seat in 0..result.number_of_players {
        print!("{:>10}", format!("P{}", seat));
    }
    println!();
    for row in payout_by_dealer(result) {
        print!("{:>10}{:>8}", row.dealer, row.games);
        for payout in &row.payouts {
            print!("{:>10.1}", payout);
        }
        println!();
    }
    println!("----------------------------------------------------");
}

fn print_sweep(points: &[CertaintyPoint]) {
    for point in points {
        print!("Certainty {:.2}:", point.certainty);
        for mean in &point.mean_payouts {
            print!(" {:+.4}", mean);
        }
        println!();
    }
}
