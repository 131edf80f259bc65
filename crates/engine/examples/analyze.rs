// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// ```bash
// $ cargo r --release --example analyze -- --hole "AH KH" --board "QH 7H 2C"
// ```
use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::prelude::*;

use railbird_engine::*;

#[derive(Parser)]
#[command(about = "Analyze a Texas Hold'em spot")]
struct Cli {
    /// Hole cards, "AH KH".
    #[arg(long)]
    hole: String,
    /// Board cards, "QH 7H 2C".
    #[arg(long, default_value = "")]
    board: String,
    /// Monte Carlo iterations.
    #[arg(long, default_value_t = 100_000)]
    iterations: usize,
    /// Number of opponents.
    #[arg(long, default_value_t = 1)]
    opponents: usize,
    /// Rng seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Enumerate every showdown when the spot is small enough.
    #[arg(long)]
    exhaustive: bool,
}

fn parse_cards(s: &str) -> Result<Vec<Card>> {
    s.split_whitespace()
        .map(|c| c.parse::<Card>().with_context(|| format!("bad card {c:?}")))
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let hole = parse_cards(&cli.hole)?;
    if hole.len() != 2 {
        bail!("expected two hole cards, got {}", hole.len());
    }
    let hole = HoleCards::new(hole[0], hole[1])?;
    let board = Board::new(&parse_cards(&cli.board)?)?;

    let config = EquityConfig {
        iterations: cli.iterations,
        opponent_count: cli.opponents,
        use_exhaustive: cli.exhaustive,
        opponent_range: None,
    };

    let mut rng = SmallRng::seed_from_u64(cli.seed);
    let result = analyze(&hole, &board, &config, &mut rng)?;

    println!("Hole:  {hole} ({})", analyze_starting_hand(&hole).strength);
    if !board.is_empty() {
        println!("Board: {board} ({})", board.street());

        let mut cards = hole.cards().to_vec();
        cards.extend_from_slice(board.cards());
        println!("Hand:  {}", evaluate(&cards)?);
    }

    if !result.draws.is_empty() {
        let draws = result
            .draws
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("Draws: {draws}");
    }

    if result.outs.total_outs > 0 {
        println!(
            "Outs:  {} of {} unseen cards",
            result.outs.total_outs, result.outs.remaining
        );
        for outs in &result.outs.by_target {
            let cards = outs
                .cards
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            println!("       {} ({}): {cards}", outs.description, outs.count());
        }

        let odds = &result.odds_to_improve;
        println!(
            "Improving: {:.1}% ({} against)",
            odds.percentage, odds.ratio
        );
        if let Some(odds) = &result.odds_two_cards {
            println!(
                "By the river: {:.1}% ({} against)",
                odds.percentage, odds.ratio
            );
        }
    }

    let equity = &result.equity;
    println!(
        "Equity vs {} opponent(s): win {:.1}% tie {:.1}% lose {:.1}%",
        cli.opponents, equity.win, equity.tie, equity.lose
    );
    match equity.confidence {
        Some(ci) => println!(
            "       {} sampled showdowns, 95% CI [{:.1}%, {:.1}%]",
            equity.sample_size, ci.low, ci.high
        ),
        None => println!("       {} enumerated showdowns", equity.sample_size),
    }

    Ok(())
}
