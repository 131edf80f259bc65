// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Combined probability analysis for a hand in play.
//!
//! Bundles the outs, the equity estimate, the named draws, and the odds of
//! improving into one result a trainer can present for a single spot.
use ahash::AHashSet;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use railbird_cards::{Board, Card, HoleCards, Street, Suit, choose};
use railbird_eval::{HandRank, HandValue};

use crate::{
    EngineError, Equity, EquityConfig, Odds, OutsBreakdown, compute_equity, compute_outs,
};

/// The named drawing hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawType {
    /// Four cards to a flush.
    FlushDraw,
    /// Four consecutive cards open on both ends.
    OpenEndedStraight,
    /// A straight missing one inside card.
    Gutshot,
    /// Two inside straight draws at once.
    DoubleGutshot,
    /// Two hole cards above every board card.
    Overcards,
    /// Three cards to a flush on the flop.
    BackdoorFlush,
    /// Three cards to a straight on the flop.
    BackdoorStraight,
    /// A pocket pair drawing to a set.
    SetDraw,
    /// A paired hole card drawing to two pair.
    TwoPairDraw,
    /// A flush draw combined with a straight draw.
    ComboDraw,
}

impl DrawType {
    /// The textbook number of outs for this draw, the reference players
    /// memorize rather than the exact count for a specific board.
    pub fn standard_outs(self) -> u8 {
        match self {
            DrawType::FlushDraw => 9,
            DrawType::OpenEndedStraight => 8,
            DrawType::Gutshot => 4,
            DrawType::DoubleGutshot => 8,
            DrawType::Overcards => 6,
            DrawType::BackdoorFlush => 10,
            DrawType::BackdoorStraight => 8,
            DrawType::SetDraw => 2,
            DrawType::TwoPairDraw => 4,
            DrawType::ComboDraw => 15,
        }
    }

    /// The draw display name.
    pub fn name(self) -> &'static str {
        match self {
            DrawType::FlushDraw => "Flush draw",
            DrawType::OpenEndedStraight => "Open-ended straight draw",
            DrawType::Gutshot => "Gutshot",
            DrawType::DoubleGutshot => "Double gutshot",
            DrawType::Overcards => "Overcards",
            DrawType::BackdoorFlush => "Backdoor flush draw",
            DrawType::BackdoorStraight => "Backdoor straight draw",
            DrawType::SetDraw => "Set draw",
            DrawType::TwoPairDraw => "Two pair draw",
            DrawType::ComboDraw => "Combo draw",
        }
    }
}

impl fmt::Display for DrawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The full probability picture for one spot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityResult {
    /// The outs breakdown.
    pub outs: OutsBreakdown,
    /// The equity estimate against the configured opponents.
    pub equity: Equity,
    /// The draws the hand is on.
    pub draws: Vec<DrawType>,
    /// Odds of improving with the next card.
    pub odds_to_improve: Odds,
    /// Odds of improving by the river when two cards are to come.
    pub odds_two_cards: Option<Odds>,
}

/// Runs the outs, draws, equity, and odds analysis for one spot.
pub fn analyze<R: Rng + ?Sized>(
    hole: &HoleCards,
    board: &Board,
    config: &EquityConfig,
    rng: &mut R,
) -> Result<ProbabilityResult, EngineError> {
    let outs = compute_outs(hole, board, &[])?;
    let equity = compute_equity(hole, board, config, rng)?;
    let draws = detect_draws(hole, board, &outs);

    let one_card = if outs.remaining > 0 {
        outs.total_outs as f64 / outs.remaining as f64 * 100.0
    } else {
        0.0
    };
    let odds_to_improve = Odds::from_percentage(one_card);

    // With two cards to come the chance of improving is the complement of
    // missing on both the turn and the river.
    let odds_two_cards = (board.to_come() == 2).then(|| {
        let r = outs.remaining;
        let o = outs.total_outs;
        let miss = choose(r - o, 2) as f64 / choose(r, 2) as f64;
        Odds::from_percentage((1.0 - miss) * 100.0)
    });

    Ok(ProbabilityResult {
        outs,
        equity,
        draws,
        odds_to_improve,
        odds_two_cards,
    })
}

/// Names the draws the hand is on given its outs.
///
/// The detection is a teaching heuristic, it names the common draw shapes
/// rather than proving the exact runner combinatorics.
pub fn detect_draws(
    hole: &HoleCards,
    board: &Board,
    breakdown: &OutsBreakdown,
) -> Vec<DrawType> {
    if board.is_empty() || board.to_come() == 0 {
        return Vec::new();
    }

    let mut cards = hole.cards().to_vec();
    cards.extend_from_slice(board.cards());
    let current = HandValue::eval(&cards).rank();

    let mut draws = Vec::new();

    // Flush draws, four to a suit now or three on the flop, with at least
    // one hole card of the suit.
    let mut flush_draw = false;
    let mut backdoor_flush = false;
    for suit in Suit::suits() {
        let count = cards.iter().filter(|c| c.suit() == suit).count();
        let in_hole = hole.cards().iter().any(|c| c.suit() == suit);
        if !in_hole || current >= HandRank::Flush {
            continue;
        }

        if count == 4 {
            flush_draw = true;
        } else if count == 3 && board.street() == Street::Flop {
            backdoor_flush = true;
        }
    }

    // The ranks that complete a straight, read off the outs groups.
    let straight_ranks = breakdown
        .by_target
        .iter()
        .filter(|o| {
            matches!(
                o.target,
                HandRank::Straight | HandRank::StraightFlush | HandRank::RoyalFlush
            )
        })
        .flat_map(|o| o.cards.iter().map(|c| c.rank()))
        .collect::<AHashSet<_>>();

    let mut straight_draw = false;
    if flush_draw {
        draws.push(DrawType::FlushDraw);
    }
    if !straight_ranks.is_empty() {
        straight_draw = true;
        let min = straight_ranks.iter().map(|r| r.value()).min().unwrap_or(0);
        let max = straight_ranks.iter().map(|r| r.value()).max().unwrap_or(0);
        if straight_ranks.len() == 2 && max - min == 5 {
            // Both ends of a four card run.
            draws.push(DrawType::OpenEndedStraight);
        } else if straight_ranks.len() >= 2 {
            draws.push(DrawType::DoubleGutshot);
        } else {
            draws.push(DrawType::Gutshot);
        }
    }

    if current == HandRank::HighCard
        && board
            .high_rank()
            .is_some_and(|high| hole.low().rank() > high)
    {
        draws.push(DrawType::Overcards);
    }

    if backdoor_flush {
        draws.push(DrawType::BackdoorFlush);
    }

    if board.street() == Street::Flop
        && !straight_draw
        && current < HandRank::Straight
        && has_backdoor_straight(hole, &cards)
    {
        draws.push(DrawType::BackdoorStraight);
    }

    if hole.is_pair()
        && current < HandRank::ThreeOfAKind
        && breakdown
            .by_target
            .iter()
            .any(|o| o.cards.iter().any(|c| c.rank() == hole.high().rank()))
    {
        draws.push(DrawType::SetDraw);
    }

    if current == HandRank::OnePair
        && !hole.is_pair()
        && breakdown
            .by_target
            .iter()
            .filter(|o| o.target == HandRank::TwoPair)
            .any(|o| {
                o.cards
                    .iter()
                    .any(|c| c.rank() == hole.high().rank() || c.rank() == hole.low().rank())
            })
    {
        draws.push(DrawType::TwoPairDraw);
    }

    if flush_draw && straight_draw {
        draws.push(DrawType::ComboDraw);
    }

    draws
}

/// Checks for three distinct ranks, at least one from the hole cards,
/// inside a five rank straight window.
fn has_backdoor_straight(hole: &HoleCards, cards: &[Card]) -> bool {
    let mut values = cards
        .iter()
        .map(|c| c.rank().value() as i32)
        .collect::<AHashSet<_>>();
    let mut hole_values = hole
        .cards()
        .iter()
        .map(|c| c.rank().value() as i32)
        .collect::<AHashSet<_>>();

    // The ace plays low too.
    if values.contains(&14) {
        values.insert(1);
    }
    if hole_values.contains(&14) {
        hole_values.insert(1);
    }

    for lo in 1..=10 {
        let window = lo..lo + 5;
        let in_window = values.iter().filter(|v| window.contains(*v)).count();
        let hole_in = hole_values.iter().any(|v| window.contains(v));
        if in_window >= 3 && hole_in {
            return true;
        }
    }

    false
}
