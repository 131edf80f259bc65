// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Preflop starting hand classification.
use serde::{Deserialize, Serialize};
use std::fmt;

use railbird_cards::{HoleCards, Rank};

/// A coarse preflop strength class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandStrength {
    /// Fold to most action.
    Weak,
    /// Playable in late position or cheap pots.
    Marginal,
    /// Worth opening from most positions.
    Playable,
    /// Raise and call raises.
    Strong,
    /// Raise and reraise.
    Premium,
}

impl fmt::Display for HandStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strength = match self {
            HandStrength::Weak => "weak",
            HandStrength::Marginal => "marginal",
            HandStrength::Playable => "playable",
            HandStrength::Strong => "strong",
            HandStrength::Premium => "premium",
        };

        write!(f, "{strength}")
    }
}

/// The shape categories a starting hand can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    /// A pocket pair.
    Pair,
    /// Two cards of one suit.
    Suited,
    /// Two cards of different suits.
    Offsuit,
    /// Suited and consecutive, "87s".
    SuitedConnector,
    /// Suited with one rank gap, "97s".
    SuitedGapper,
    /// Both cards ten or higher.
    Broadway,
    /// A suited ace, "A5s".
    SuitedAce,
}

/// The preflop profile of a starting hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartingHandAnalysis {
    /// Canonical notation, "AKs", "QQ", "87o".
    pub notation: String,
    /// Whether the two cards share a suit.
    pub suited: bool,
    /// Whether the hand is a pocket pair.
    pub pair: bool,
    /// Whether both cards are ten or higher.
    pub broadway: bool,
    /// Whether the two ranks are consecutive.
    pub connector: bool,
    /// Ranks between the two cards.
    pub gap: u8,
    /// The shape categories the hand belongs to.
    pub categories: Vec<HandCategory>,
    /// The coarse strength class.
    pub strength: HandStrength,
    /// The Chen formula score.
    pub chen_score: i32,
}

/// Classifies a starting hand with the Chen formula.
pub fn analyze_starting_hand(hole: &HoleCards) -> StartingHandAnalysis {
    let suited = hole.is_suited();
    let pair = hole.is_pair();
    let gap = hole.gap();
    let connector = !pair && gap == 0;
    let broadway = hole.low().rank() >= Rank::Ten;

    let mut categories = Vec::new();
    if pair {
        categories.push(HandCategory::Pair);
    } else if suited {
        categories.push(HandCategory::Suited);
    } else {
        categories.push(HandCategory::Offsuit);
    }
    if suited && connector {
        categories.push(HandCategory::SuitedConnector);
    }
    if suited && gap == 1 {
        categories.push(HandCategory::SuitedGapper);
    }
    if broadway {
        categories.push(HandCategory::Broadway);
    }
    if suited && !pair && hole.high().rank() == Rank::Ace {
        categories.push(HandCategory::SuitedAce);
    }

    let chen_score = chen_score(hole);
    let strength = match chen_score {
        s if s >= 10 => HandStrength::Premium,
        s if s >= 8 => HandStrength::Strong,
        s if s >= 6 => HandStrength::Playable,
        s if s >= 5 => HandStrength::Marginal,
        _ => HandStrength::Weak,
    };

    StartingHandAnalysis {
        notation: hole.notation(),
        suited,
        pair,
        broadway,
        connector,
        gap,
        categories,
        strength,
        chen_score,
    }
}

/// The Chen formula score for a starting hand.
///
/// High card points are 10 for an ace, 8 for a king, 7 for a queen, 6 for
/// a jack, half the rank value otherwise. Pairs double the points with a
/// floor of 5, suitedness adds 2, gaps subtract, and close connectors
/// below the queen get a straight making bonus. The result rounds up.
pub fn chen_score(hole: &HoleCards) -> i32 {
    let high = hole.high().rank();

    let mut score = match high {
        Rank::Ace => 10.0,
        Rank::King => 8.0,
        Rank::Queen => 7.0,
        Rank::Jack => 6.0,
        _ => high.value() as f64 / 2.0,
    };

    if hole.is_pair() {
        score = (score * 2.0).max(5.0);
        return score.ceil() as i32;
    }

    if hole.is_suited() {
        score += 2.0;
    }

    score += match hole.gap() {
        0 => 0.0,
        1 => -1.0,
        2 => -2.0,
        3 => -4.0,
        _ => -5.0,
    };

    // Close cards below the queen can make a straight on both ends.
    if hole.gap() <= 1 && high < Rank::Queen {
        score += 1.0;
    }

    score.ceil() as i32
}
