// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Outs computation.
//!
//! An out is an unseen card that upgrades the player's hand to a higher
//! ranking category. Each unseen card is evaluated with the known hole and
//! community cards, improvements are grouped by the ranking they reach.
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use railbird_cards::{Board, Card, CardsError, Deck, HoleCards};
use railbird_eval::{HandRank, HandValue};

use crate::EngineError;

/// The outs to one target ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outs {
    /// The ranking these cards improve the hand to.
    pub target: HandRank,
    /// The cards that reach the target.
    pub cards: Vec<Card>,
    /// A student facing label, "Flush draw".
    pub description: String,
}

impl Outs {
    /// Number of outs to this target.
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

/// All the outs for a hand on a given board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutsBreakdown {
    /// Number of distinct improving cards across all targets.
    pub total_outs: usize,
    /// Outs grouped by target ranking, best target first. Each card appears
    /// in exactly one group, the ranking it improves the hand to.
    pub by_target: Vec<Outs>,
    /// The cards known to be out of play, hole and board cards plus any
    /// exposed card passed by the caller.
    pub dead_cards: Vec<Card>,
    /// Number of unseen cards the outs are drawn from.
    pub remaining: usize,
}

/// Computes the outs for the given hole cards and board.
///
/// `extra_dead` lists cards known to be out of play beyond the hole and
/// board cards, exposed cards or a folded hand the student wants to reason
/// about.
///
/// Preflop there is no made hand to improve, and on the river there are no
/// cards to come, in both cases the breakdown has no outs.
pub fn compute_outs(
    hole: &HoleCards,
    board: &Board,
    extra_dead: &[Card],
) -> Result<OutsBreakdown, EngineError> {
    let mut dead = hole.cards().to_vec();
    dead.extend_from_slice(board.cards());
    dead.extend_from_slice(extra_dead);

    let mut seen = AHashSet::with_capacity(dead.len());
    for &card in &dead {
        if !seen.insert(card) {
            return Err(CardsError::DuplicateCard(card).into());
        }
    }

    let unseen = Deck::new().without(&dead);
    let remaining = unseen.len();

    if board.is_empty() || board.to_come() == 0 {
        return Ok(OutsBreakdown {
            total_outs: 0,
            by_target: Vec::new(),
            dead_cards: dead,
            remaining,
        });
    }

    let mut cards = hole.cards().to_vec();
    cards.extend_from_slice(board.cards());
    let current = HandValue::eval(&cards).rank();

    // Reuse the last slot for the candidate card.
    cards.push(Card::default());
    let last = cards.len() - 1;

    let mut by_rank: AHashMap<HandRank, Vec<Card>> = AHashMap::new();
    for card in unseen {
        cards[last] = card;
        let rank = HandValue::eval(&cards).rank();
        if rank > current {
            by_rank.entry(rank).or_default().push(card);
        }
    }

    // A card lands in the single group of the ranking it reaches, so the
    // total is the sum of the group sizes.
    let total_outs = by_rank.values().map(Vec::len).sum();

    let mut by_target = by_rank
        .into_iter()
        .map(|(target, cards)| Outs {
            description: format!("{target} draw"),
            target,
            cards,
        })
        .collect::<Vec<_>>();
    by_target.sort_by_key(|outs| Reverse(outs.target));

    Ok(OutsBreakdown {
        total_outs,
        by_target,
        dead_cards: dead,
        remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use railbird_cards::Suit;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn hole(s: &str) -> HoleCards {
        let cards = cards(s);
        HoleCards::new(cards[0], cards[1]).unwrap()
    }

    fn board(s: &str) -> Board {
        Board::new(&cards(s)).unwrap()
    }

    fn target<'a>(breakdown: &'a OutsBreakdown, rank: HandRank) -> &'a Outs {
        breakdown
            .by_target
            .iter()
            .find(|o| o.target == rank)
            .unwrap()
    }

    #[test]
    fn flush_draw_on_turn() {
        let breakdown =
            compute_outs(&hole("AH KH"), &board("QH 7H 2C 9S"), &[]).unwrap();
        assert_eq!(breakdown.remaining, 46);
        assert_eq!(breakdown.dead_cards.len(), 6);

        let flush = target(&breakdown, HandRank::Flush);
        assert_eq!(flush.count(), 9);
        assert!(flush.cards.iter().all(|c| c.suit() == Suit::Hearts));
        assert_eq!(flush.description, "Flush draw");

        // Pairing any of the six ranks in play also improves the bare high
        // card, those outs land in the one pair group. Three cards each for
        // the ace, king, queen, and seven, two for the nine and the deuce
        // with one of each dead and the hearts already counted.
        let pairs = target(&breakdown, HandRank::OnePair);
        assert_eq!(pairs.count(), 16);

        assert_eq!(breakdown.total_outs, 25);
    }

    #[test]
    fn straight_flush_outs_are_not_flush_outs() {
        let breakdown = compute_outs(&hole("9H 8H"), &board("7H 6H 2C"), &[]).unwrap();

        let monster = target(&breakdown, HandRank::StraightFlush);
        assert_eq!(monster.count(), 2);
        assert!(monster.cards.contains(&"TH".parse().unwrap()));
        assert!(monster.cards.contains(&"5H".parse().unwrap()));

        // The other hearts make a plain flush.
        let flush = target(&breakdown, HandRank::Flush);
        assert_eq!(flush.count(), 7);
        assert!(!flush.cards.contains(&"TH".parse().unwrap()));
        assert!(!flush.cards.contains(&"5H".parse().unwrap()));

        // Offsuit tens and fives make a straight.
        let straight = target(&breakdown, HandRank::Straight);
        assert_eq!(straight.count(), 6);

        // Best targets first.
        let targets = breakdown
            .by_target
            .iter()
            .map(|o| o.target)
            .collect::<Vec<_>>();
        let mut sorted = targets.clone();
        sorted.sort_by_key(|t| Reverse(*t));
        assert_eq!(targets, sorted);
    }

    #[test]
    fn no_outs_preflop_and_on_river() {
        let breakdown = compute_outs(&hole("AH KH"), &Board::empty(), &[]).unwrap();
        assert_eq!(breakdown.total_outs, 0);
        assert!(breakdown.by_target.is_empty());
        assert_eq!(breakdown.remaining, 50);

        let breakdown =
            compute_outs(&hole("AH KH"), &board("QH 7H 2C 9S 3D"), &[]).unwrap();
        assert_eq!(breakdown.total_outs, 0);
        assert!(breakdown.by_target.is_empty());
        assert_eq!(breakdown.remaining, 45);
    }

    #[test]
    fn exposed_cards_shrink_the_outs() {
        let dead = cards("3H 4H");
        let breakdown =
            compute_outs(&hole("AH KH"), &board("QH 7H 2C 9S"), &dead).unwrap();
        assert_eq!(breakdown.remaining, 44);

        let flush = target(&breakdown, HandRank::Flush);
        assert_eq!(flush.count(), 7);
    }

    #[test]
    fn duplicate_dead_card() {
        let err = compute_outs(&hole("AH KH"), &board("QH 7H 2C"), &cards("AH"))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::Cards(CardsError::DuplicateCard("AH".parse().unwrap()))
        );
    }
}
