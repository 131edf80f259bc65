// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! A hand value packs the hand category in the most significant nibble and
//! five tie-break rank values in descending significance below it:
//!
//! ```text
//!   +------+------+------+------+------+------+
//!   | cccc | t1t1 | t2t2 | t3t3 | t4t4 | t5t5 |
//!   +------+------+------+------+------+------+
//!   c  = hand category (high card=1 .. royal flush=10)
//!   tN = Nth tie-break rank value (deuce=2 .. ace=14)
//! ```
//!
//! so any two values compare with a single integer comparison and a hand of
//! a higher category always outranks any hand of a lower one.
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use railbird_cards::{Card, Rank};

/// Hand evaluation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The evaluator input had fewer than 5 or more than 7 cards.
    #[error("invalid hand size {0}, expected 5 to 7 cards")]
    InvalidHandSize(usize),
    /// The evaluator input contained the same card twice.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
}

/// Hand rankings from worst to best.
///
/// The royal flush is the Ten to Ace straight flush promoted to its own
/// category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// No pair, the highest card plays.
    HighCard = 1,
    /// Two cards of one rank.
    OnePair,
    /// Two cards of one rank and two of another.
    TwoPair,
    /// Three cards of one rank.
    ThreeOfAKind,
    /// Five consecutive ranks, the wheel A-2-3-4-5 is the lowest.
    Straight,
    /// Five cards of one suit.
    Flush,
    /// Three cards of one rank and two of another.
    FullHouse,
    /// Four cards of one rank.
    FourOfAKind,
    /// A straight all in one suit.
    StraightFlush,
    /// The Ten to Ace straight flush.
    RoyalFlush,
}

impl HandRank {
    /// The rank numeric value, 1 for high card up to 10 for a royal flush.
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// The rank display name.
    pub fn name(self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        }
    }

    fn from_value(value: u8) -> HandRank {
        match value {
            1 => HandRank::HighCard,
            2 => HandRank::OnePair,
            3 => HandRank::TwoPair,
            4 => HandRank::ThreeOfAKind,
            5 => HandRank::Straight,
            6 => HandRank::Flush,
            7 => HandRank::FullHouse,
            8 => HandRank::FourOfAKind,
            9 => HandRank::StraightFlush,
            10 => HandRank::RoyalFlush,
            _ => panic!("invalid hand rank value {value}"),
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A packed comparable hand value, higher wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandValue(u32);

impl HandValue {
    /// Evaluates a 5 to 7 cards hand to the value of its best 5 cards.
    ///
    /// This is the hot path used by equity and outs computations, it skips
    /// duplicate checks, see [evaluate] for the validated evaluation.
    ///
    /// Panics if the hand has fewer than 5 or more than 7 cards.
    pub fn eval(cards: &[Card]) -> HandValue {
        assert!(
            (5..=7).contains(&cards.len()),
            "hand size must be 5 to 7 cards"
        );

        let mut best = 0;
        for_each_five(cards, |five| best = best.max(eval5(five)));
        HandValue(best)
    }

    /// The hand category this value belongs to.
    #[inline]
    pub fn rank(self) -> HandRank {
        HandRank::from_value((self.0 >> 20) as u8)
    }

    /// The raw packed score.
    #[inline]
    pub fn score(self) -> u32 {
        self.0
    }
}

/// The result of evaluating a poker hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatedHand {
    /// The hand ranking.
    pub rank: HandRank,
    /// The 5 cards of the best hand, primary cards first then kickers.
    pub cards: [Card; 5],
    /// The kicker cards in order of importance.
    pub kickers: Vec<Card>,
    /// The packed comparable value, higher wins.
    pub value: HandValue,
    /// Human readable description, e.g. "Pair of Aces, King kicker".
    pub description: String,
}

impl EvaluatedHand {
    /// The numeric score for direct comparison, higher wins.
    pub fn score(&self) -> u32 {
        self.value.score()
    }
}

impl fmt::Display for EvaluatedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

/// Evaluates a 5 to 7 cards hand to the best 5 cards hand.
///
/// Fails if the input has fewer than 5 or more than 7 cards, or contains
/// duplicate cards. The result does not depend on the input cards order.
pub fn evaluate(cards: &[Card]) -> Result<EvaluatedHand, EvalError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EvalError::InvalidHandSize(cards.len()));
    }

    let mut seen = AHashSet::with_capacity(cards.len());
    for &card in cards {
        if !seen.insert(card) {
            return Err(EvalError::DuplicateCard(card));
        }
    }

    let mut best = 0;
    let mut best_five = [Card::default(); 5];
    for_each_five(cards, |five| {
        let value = eval5(five);
        if value > best {
            best = value;
            best_five = *five;
        }
    });

    Ok(describe(best_five, HandValue(best)))
}

/// Calls the closure for every 5 cards combination of the input.
#[inline]
fn for_each_five<F: FnMut(&[Card; 5])>(cards: &[Card], mut f: F) {
    let mut buf = [Card::default(); 5];
    let n = cards.len();

    match n {
        5 => {
            buf.copy_from_slice(cards);
            f(&buf);
        }
        6 => {
            for skip in 0..n {
                fill_five(&mut buf, cards, skip, usize::MAX);
                f(&buf);
            }
        }
        _ => {
            // C(7,5) = 21 combinations, one for each pair of dropped cards.
            for s1 in 0..n {
                for s2 in (s1 + 1)..n {
                    fill_five(&mut buf, cards, s1, s2);
                    f(&buf);
                }
            }
        }
    }
}

#[inline]
fn fill_five(buf: &mut [Card; 5], cards: &[Card], s1: usize, s2: usize) {
    let mut n = 0;
    for (i, &card) in cards.iter().enumerate() {
        if i != s1 && i != s2 {
            buf[n] = card;
            n += 1;
        }
    }
}

#[inline]
fn pack(rank: HandRank, tie: [u8; 5]) -> u32 {
    ((rank.value() as u32) << 20)
        | ((tie[0] as u32) << 16)
        | ((tie[1] as u32) << 12)
        | ((tie[2] as u32) << 8)
        | ((tie[3] as u32) << 4)
        | (tie[4] as u32)
}

/// Evaluates exactly 5 cards to a packed value.
fn eval5(cards: &[Card; 5]) -> u32 {
    let mut vals = [0u8; 5];
    for (v, c) in vals.iter_mut().zip(cards) {
        *v = c.rank().value();
    }
    vals.sort_unstable_by(|a, b| b.cmp(a));

    let flush = cards.iter().all(|c| c.suit() == cards[0].suit());

    // Group rank values into (count, value) runs, ordered by count then
    // value descending, so groups[0] is the primary grouping.
    let mut groups = [(0u8, 0u8); 5];
    let mut ngroups = 0;
    for &v in &vals {
        if ngroups > 0 && groups[ngroups - 1].1 == v {
            groups[ngroups - 1].0 += 1;
        } else {
            groups[ngroups] = (1, v);
            ngroups += 1;
        }
    }
    groups[..ngroups].sort_unstable_by(|a, b| b.cmp(a));

    if ngroups == 5 {
        // Ace plays low only in the wheel.
        let wheel = vals == [14, 5, 4, 3, 2];
        let straight = wheel || vals[0] - vals[4] == 4;
        let high = if wheel { 5 } else { vals[0] };

        return match (flush, straight) {
            (true, true) if high == 14 => pack(HandRank::RoyalFlush, [0; 5]),
            (true, true) => pack(HandRank::StraightFlush, [high, 0, 0, 0, 0]),
            (false, true) => pack(HandRank::Straight, [high, 0, 0, 0, 0]),
            (true, false) => pack(HandRank::Flush, vals),
            (false, false) => pack(HandRank::HighCard, vals),
        };
    }

    let (c0, v0) = groups[0];
    let (c1, v1) = groups[1];
    match (c0, c1) {
        (4, _) => pack(HandRank::FourOfAKind, [v0, v1, 0, 0, 0]),
        (3, 2) => pack(HandRank::FullHouse, [v0, v1, 0, 0, 0]),
        (3, _) => pack(HandRank::ThreeOfAKind, [v0, v1, groups[2].1, 0, 0]),
        (2, 2) => pack(HandRank::TwoPair, [v0, v1, groups[2].1, 0, 0]),
        _ => pack(
            HandRank::OnePair,
            [v0, v1, groups[2].1, groups[3].1, 0],
        ),
    }
}

/// Builds the evaluated hand for the winning five cards.
fn describe(five: [Card; 5], value: HandValue) -> EvaluatedHand {
    let rank = value.rank();

    let mut sorted = five;
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    match rank {
        HandRank::RoyalFlush | HandRank::StraightFlush | HandRank::Straight => {
            // In the wheel the ace plays low and goes last.
            let wheel = sorted[0].rank() == Rank::Ace && sorted[1].rank() == Rank::Five;
            let cards = if wheel {
                [sorted[1], sorted[2], sorted[3], sorted[4], sorted[0]]
            } else {
                sorted
            };

            let description = match rank {
                HandRank::RoyalFlush => "Royal Flush".to_string(),
                HandRank::StraightFlush => {
                    format!("Straight Flush, {} high", rank_name(cards[0].rank()))
                }
                _ => format!("Straight, {} high", rank_name(cards[0].rank())),
            };

            EvaluatedHand {
                rank,
                cards,
                kickers: Vec::new(),
                value,
                description,
            }
        }
        HandRank::Flush => EvaluatedHand {
            rank,
            cards: sorted,
            kickers: Vec::new(),
            value,
            description: format!("Flush, {} high", rank_name(sorted[0].rank())),
        },
        _ => describe_groups(sorted, rank, value),
    }
}

/// Builds the evaluated hand for the rank-grouped categories.
fn describe_groups(sorted: [Card; 5], rank: HandRank, value: HandValue) -> EvaluatedHand {
    let mut groups: Vec<Vec<Card>> = Vec::new();
    for &card in &sorted {
        match groups.last_mut() {
            Some(g) if g[0].rank() == card.rank() => g.push(card),
            _ => groups.push(vec![card]),
        }
    }
    groups.sort_by_key(|g| std::cmp::Reverse((g.len(), g[0].rank())));

    let (primary, kickers): (Vec<Card>, Vec<Card>) = match rank {
        HandRank::FullHouse | HandRank::TwoPair => (
            groups[..2].concat(),
            groups[2..].concat(),
        ),
        _ => (groups[0].clone(), groups[1..].concat()),
    };

    let description = match rank {
        HandRank::FourOfAKind => {
            format!("Four of a Kind, {}", rank_plural(primary[0].rank()))
        }
        HandRank::FullHouse => format!(
            "Full House, {} full of {}",
            rank_plural(primary[0].rank()),
            rank_plural(primary[3].rank())
        ),
        HandRank::ThreeOfAKind => {
            format!("Three of a Kind, {}", rank_plural(primary[0].rank()))
        }
        HandRank::TwoPair => format!(
            "Two Pair, {} and {}",
            rank_plural(primary[0].rank()),
            rank_plural(primary[2].rank())
        ),
        HandRank::OnePair => format!(
            "Pair of {}, {} kicker",
            rank_plural(primary[0].rank()),
            rank_name(kickers[0].rank())
        ),
        _ => format!(
            "{} high, {} kicker",
            rank_name(primary[0].rank()),
            rank_name(kickers[0].rank())
        ),
    };

    let mut cards = [Card::default(); 5];
    for (slot, card) in cards.iter_mut().zip(primary.iter().chain(&kickers)) {
        *slot = *card;
    }

    EvaluatedHand {
        rank,
        cards,
        kickers,
        value,
        description,
    }
}

fn rank_name(rank: Rank) -> &'static str {
    match rank {
        Rank::Deuce => "Deuce",
        Rank::Trey => "Trey",
        Rank::Four => "Four",
        Rank::Five => "Five",
        Rank::Six => "Six",
        Rank::Seven => "Seven",
        Rank::Eight => "Eight",
        Rank::Nine => "Nine",
        Rank::Ten => "Ten",
        Rank::Jack => "Jack",
        Rank::Queen => "Queen",
        Rank::King => "King",
        Rank::Ace => "Ace",
    }
}

fn rank_plural(rank: Rank) -> &'static str {
    match rank {
        Rank::Deuce => "Deuces",
        Rank::Trey => "Treys",
        Rank::Four => "Fours",
        Rank::Five => "Fives",
        Rank::Six => "Sixes",
        Rank::Seven => "Sevens",
        Rank::Eight => "Eights",
        Rank::Nine => "Nines",
        Rank::Ten => "Tens",
        Rank::Jack => "Jacks",
        Rank::Queen => "Queens",
        Rank::King => "Kings",
        Rank::Ace => "Aces",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use railbird_cards::Deck;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace()
            .map(|c| c.parse::<Card>().unwrap())
            .collect()
    }

    #[test]
    fn royal_flush() {
        let hand = evaluate(&cards("AH KH QH JH TH 2C 7D")).unwrap();
        assert_eq!(hand.rank, HandRank::RoyalFlush);
        assert_eq!(hand.description, "Royal Flush");
        assert!(hand.kickers.is_empty());
    }

    #[test]
    fn straight_flush() {
        let hand = evaluate(&cards("9D 8D 7D 6D 5D")).unwrap();
        assert_eq!(hand.rank, HandRank::StraightFlush);
        assert_eq!(hand.description, "Straight Flush, Nine high");

        // The steel wheel is the lowest straight flush.
        let wheel = evaluate(&cards("AS 2S 3S 4S 5S")).unwrap();
        assert_eq!(wheel.rank, HandRank::StraightFlush);
        assert_eq!(wheel.description, "Straight Flush, Five high");
        assert!(wheel.score() < hand.score());
    }

    #[test]
    fn four_of_a_kind() {
        let hand = evaluate(&cards("2C 2D 2H 2S 5C")).unwrap();
        assert_eq!(hand.rank, HandRank::FourOfAKind);
        assert_eq!(hand.description, "Four of a Kind, Deuces");
        assert_eq!(hand.kickers, cards("5C"));
    }

    #[test]
    fn full_house() {
        let hand = evaluate(&cards("KC KD KH 5C 5D")).unwrap();
        assert_eq!(hand.rank, HandRank::FullHouse);
        assert_eq!(hand.description, "Full House, Kings full of Fives");

        // With two trips the higher one fills the house.
        let hand = evaluate(&cards("KC KD KH 5C 5D 5H AS")).unwrap();
        assert_eq!(hand.rank, HandRank::FullHouse);
        assert_eq!(hand.description, "Full House, Kings full of Fives");
    }

    #[test]
    fn flush() {
        let hand = evaluate(&cards("AH JH 9H 6H 3H")).unwrap();
        assert_eq!(hand.rank, HandRank::Flush);
        assert_eq!(hand.description, "Flush, Ace high");
    }

    #[test]
    fn straight() {
        let hand = evaluate(&cards("TD 9C 8H 7S 6D")).unwrap();
        assert_eq!(hand.rank, HandRank::Straight);
        assert_eq!(hand.description, "Straight, Ten high");
    }

    #[test]
    fn wheel_straight() {
        let hand = evaluate(&cards("AC 2C 3D 4H 5S")).unwrap();
        assert_eq!(hand.rank, HandRank::Straight);
        assert_eq!(hand.description, "Straight, Five high");

        // The ace plays low, the five leads the hand.
        assert_eq!(hand.cards[0], "5S".parse().unwrap());
        assert_eq!(hand.cards[4], "AC".parse().unwrap());

        // The wheel loses to the six high straight.
        let six_high = evaluate(&cards("2C 3D 4H 5S 6D")).unwrap();
        assert!(hand.score() < six_high.score());

        // A pair of aces with a wheel plays the straight.
        let hand = evaluate(&cards("AC AD 2C 3D 4H 5S 9C")).unwrap();
        assert_eq!(hand.rank, HandRank::Straight);
    }

    #[test]
    fn three_of_a_kind() {
        let hand = evaluate(&cards("7C 7D 7H AC 2D")).unwrap();
        assert_eq!(hand.rank, HandRank::ThreeOfAKind);
        assert_eq!(hand.description, "Three of a Kind, Sevens");
        assert_eq!(hand.kickers, cards("AC 2D"));
    }

    #[test]
    fn two_pair() {
        let hand = evaluate(&cards("AC AD KC KD 9H")).unwrap();
        assert_eq!(hand.rank, HandRank::TwoPair);
        assert_eq!(hand.description, "Two Pair, Aces and Kings");
        assert_eq!(hand.kickers, cards("9H"));

        // Three pairs in 7 cards keep the top two with the best kicker.
        let hand = evaluate(&cards("AC AD KC KD 9H 9C QD")).unwrap();
        assert_eq!(hand.description, "Two Pair, Aces and Kings");
        assert_eq!(hand.kickers, cards("QD"));
    }

    #[test]
    fn one_pair() {
        let hand = evaluate(&cards("AC AD KC 9H 4D")).unwrap();
        assert_eq!(hand.rank, HandRank::OnePair);
        assert_eq!(hand.description, "Pair of Aces, King kicker");
        assert_eq!(hand.kickers, cards("KC 9H 4D"));
    }

    #[test]
    fn high_card() {
        let hand = evaluate(&cards("AC KD 9H 6C 3D")).unwrap();
        assert_eq!(hand.rank, HandRank::HighCard);
        assert_eq!(hand.description, "Ace high, King kicker");
        assert_eq!(hand.kickers, cards("KD 9H 6C 3D"));
    }

    #[test]
    fn kickers_break_ties() {
        let h1 = evaluate(&cards("AC AD KC 9H 4D")).unwrap();
        let h2 = evaluate(&cards("AH AS QC 9D 4C")).unwrap();
        assert_eq!(h1.rank, h2.rank);
        assert!(h1.score() > h2.score());
    }

    #[test]
    fn category_order() {
        let hands = [
            "AC KD 9H 6C 3D",    // high card
            "AC AD KC 9H 4D",    // one pair
            "AC AD KC KD 9H",    // two pair
            "7C 7D 7H AC 2D",    // three of a kind
            "AC 2C 3D 4H 5S",    // straight (wheel, the lowest)
            "2H 3H 4H 6H 7H",    // flush (the lowest kickers)
            "2C 2D 2H 3C 3D",    // full house (the lowest)
            "2C 2D 2H 2S 3C",    // four of a kind (the lowest)
            "AS 2S 3S 4S 5S",    // straight flush (the lowest)
            "AH KH QH JH TH",    // royal flush
        ];

        let mut last = 0;
        for (pos, hand) in hands.iter().enumerate() {
            let hand = evaluate(&cards(hand)).unwrap();
            assert_eq!(hand.rank.value() as usize, pos + 1);
            assert!(hand.score() > last, "{hand} must outscore the previous");
            last = hand.score();
        }
    }

    #[test]
    fn permutation_invariance() {
        let mut rng = SmallRng::seed_from_u64(1234);
        let mut hand = cards("AC AD 2C 3D 4H 5S 9C");
        let reference = evaluate(&hand).unwrap();

        for _ in 0..50 {
            hand.shuffle(&mut rng);
            assert_eq!(evaluate(&hand).unwrap(), reference);
        }
    }

    #[test]
    fn fast_value_matches_evaluate() {
        let mut rng = SmallRng::seed_from_u64(5678);
        for _ in 0..200 {
            let deck = Deck::new().shuffled(&mut rng);
            let hand = &deck.cards()[..7];
            let evaluated = evaluate(hand).unwrap();
            assert_eq!(HandValue::eval(hand), evaluated.value);
        }
    }

    #[test]
    fn invalid_inputs() {
        let err = evaluate(&cards("AC KD 9H 6C")).unwrap_err();
        assert_eq!(err, EvalError::InvalidHandSize(4));

        let err = evaluate(&cards("AC KD 9H 6C 3D 2C 5H 7S")).unwrap_err();
        assert_eq!(err, EvalError::InvalidHandSize(8));

        let err = evaluate(&cards("AC AC KD 9H 6C")).unwrap_err();
        assert_eq!(err, EvalError::DuplicateCard("AC".parse().unwrap()));
    }
}
