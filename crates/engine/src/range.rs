// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Opponent starting hand ranges.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use railbird_cards::{Card, Rank, Suit};

use crate::EngineError;

/// A starting hand class in a range, "AKs", "AKo", or "QQ" with a weight.
///
/// The weight scales how often the class is played relative to the other
/// classes in the range, it does not need to be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeHand {
    high: Rank,
    low: Rank,
    suited: bool,
    weight: f64,
}

impl RangeHand {
    /// Creates a hand class with weight 1, suited is ignored for pairs.
    pub fn new(first: Rank, second: Rank, suited: bool) -> Self {
        let (high, low) = if first >= second {
            (first, second)
        } else {
            (second, first)
        };

        Self {
            high,
            low,
            suited: suited && high != low,
            weight: 1.0,
        }
    }

    /// Sets the relative weight of this class.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight.max(0.0);
        self
    }

    /// The highest rank of the class.
    pub fn high(&self) -> Rank {
        self.high
    }

    /// The lowest rank of the class.
    pub fn low(&self) -> Rank {
        self.low
    }

    /// Whether this class is a pocket pair.
    pub fn is_pair(&self) -> bool {
        self.high == self.low
    }

    /// Whether this class is suited.
    pub fn is_suited(&self) -> bool {
        self.suited
    }

    /// The relative weight of this class.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Number of concrete combos before removing dead cards, 6 for pairs,
    /// 4 for suited hands, 12 for offsuit hands.
    pub fn combo_count(&self) -> usize {
        if self.is_pair() {
            6
        } else if self.suited {
            4
        } else {
            12
        }
    }

    fn for_each_combo(&self, mut f: impl FnMut([Card; 2])) {
        if self.is_pair() {
            let suits = Suit::suits().collect::<Vec<_>>();
            for s1 in 0..suits.len() {
                for s2 in s1 + 1..suits.len() {
                    f([Card::new(self.high, suits[s1]), Card::new(self.low, suits[s2])]);
                }
            }
        } else if self.suited {
            for suit in Suit::suits() {
                f([Card::new(self.high, suit), Card::new(self.low, suit)]);
            }
        } else {
            for s1 in Suit::suits() {
                for s2 in Suit::suits() {
                    if s1 != s2 {
                        f([Card::new(self.high, s1), Card::new(self.low, s2)]);
                    }
                }
            }
        }
    }
}

impl FromStr for RangeHand {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidRangeHand(s.to_string());

        let mut chars = s.chars();
        let high = chars
            .next()
            .and_then(Rank::from_char)
            .ok_or_else(invalid)?;
        let low = chars
            .next()
            .and_then(Rank::from_char)
            .ok_or_else(invalid)?;

        let suited = match (chars.next(), high == low) {
            (None, true) => false,
            (Some('s' | 'S'), false) => true,
            (Some('o' | 'O'), false) => false,
            _ => return Err(invalid()),
        };

        if chars.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::new(high, low, suited))
    }
}

impl fmt::Display for RangeHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)?;
        if !self.is_pair() {
            write!(f, "{}", if self.suited { 's' } else { 'o' })?;
        }
        Ok(())
    }
}

/// A weighted set of starting hand classes assigned to an opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentRange {
    description: String,
    hands: Vec<RangeHand>,
}

impl OpponentRange {
    /// Creates a range from hand classes.
    pub fn new(description: impl Into<String>, hands: Vec<RangeHand>) -> Self {
        Self {
            description: description.into(),
            hands,
        }
    }

    /// Creates a range by parsing hand notations, "AKs", "TT", "QJo".
    pub fn from_notation(
        description: impl Into<String>,
        notations: &[&str],
    ) -> Result<Self, EngineError> {
        let hands = notations
            .iter()
            .map(|s| s.parse())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(description, hands))
    }

    /// A label for this range, "tight open", "button 3-bet".
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The hand classes in this range.
    pub fn hands(&self) -> &[RangeHand] {
        &self.hands
    }

    /// Expands the range to concrete hole card combos with normalized
    /// weights, skipping any combo that uses a dead card.
    ///
    /// Fails with [EngineError::EmptyRange] if the dead cards remove every
    /// combo, the caller cannot give the opponent a hand.
    pub fn expand(&self, dead: &[Card]) -> Result<Vec<([Card; 2], f64)>, EngineError> {
        let mut combos = Vec::new();
        for hand in &self.hands {
            if hand.weight <= 0.0 {
                continue;
            }

            hand.for_each_combo(|combo| {
                if !dead.contains(&combo[0]) && !dead.contains(&combo[1]) {
                    combos.push((combo, hand.weight));
                }
            });
        }

        if combos.is_empty() {
            return Err(EngineError::EmptyRange);
        }

        let total: f64 = combos.iter().map(|(_, w)| w).sum();
        for combo in &mut combos {
            combo.1 /= total;
        }

        Ok(combos)
    }
}

impl fmt::Display for OpponentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn parse_notation() {
        let hand = "AKs".parse::<RangeHand>().unwrap();
        assert_eq!(hand.high(), Rank::Ace);
        assert_eq!(hand.low(), Rank::King);
        assert!(hand.is_suited());
        assert_eq!(hand.to_string(), "AKs");

        let hand = "QJo".parse::<RangeHand>().unwrap();
        assert!(!hand.is_suited());
        assert_eq!(hand.to_string(), "QJo");

        let hand = "TT".parse::<RangeHand>().unwrap();
        assert!(hand.is_pair());
        assert_eq!(hand.to_string(), "TT");

        // Low card first normalizes.
        let hand = "KAs".parse::<RangeHand>().unwrap();
        assert_eq!(hand.to_string(), "AKs");
    }

    #[test]
    fn parse_invalid() {
        for s in ["", "A", "AKx", "AK", "QQs", "AKso", "1K"] {
            let err = s.parse::<RangeHand>().unwrap_err();
            assert_eq!(err, EngineError::InvalidRangeHand(s.to_string()));
        }
    }

    #[test]
    fn combo_counts() {
        assert_eq!("QQ".parse::<RangeHand>().unwrap().combo_count(), 6);
        assert_eq!("AKs".parse::<RangeHand>().unwrap().combo_count(), 4);
        assert_eq!("AKo".parse::<RangeHand>().unwrap().combo_count(), 12);
    }

    #[test]
    fn expand_counts_and_weights() {
        let range = OpponentRange::from_notation("test", &["QQ", "AKs", "AKo"]).unwrap();
        let combos = range.expand(&[]).unwrap();
        assert_eq!(combos.len(), 6 + 4 + 12);

        let total: f64 = combos.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn expand_removes_dead_cards() {
        let range = OpponentRange::from_notation("test", &["QQ"]).unwrap();

        // One dead queen removes the three combos that use it.
        let combos = range.expand(&[card("QH")]).unwrap();
        assert_eq!(combos.len(), 3);
        assert!(combos.iter().all(|(c, _)| !c.contains(&card("QH"))));

        // Three dead queens leave a single combo.
        let dead = [card("QH"), card("QD"), card("QC")];
        let combos = range.expand(&dead).unwrap();
        assert_eq!(combos.len(), 1);

        // All queens dead, the range is empty.
        let dead = [card("QH"), card("QD"), card("QC"), card("QS")];
        let err = range.expand(&dead).unwrap_err();
        assert_eq!(err, EngineError::EmptyRange);
    }

    #[test]
    fn expand_respects_weights() {
        let hands = vec![
            RangeHand::new(Rank::Ace, Rank::Ace, false).with_weight(3.0),
            RangeHand::new(Rank::King, Rank::King, false).with_weight(1.0),
        ];
        let range = OpponentRange::new("weighted", hands);
        let combos = range.expand(&[]).unwrap();
        assert_eq!(combos.len(), 12);

        let aces: f64 = combos
            .iter()
            .filter(|(c, _)| c[0].rank() == Rank::Ace)
            .map(|(_, w)| w)
            .sum();
        assert!((aces - 0.75).abs() < 1e-9);
    }
}
