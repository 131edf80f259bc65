// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hole cards and community cards collections.
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Card, CardsError, Rank};

/// A betting round in Texas Hold'em.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Street {
    /// No community cards dealt.
    Preflop,
    /// The first three community cards.
    Flop,
    /// The fourth community card.
    Turn,
    /// The fifth community card.
    River,
    /// All bets settled, hands revealed.
    Showdown,
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let street = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        };

        write!(f, "{street}")
    }
}

/// The two cards dealt to a player, immutable once dealt.
///
/// The higher card is stored first so that a pair of hole cards has one
/// canonical form regardless of dealing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoleCards([Card; 2]);

impl HoleCards {
    /// Creates hole cards from two distinct cards.
    pub fn new(first: Card, second: Card) -> Result<Self, CardsError> {
        if first == second {
            return Err(CardsError::DuplicateCard(first));
        }

        if first > second {
            Ok(Self([first, second]))
        } else {
            Ok(Self([second, first]))
        }
    }

    /// The two cards, highest first.
    pub fn cards(&self) -> [Card; 2] {
        self.0
    }

    /// The highest card.
    pub fn high(&self) -> Card {
        self.0[0]
    }

    /// The lowest card.
    pub fn low(&self) -> Card {
        self.0[1]
    }

    /// Whether the two cards share a suit.
    pub fn is_suited(&self) -> bool {
        self.0[0].suit() == self.0[1].suit()
    }

    /// Whether the two cards are a pocket pair.
    pub fn is_pair(&self) -> bool {
        self.0[0].rank() == self.0[1].rank()
    }

    /// The number of ranks between the two cards, 0 for pairs and
    /// connectors, 1 for one-gappers, and so on.
    pub fn gap(&self) -> u8 {
        let high = self.0[0].rank().value();
        let low = self.0[1].rank().value();
        (high - low).saturating_sub(1)
    }

    /// Canonical starting hand notation, "AKs", "87o", or "QQ".
    pub fn notation(&self) -> String {
        let high = self.0[0].rank();
        let low = self.0[1].rank();

        if self.is_pair() {
            format!("{high}{low}")
        } else if self.is_suited() {
            format!("{high}{low}s")
        } else {
            format!("{high}{low}o")
        }
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0[0], self.0[1])
    }
}

/// The community cards, an immutable snapshot per street.
///
/// Holds 0, 3, 4, or 5 cards, the lengths a board can have across streets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board(Vec<Card>);

impl Board {
    /// Creates a board from a slice of 0, 3, 4, or 5 distinct cards.
    pub fn new(cards: &[Card]) -> Result<Self, CardsError> {
        if !matches!(cards.len(), 0 | 3 | 4 | 5) {
            return Err(CardsError::InvalidBoardSize(cards.len()));
        }

        let mut seen = AHashSet::with_capacity(cards.len());
        for &card in cards {
            if !seen.insert(card) {
                return Err(CardsError::DuplicateCard(card));
            }
        }

        Ok(Self(cards.to_vec()))
    }

    /// Creates an empty preflop board.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The community cards in dealing order.
    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    /// Number of community cards dealt.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if no community cards were dealt.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of community cards still to come.
    pub fn to_come(&self) -> usize {
        5 - self.0.len()
    }

    /// The street this board belongs to.
    pub fn street(&self) -> Street {
        match self.0.len() {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }

    /// The highest rank on the board.
    pub fn high_rank(&self) -> Option<Rank> {
        self.0.iter().map(|c| c.rank()).max()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cards = self.0.iter();
        if let Some(card) = cards.next() {
            write!(f, "{card}")?;
            for card in cards {
                write!(f, " {card}")?;
            }
        }
        Ok(())
    }
}
