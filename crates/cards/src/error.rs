// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards error types.
use thiserror::Error;

use crate::Card;

/// Errors for deck and hand collection operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardsError {
    /// A deal requested more cards than the deck holds.
    #[error("cannot deal {requested} cards, {available} left in the deck")]
    InsufficientCards {
        /// The number of cards requested.
        requested: usize,
        /// The number of cards left in the deck.
        available: usize,
    },
    /// The same card appeared twice in a hand collection.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
    /// A community cards collection with an invalid number of cards.
    #[error("invalid board size {0}, expected 0, 3, 4, or 5 cards")]
    InvalidBoardSize(usize),
    /// A card string that could not be parsed.
    #[error("invalid card {0:?}")]
    ParseCard(String),
}
