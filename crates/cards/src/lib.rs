// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Railbird Poker cards types.
//!
//! This crate defines the card value types used by the evaluator and the
//! probability engine:
//!
//! ```
//! # use railbird_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd = Card::new(Rank::King, Suit::Diamonds);
//! assert!(ah > kd);
//! ```
//!
//! a [Deck] value with the 52 unique cards in a canonical order, where
//! shuffling and dealing return new deck values driven by an explicit
//! random source:
//!
//! ```
//! # use railbird_cards::Deck;
//! # use rand::prelude::*;
//! let mut rng = SmallRng::seed_from_u64(42);
//! let deck = Deck::new().shuffled(&mut rng);
//! let (hole, rest) = deck.deal(2).unwrap();
//! assert_eq!(hole.len(), 2);
//! assert_eq!(rest.len(), 50);
//! ```
//!
//! and the [HoleCards] and [Board] hand collections with construction-time
//! validation of card counts and duplicates.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod cards;
mod combin;
mod error;
mod hand;

pub use cards::{Card, Deck, Rank, Suit};
pub use combin::{choose, for_each_combination};
pub use error::CardsError;
pub use hand::{Board, HoleCards, Street};
