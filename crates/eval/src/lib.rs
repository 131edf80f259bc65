// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Railbird Poker hand evaluator.
//!
//! Evaluator for 5, 6 and 7 cards hands. It examines every 5 cards
//! combination of its input and selects the best one, with the wheel
//! (A-2-3-4-5) handled as the lowest straight.
//!
//! [HandValue::eval] computes a packed comparable value without extracting
//! the best hand, useful for computing odds and other stats:
//!
//! ```
//! # use railbird_eval::*;
//! // 2C, 3C, .., JC
//! let cards = Deck::new().into_iter().take(10).collect::<Vec<_>>();
//! let v1 = HandValue::eval(&cards[0..5]);
//! let v2 = HandValue::eval(&cards[5..]);
//! assert!(v2 > v1);
//! ```
//!
//! while the slightly slower [evaluate] also returns the five best cards,
//! the kickers, and a description, useful for showing a hand to a student:
//!
//! ```
//! # use railbird_eval::*;
//! let cards = ["AH", "KH", "QH", "JH", "TH", "2C", "7D"]
//!     .iter()
//!     .map(|s| s.parse::<Card>().unwrap())
//!     .collect::<Vec<_>>();
//! let hand = evaluate(&cards).unwrap();
//! assert_eq!(hand.rank, HandRank::RoyalFlush);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{EvalError, EvaluatedHand, HandRank, HandValue, evaluate};

// Reexport cards types.
pub use railbird_cards::{Board, Card, Deck, HoleCards, Rank, Street, Suit};
