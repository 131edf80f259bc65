// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Railbird Poker probability engine.
//!
//! Computes the numbers a Texas Hold'em student needs for a spot: the outs
//! to a better hand, the equity against one or more opponents, the named
//! draws, and the odds in table formats.
//!
//! ```
//! use rand::prelude::*;
//! use railbird_engine::*;
//!
//! let hole = HoleCards::new("AH".parse()?, "KH".parse()?)?;
//! let board = Board::new(&["QH".parse()?, "7H".parse()?, "2C".parse()?])?;
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let result = analyze(&hole, &board, &EquityConfig::default(), &mut rng)?;
//!
//! assert!(result.draws.contains(&DrawType::FlushDraw));
//! assert!(result.equity.win > 50.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod cancel;
mod equity;
mod error;
mod odds;
mod outs;
mod probability;
mod range;
mod starting;

pub use cancel::CancelToken;
pub use equity::{
    Confidence, Equity, EquityConfig, compute_equity, compute_equity_with_cancel,
    par_compute_equity,
};
pub use error::EngineError;
pub use odds::{
    Odds, percentage_to_decimal, percentage_to_fractional, percentage_to_ratio,
    ratio_to_percentage,
};
pub use outs::{Outs, OutsBreakdown, compute_outs};
pub use probability::{DrawType, ProbabilityResult, analyze, detect_draws};
pub use range::{OpponentRange, RangeHand};
pub use starting::{
    HandCategory, HandStrength, StartingHandAnalysis, analyze_starting_hand, chen_score,
};

// Reexport cards and eval types.
pub use railbird_cards::{Board, Card, CardsError, Deck, HoleCards, Rank, Street, Suit};
pub use railbird_eval::{EvalError, EvaluatedHand, HandRank, HandValue, evaluate};
