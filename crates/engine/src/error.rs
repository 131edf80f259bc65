// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Engine error types.
use thiserror::Error;

use railbird_cards::CardsError;
use railbird_eval::EvalError;

/// Errors returned by the outs, equity, and odds calculators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Sampling was requested with a zero iterations budget.
    #[error("iterations must be greater than zero in sampling mode")]
    InvalidIterations,
    /// An equity run needs at least one opponent.
    #[error("opponent count must be at least one, got {0}")]
    InvalidOpponentCount(usize),
    /// A range left no playable combination after removing dead cards.
    #[error("opponent range has no playable hand combination")]
    EmptyRange,
    /// A range hand notation that is not "AKs", "AKo", or "QQ" style.
    #[error("invalid range hand {0:?}")]
    InvalidRangeHand(String),
    /// A ratio string that is not in "N:1" form.
    #[error("invalid ratio {0:?}")]
    InvalidRatio(String),
    /// A card level error.
    #[error(transparent)]
    Cards(#[from] CardsError),
    /// A hand evaluation error.
    #[error(transparent)]
    Eval(#[from] EvalError),
}
