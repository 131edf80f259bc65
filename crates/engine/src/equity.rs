// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Win probability estimation.
//!
//! Equity is the share of the pot a hand expects to win at showdown. The
//! calculator enumerates every opponent hand and runout when the count is
//! small enough, and falls back to Monte Carlo sampling otherwise.
use log::debug;
use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use railbird_cards::{Board, Card, CardsError, Deck, HoleCards, choose, for_each_combination};
use railbird_eval::HandValue;

use crate::{CancelToken, EngineError, OpponentRange};

mod parallel;
pub use parallel::par_compute_equity;

/// Max number of showdowns for exhaustive enumeration, larger spots fall
/// back to sampling.
const EXHAUSTIVE_LIMIT: u64 = 2_000_000;

/// Sampling trials between cancellation checks.
pub(crate) const BATCH_SIZE: usize = 512;

/// Normal 95% confidence z value.
const CONFIDENCE_Z: f64 = 1.96;

/// A 95% confidence interval on the win percentage of a sampled estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Confidence {
    /// Interval low bound in percent.
    pub low: f64,
    /// Interval high bound in percent.
    pub high: f64,
}

/// The outcome of an equity computation, percentages in 0 to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equity {
    /// Percentage of showdowns the hand wins outright.
    pub win: f64,
    /// Percentage of showdowns the hand loses.
    pub lose: f64,
    /// Percentage of showdowns the hand splits the pot.
    pub tie: f64,
    /// Number of showdowns evaluated, the full enumeration count in
    /// exhaustive mode or the number of sampled trials.
    pub sample_size: u64,
    /// Confidence interval on the win percentage, sampling mode only.
    pub confidence: Option<Confidence>,
}

/// Equity computation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityConfig {
    /// Trials budget in sampling mode.
    pub iterations: usize,
    /// Number of opponents still in the hand.
    pub opponent_count: usize,
    /// Prefer exhaustive enumeration when the spot is small enough, only
    /// available against a single opponent.
    pub use_exhaustive: bool,
    /// The hands the opponents can hold, all unseen combos when `None`.
    pub opponent_range: Option<OpponentRange>,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            opponent_count: 1,
            use_exhaustive: false,
            opponent_range: None,
        }
    }
}

/// Win, tie, lose counters for a run of showdowns.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Tally {
    win: f64,
    tie: f64,
    lose: f64,
    trials: u64,
}

impl Tally {
    fn record(&mut self, hero: HandValue, best_opponent: HandValue, weight: f64) {
        if hero > best_opponent {
            self.win += weight;
        } else if hero == best_opponent {
            self.tie += weight;
        } else {
            self.lose += weight;
        }
        self.trials += 1;
    }

    pub(crate) fn merge(&mut self, other: Tally) {
        self.win += other.win;
        self.tie += other.tie;
        self.lose += other.lose;
        self.trials += other.trials;
    }

    pub(crate) fn into_equity(self, sampled: bool) -> Equity {
        if self.trials == 0 {
            return Equity {
                win: 0.0,
                lose: 0.0,
                tie: 0.0,
                sample_size: 0,
                confidence: None,
            };
        }

        let total = self.win + self.tie + self.lose;
        let scale = 100.0 / total;

        let confidence = sampled.then(|| {
            let p = self.win / total;
            let se = (p * (1.0 - p) / self.trials as f64).sqrt();
            Confidence {
                low: ((p - CONFIDENCE_Z * se) * 100.0).max(0.0),
                high: ((p + CONFIDENCE_Z * se) * 100.0).min(100.0),
            }
        });

        Equity {
            win: self.win * scale,
            lose: self.lose * scale,
            tie: self.tie * scale,
            sample_size: self.trials,
            confidence,
        }
    }
}

/// The validated inputs shared by the enumeration and sampling paths.
pub(crate) struct Spot {
    hero: [Card; 2],
    board: Vec<Card>,
    unseen: Vec<Card>,
    combos: Option<Vec<([Card; 2], f64)>>,
    missing: usize,
    opponents: usize,
}

pub(crate) fn prepare(
    hole: &HoleCards,
    board: &Board,
    config: &EquityConfig,
) -> Result<Spot, EngineError> {
    if config.opponent_count == 0 {
        return Err(EngineError::InvalidOpponentCount(0));
    }

    let hero = hole.cards();
    for &card in board.cards() {
        if hero.contains(&card) {
            return Err(CardsError::DuplicateCard(card).into());
        }
    }

    let mut dead = hero.to_vec();
    dead.extend_from_slice(board.cards());
    let unseen = Deck::new().without(&dead).into_iter().collect::<Vec<_>>();

    let combos = config
        .opponent_range
        .as_ref()
        .map(|range| range.expand(&dead))
        .transpose()?;

    Ok(Spot {
        hero,
        board: board.cards().to_vec(),
        unseen,
        combos,
        missing: board.to_come(),
        opponents: config.opponent_count,
    })
}

/// Computes the hand equity with the given settings.
///
/// Exhaustive enumeration is exact and leaves [Equity::confidence] empty,
/// sampling reports a 95% confidence interval on the win percentage.
pub fn compute_equity<R: Rng + ?Sized>(
    hole: &HoleCards,
    board: &Board,
    config: &EquityConfig,
    rng: &mut R,
) -> Result<Equity, EngineError> {
    compute_equity_with_cancel(hole, board, config, rng, &CancelToken::new())
}

/// Computes the hand equity checking for cancellation between batches of
/// sampled trials.
///
/// A cancelled run returns the estimate accumulated so far, at least one
/// batch is always evaluated so the estimate is never empty.
pub fn compute_equity_with_cancel<R: Rng + ?Sized>(
    hole: &HoleCards,
    board: &Board,
    config: &EquityConfig,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<Equity, EngineError> {
    let spot = prepare(hole, board, config)?;

    if config.use_exhaustive && spot.opponents == 1 {
        let cost = exhaustive_cost(&spot);
        if cost <= EXHAUSTIVE_LIMIT {
            debug!("enumerating {cost} showdowns");
            return Ok(enumerate(&spot).into_equity(false));
        }
        debug!("enumeration too large ({cost} showdowns), sampling");
    }

    if config.iterations == 0 {
        return Err(EngineError::InvalidIterations);
    }

    let tally = sample(&spot, config.iterations, rng, cancel)?;
    Ok(tally.into_equity(true))
}

fn exhaustive_cost(spot: &Spot) -> u64 {
    let opponent_combos = match &spot.combos {
        Some(combos) => combos.len() as u64,
        None => choose(spot.unseen.len(), 2),
    };

    opponent_combos.saturating_mul(choose(spot.unseen.len() - 2, spot.missing))
}

fn enumerate(spot: &Spot) -> Tally {
    let mut tally = Tally::default();
    let mut rest = Vec::with_capacity(spot.unseen.len());

    match &spot.combos {
        None => {
            for_each_combination(spot.unseen.len(), 2, |idx| {
                let opponent = [spot.unseen[idx[0]], spot.unseen[idx[1]]];
                rest.clear();
                rest.extend(
                    (0..spot.unseen.len())
                        .filter(|i| *i != idx[0] && *i != idx[1])
                        .map(|i| spot.unseen[i]),
                );
                enumerate_runouts(spot, opponent, 1.0, &rest, &mut tally);
            });
        }
        Some(combos) => {
            for &(opponent, weight) in combos {
                rest.clear();
                rest.extend(
                    spot.unseen
                        .iter()
                        .filter(|c| !opponent.contains(*c))
                        .copied(),
                );
                enumerate_runouts(spot, opponent, weight, &rest, &mut tally);
            }
        }
    }

    tally
}

fn enumerate_runouts(
    spot: &Spot,
    opponent: [Card; 2],
    weight: f64,
    rest: &[Card],
    tally: &mut Tally,
) {
    let mut hand = [Card::default(); 7];
    hand[2..2 + spot.board.len()].copy_from_slice(&spot.board);

    if spot.missing == 0 {
        showdown(spot.hero, opponent, &mut hand, weight, tally);
        return;
    }

    let board_end = 2 + spot.board.len();
    for_each_combination(rest.len(), spot.missing, |idx| {
        for (slot, &i) in idx.iter().enumerate() {
            hand[board_end + slot] = rest[i];
        }
        showdown(spot.hero, opponent, &mut hand, weight, tally);
    });
}

fn showdown(
    hero: [Card; 2],
    opponent: [Card; 2],
    hand: &mut [Card; 7],
    weight: f64,
    tally: &mut Tally,
) {
    hand[..2].copy_from_slice(&hero);
    let hero_value = HandValue::eval(hand);
    hand[..2].copy_from_slice(&opponent);
    let opponent_value = HandValue::eval(hand);
    tally.record(hero_value, opponent_value, weight);
}

pub(crate) fn sample<R: Rng + ?Sized>(
    spot: &Spot,
    budget: usize,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<Tally, EngineError> {
    let weighted = match &spot.combos {
        Some(combos) => {
            let index = WeightedIndex::new(combos.iter().map(|(_, w)| *w))
                .map_err(|_| EngineError::EmptyRange)?;
            Some((combos, index))
        }
        None => None,
    };

    let mut tally = Tally::default();
    let mut hand = [Card::default(); 7];
    let board_end = 2 + spot.board.len();
    hand[2..board_end].copy_from_slice(&spot.board);

    let mut drawn = Vec::with_capacity(spot.opponents * 2 + spot.missing);
    let mut opponents = Vec::with_capacity(spot.opponents);
    let mut live = Vec::with_capacity(spot.unseen.len());

    while (tally.trials as usize) < budget {
        let batch = BATCH_SIZE.min(budget - tally.trials as usize);
        for _ in 0..batch {
            match &weighted {
                None => {
                    // Deal the opponent holes and the missing board cards in
                    // one draw from the unseen cards.
                    let need = spot.opponents * 2 + spot.missing;
                    drawn.clear();
                    drawn.extend(spot.unseen.choose_multiple(rng, need).copied());

                    for (slot, &card) in hand[board_end..]
                        .iter_mut()
                        .zip(&drawn[spot.opponents * 2..])
                    {
                        *slot = card;
                    }

                    hand[..2].copy_from_slice(&spot.hero);
                    let hero_value = HandValue::eval(&hand);

                    let best = drawn[..spot.opponents * 2]
                        .chunks_exact(2)
                        .map(|opponent| {
                            hand[..2].copy_from_slice(opponent);
                            HandValue::eval(&hand)
                        })
                        .max();
                    if let Some(best) = best {
                        tally.record(hero_value, best, 1.0);
                    }
                }
                Some((combos, index)) => {
                    // Each opponent draws a combo with probability
                    // proportional to its weight, so a trial counts as one
                    // unweighted showdown.
                    opponents.clear();
                    let mut rejected = 0;
                    while opponents.len() < spot.opponents {
                        let (combo, _) = combos[index.sample(rng)];
                        let clash = opponents
                            .iter()
                            .any(|o: &[Card; 2]| o.contains(&combo[0]) || o.contains(&combo[1]));
                        if clash {
                            rejected += 1;
                            if rejected > 1_000 {
                                return Err(EngineError::EmptyRange);
                            }
                        } else {
                            opponents.push(combo);
                        }
                    }

                    live.clear();
                    live.extend(
                        spot.unseen
                            .iter()
                            .filter(|c| !opponents.iter().any(|o| o.contains(*c)))
                            .copied(),
                    );

                    drawn.clear();
                    drawn.extend(live.choose_multiple(rng, spot.missing).copied());
                    for (slot, &card) in hand[board_end..].iter_mut().zip(&drawn) {
                        *slot = card;
                    }

                    hand[..2].copy_from_slice(&spot.hero);
                    let hero_value = HandValue::eval(&hand);

                    let best = opponents
                        .iter()
                        .map(|opponent| {
                            hand[..2].copy_from_slice(opponent);
                            HandValue::eval(&hand)
                        })
                        .max();
                    if let Some(best) = best {
                        tally.record(hero_value, best, 1.0);
                    }
                }
            }
        }

        if cancel.is_cancelled() && (tally.trials as usize) < budget {
            debug!("equity sampling cancelled after {} trials", tally.trials);
            break;
        }
    }

    Ok(tally)
}
