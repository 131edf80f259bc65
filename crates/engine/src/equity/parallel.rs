// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Multitasks equity sampling.
use rand::prelude::*;
use std::thread;

use railbird_cards::{Board, HoleCards};

use crate::{CancelToken, EngineError};

use super::{Equity, EquityConfig, Tally, prepare, sample};

/// Per task rng stream offset, the golden ratio scrambles consecutive task
/// ids into distant seeds.
const SEED_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Samples the hand equity splitting the trials budget across `num_tasks`
/// threads.
///
/// The result is deterministic for a given seed and task count, each task
/// seeds its own rng from the task id and the tallies merge in task order.
/// Cancellation stops every task at its next batch boundary.
///
/// # Panics
///
/// Panics if `num_tasks` is zero.
pub fn par_compute_equity(
    hole: &HoleCards,
    board: &Board,
    config: &EquityConfig,
    seed: u64,
    num_tasks: usize,
    cancel: &CancelToken,
) -> Result<Equity, EngineError> {
    assert!(num_tasks > 0, "num_tasks must be greater than zero");

    let spot = prepare(hole, board, config)?;
    if config.iterations == 0 {
        return Err(EngineError::InvalidIterations);
    }

    let per_task = config.iterations.div_ceil(num_tasks);

    let tallies = thread::scope(|s| {
        let handles = (0..num_tasks)
            .map(|task_id| {
                let spot = &spot;
                s.spawn(move || {
                    // The last tasks absorb the budget remainder.
                    let done = (per_task * task_id).min(config.iterations);
                    let budget = per_task.min(config.iterations - done);

                    let task_seed =
                        seed.wrapping_add(SEED_STREAM.wrapping_mul(task_id as u64 + 1));
                    let mut rng = SmallRng::seed_from_u64(task_seed);
                    sample(spot, budget, &mut rng, cancel)
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("equity task panicked"))
            .collect::<Result<Vec<_>, _>>()
    })?;

    let mut tally = Tally::default();
    for task_tally in tallies {
        tally.merge(task_tally);
    }

    Ok(tally.into_equity(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equity::BATCH_SIZE;

    fn hole(s: &str) -> HoleCards {
        let cards = s
            .split_whitespace()
            .map(|c| c.parse().unwrap())
            .collect::<Vec<_>>();
        HoleCards::new(cards[0], cards[1]).unwrap()
    }

    #[test]
    fn parallel_sampling_is_deterministic() {
        let config = EquityConfig {
            iterations: 20_000,
            ..EquityConfig::default()
        };
        let cancel = CancelToken::new();

        let e1 = par_compute_equity(&hole("AH AD"), &Board::empty(), &config, 42, 4, &cancel)
            .unwrap();
        let e2 = par_compute_equity(&hole("AH AD"), &Board::empty(), &config, 42, 4, &cancel)
            .unwrap();

        assert_eq!(e1, e2);
        assert_eq!(e1.sample_size, 20_000);
        assert!((e1.win + e1.tie + e1.lose - 100.0).abs() < 1e-9);
        assert!(e1.win > 80.0 && e1.win < 90.0);
        assert!(e1.confidence.is_some());
    }

    #[test]
    fn budget_splits_unevenly() {
        // 10000 trials over 3 tasks run 3334, 3334, and 3332.
        let config = EquityConfig::default();
        let cancel = CancelToken::new();

        let equity =
            par_compute_equity(&hole("KH KD"), &Board::empty(), &config, 7, 3, &cancel)
                .unwrap();
        assert_eq!(equity.sample_size, 10_000);
    }

    #[test]
    fn cancelled_tasks_keep_partial_estimates() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let config = EquityConfig {
            iterations: 1_000_000,
            ..EquityConfig::default()
        };
        let equity =
            par_compute_equity(&hole("AH AD"), &Board::empty(), &config, 42, 4, &cancel)
                .unwrap();

        // Each task runs its first batch and stops.
        assert_eq!(equity.sample_size, 4 * BATCH_SIZE as u64);
        assert!((equity.win + equity.tie + equity.lose - 100.0).abs() < 1e-9);
    }
}
