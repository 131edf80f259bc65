// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Combination counting and enumeration.
//!
//! These routines sit on the hottest paths of the evaluator and of
//! exhaustive equity enumeration, so combinations are generated as index
//! sequences with a single small allocation per enumeration.

/// Creates a table for nck(n, k) for n <= 52 and k <= 7.
const fn make_nck() -> [[u64; 8]; 53] {
    let mut t = [[0u64; 8]; 53];
    let mut n = 0;

    while n <= 52 {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= 7 {
            if n > 0 {
                // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
                t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            }
            k += 1;
        }

        n += 1;
    }

    t
}

const NCKS: [[u64; 8]; 53] = make_nck();

/// Returns the binomial coefficient for n choose k.
///
/// Panics if n > 52 or k > 7.
#[inline]
pub fn choose(n: usize, k: usize) -> u64 {
    assert!(n <= 52, "n={n} must be 0 <= n <= 52");
    assert!(k <= 7, "k={k} must be 0 <= k <= 7");

    if k > n { 0 } else { NCKS[n][k] }
}

/// Calls the given closure for every k-combination of the indices 0..n in
/// lexicographic order.
///
/// The closure receives a slice of k strictly increasing indices. For
/// k = 0 it receives the single empty combination, matching `choose`.
pub fn for_each_combination<F>(n: usize, k: usize, mut f: F)
where
    F: FnMut(&[usize]),
{
    if k > n {
        return;
    }

    if k == 0 {
        f(&[]);
        return;
    }

    // Algorithm L from TAOCP 4a.
    let mut c = vec![0usize; k + 3];
    for i in 1..=k {
        c[i] = i - 1;
    }
    c[k + 1] = n;

    loop {
        f(&c[1..=k]);

        let mut j = 1;
        while c[j] + 1 == c[j + 1] {
            c[j] = j - 1;
            j += 1;
        }

        if j > k {
            break;
        }

        c[j] += 1;
    }
}
