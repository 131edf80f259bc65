// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Probability to betting odds conversions.
//!
//! Odds quote a probability the way players talk about it at the table, as
//! the chances against making the hand. A 20% draw is "4:1", four misses
//! for every hit.
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// A probability in the formats used to teach pot odds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Odds {
    /// The probability in percent.
    pub percentage: f64,
    /// Odds against in "N:1" form, "4:1".
    pub ratio: String,
    /// Odds against in fractional form, "4/1".
    pub fractional: String,
    /// Decimal payout odds, stake included, "5.0".
    pub decimal: f64,
}

impl Odds {
    /// Converts a percentage to all the odds formats.
    pub fn from_percentage(percentage: f64) -> Odds {
        let percentage = percentage.clamp(0.0, 100.0);
        Odds {
            percentage,
            ratio: percentage_to_ratio(percentage),
            fractional: percentage_to_fractional(percentage),
            decimal: percentage_to_decimal(percentage),
        }
    }
}

/// Formats a percentage as odds against in "N:1" form.
///
/// The number of decimals adapts so that converting the ratio back yields
/// the input percentage within a twentieth of a point. A 0% chance never
/// comes in, "1:0", and a 100% chance never misses, "0:1".
pub fn percentage_to_ratio(percentage: f64) -> String {
    let percentage = percentage.clamp(0.0, 100.0);
    if percentage == 0.0 {
        return "1:0".to_string();
    } else if percentage == 100.0 {
        return "0:1".to_string();
    }

    let against = (100.0 - percentage) / percentage;
    for precision in 0..=6 {
        let rounded = format!("{against:.precision$}");
        let value = rounded.parse::<f64>().unwrap_or(against);
        let back = 100.0 / (value + 1.0);
        if (back - percentage).abs() < 0.05 {
            return format!("{}:1", trim_zeros(&rounded));
        }
    }

    format!("{}:1", trim_zeros(&format!("{against:.6}")))
}

/// Parses an "A:B" ratio of odds against back to a percentage.
pub fn ratio_to_percentage(ratio: &str) -> Result<f64, EngineError> {
    let invalid = || EngineError::InvalidRatio(ratio.to_string());

    let (against, on) = ratio.split_once(':').ok_or_else(invalid)?;
    let against = against.trim().parse::<f64>().map_err(|_| invalid())?;
    let on = on.trim().parse::<f64>().map_err(|_| invalid())?;

    if against < 0.0 || on < 0.0 || against + on == 0.0 {
        return Err(invalid());
    }

    Ok(100.0 * on / (against + on))
}

/// Formats a percentage as fractional odds against, "4/1" for 20%.
pub fn percentage_to_fractional(percentage: f64) -> String {
    let percentage = percentage.clamp(0.0, 100.0);
    if percentage == 0.0 {
        return "1/0".to_string();
    } else if percentage == 100.0 {
        return "0/1".to_string();
    }

    let against = (100.0 - percentage) / percentage;
    let (num, den) = simplest_fraction(against, 5e-4);
    format!("{num}/{den}")
}

/// Converts a percentage to decimal payout odds, total return per unit
/// staked. Returns 0 for a 0% chance.
pub fn percentage_to_decimal(percentage: f64) -> f64 {
    let percentage = percentage.clamp(0.0, 100.0);
    if percentage == 0.0 {
        return 0.0;
    }

    100.0 / percentage
}

/// The fraction with the smallest denominator within `tolerance` of the
/// target, found by walking the Stern-Brocot tree of mediants.
///
/// The walk advances one mediant per step, so an extreme target would take
/// about `target` steps to reach; past a step cap the target is quoted as
/// a rounded thousandth instead.
fn simplest_fraction(target: f64, tolerance: f64) -> (u64, u64) {
    const MAX_STEPS: usize = 10_000;

    let (mut lo_n, mut lo_d) = (0u64, 1u64);
    let (mut hi_n, mut hi_d) = (1u64, 0u64);

    for _ in 0..MAX_STEPS {
        let med_n = lo_n + hi_n;
        let med_d = lo_d + hi_d;
        let med = med_n as f64 / med_d as f64;

        if (med - target).abs() <= tolerance * target.max(1.0) {
            return (med_n, med_d);
        } else if med < target {
            (lo_n, lo_d) = (med_n, med_d);
        } else {
            (hi_n, hi_d) = (med_n, med_d);
        }
    }

    let num = (target * 1000.0).round() as u64;
    let div = gcd(num, 1000);
    (num / div, 1000 / div)
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_round_numbers() {
        assert_eq!(percentage_to_ratio(50.0), "1:1");
        assert_eq!(percentage_to_ratio(25.0), "3:1");
        assert_eq!(percentage_to_ratio(20.0), "4:1");
        assert_eq!(percentage_to_ratio(10.0), "9:1");
    }

    #[test]
    fn ratio_endpoints() {
        assert_eq!(percentage_to_ratio(0.0), "1:0");
        assert_eq!(percentage_to_ratio(100.0), "0:1");
        assert_eq!(percentage_to_ratio(-3.0), "1:0");
        assert_eq!(percentage_to_ratio(120.0), "0:1");
    }

    #[test]
    fn ratio_to_percentage_parses() {
        assert_eq!(ratio_to_percentage("3:1").unwrap(), 25.0);
        assert_eq!(ratio_to_percentage("1:1").unwrap(), 50.0);
        assert_eq!(ratio_to_percentage("0:1").unwrap(), 100.0);
        assert_eq!(ratio_to_percentage("1:0").unwrap(), 0.0);
        assert_eq!(ratio_to_percentage("4.5:1").unwrap(), 100.0 / 5.5);
    }

    #[test]
    fn ratio_to_percentage_invalid() {
        for s in ["", "3", "a:1", "3:b", "-1:1", "0:0"] {
            let err = ratio_to_percentage(s).unwrap_err();
            assert_eq!(err, EngineError::InvalidRatio(s.to_string()));
        }
    }

    #[test]
    fn ratio_round_trips() {
        // The adaptive precision keeps the round trip within a tenth of a
        // point over the whole range.
        let mut percentage = 0.5;
        while percentage < 100.0 {
            let ratio = percentage_to_ratio(percentage);
            let back = ratio_to_percentage(&ratio).unwrap();
            assert!(
                (back - percentage).abs() < 0.1,
                "{percentage}% -> {ratio} -> {back}%"
            );
            percentage += 0.5;
        }
    }

    #[test]
    fn fractional_odds() {
        assert_eq!(percentage_to_fractional(25.0), "3/1");
        assert_eq!(percentage_to_fractional(50.0), "1/1");
        assert_eq!(percentage_to_fractional(40.0), "3/2");
        assert_eq!(percentage_to_fractional(0.0), "1/0");
        assert_eq!(percentage_to_fractional(100.0), "0/1");
    }

    #[test]
    fn fractional_extreme_percentages() {
        // A vanishing chance walks the integer side of the tree one step
        // per unit, the step cap quotes it as a rounded fraction instead.
        let fraction = percentage_to_fractional(1e-9);
        let (num, den) = fraction.split_once('/').unwrap();
        let num = num.parse::<f64>().unwrap();
        let den = den.parse::<f64>().unwrap();
        assert!(num / den > 1e10);

        // A near certainty converges within tolerance on its own.
        assert_eq!(percentage_to_fractional(100.0 - 1e-9), "1/2000");
    }

    #[test]
    fn decimal_odds() {
        assert_eq!(percentage_to_decimal(50.0), 2.0);
        assert_eq!(percentage_to_decimal(25.0), 4.0);
        assert_eq!(percentage_to_decimal(0.0), 0.0);
        assert_eq!(percentage_to_decimal(100.0), 1.0);
    }

    #[test]
    fn odds_bundle() {
        let odds = Odds::from_percentage(20.0);
        assert_eq!(odds.percentage, 20.0);
        assert_eq!(odds.ratio, "4:1");
        assert_eq!(odds.fractional, "4/1");
        assert_eq!(odds.decimal, 5.0);
    }
}
