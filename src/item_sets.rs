//! Frequent itemset mining over binary transactions.

mod apriori;
mod itemset;
mod matrix;
mod support;

pub use apriori::{Apriori, MiningLimits};
pub use itemset::{ItemId, Itemset};
pub use matrix::{Item, Transaction, TransactionMatrix};
pub use support::{FrequentItemset, FrequentItemsets, SupportIndex};

use crate::errors::{MiningError, MiningResult};

pub trait ItemSetMiner {
    /// Mine every itemset whose support fraction is at least `min_support`.
    ///
    /// `min_support` must lie in `(0, 1]`. An empty dataset yields an empty
    /// (but mined) result rather than an error.
    fn mine(&self, dataset: &TransactionMatrix, min_support: f64)
        -> MiningResult<FrequentItemsets>;
}

/// Reject `min_support` outside `(0, 1]` (NaN included).
pub fn validate_min_support(min_support: f64) -> MiningResult<()> {
    if min_support > 0.0 && min_support <= 1.0 {
        Ok(())
    } else {
        Err(MiningError::InvalidThreshold {
            name: "min_support",
            value: min_support,
            range: "(0, 1]",
        })
    }
}

/// Smallest transaction count `c` with `c / transactions >= min_support`.
///
/// Starts from `ceil(min_support * n)` and corrects for rounding in that
/// product, so 0.3 of 10 rows asks for 3 rows rather than 4, and a count is
/// never admitted whose support fraction falls below `min_support`.
pub fn min_support_count(min_support: f64, transactions: usize) -> u64 {
    let n = transactions as f64;
    let meets = |count: u64| count as f64 / n >= min_support;
    let mut count = ((min_support * n).ceil() as u64).max(1);
    while count > 1 && meets(count - 1) {
        count -= 1;
    }
    while count < transactions as u64 && !meets(count) {
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_count_is_integer_ceiling() {
        assert_eq!(min_support_count(0.5, 4), 2);
        assert_eq!(min_support_count(0.3, 10), 3);
        assert_eq!(min_support_count(0.31, 10), 4);
        assert_eq!(min_support_count(1.0, 7), 7);
        assert_eq!(min_support_count(0.01, 50), 1);
        assert_eq!(min_support_count(0.7, 10), 7);
        assert_eq!(min_support_count(0.07, 100), 7);
    }

    #[test]
    fn threshold_count_never_admits_lower_fraction() {
        let just_above_half = f64::from_bits(0.5f64.to_bits() + 1);
        assert_eq!(min_support_count(just_above_half, 4), 3);
        let just_above_third = f64::from_bits((1.0f64 / 3.0).to_bits() + 1);
        assert_eq!(min_support_count(just_above_third, 3), 2);
        for n in 1..200usize {
            for step in 1..=100u32 {
                let min_support = f64::from(step) / 100.0;
                let count = min_support_count(min_support, n);
                assert!(count as f64 / n as f64 >= min_support);
                assert!(count == 1 || ((count - 1) as f64 / n as f64) < min_support);
            }
        }
    }

    #[test]
    fn min_support_range_is_half_open() {
        assert!(validate_min_support(1.0).is_ok());
        assert!(validate_min_support(1e-9).is_ok());
        assert!(validate_min_support(0.0).is_err());
        assert!(validate_min_support(1.0001).is_err());
        assert!(validate_min_support(f64::NAN).is_err());
    }
}
