use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::{RankError, Result, check_rank};

/// Number of `k`-subsets of an `n`-set, zero when `k > n`.
pub fn binomial(n: usize, k: usize) -> BigUint {
    if k > n {
        return BigUint::zero();
    }
    let k = k.min(n - k);
    let mut result = BigUint::one();
    for i in 1..=k {
        result = result * (n - (k - i)) / i;
    }
    result
}

pub fn factorial(n: usize) -> BigUint {
    (2..=n).fold(BigUint::one(), |acc, i| acc * i)
}

/// Stirling number of the second kind: partitions of an `n`-set into exactly
/// `k` nonempty blocks.
pub fn stirling2(n: usize, k: usize) -> BigUint {
    if k > n {
        return BigUint::zero();
    }
    // row[j] holds S2(i, j) for the current i.
    let mut row = vec![BigUint::zero(); k + 1];
    row[0] = BigUint::one();
    for _ in 0..n {
        for j in (1..=k).rev() {
            row[j] = &row[j] * j + &row[j - 1];
        }
        row[0] = BigUint::zero();
    }
    row.swap_remove(k)
}

/// Pascal's triangle up to a fixed `n`, for callers that need many binomial
/// coefficients of bounded size.
#[derive(Clone, Debug)]
pub struct BinomialTable {
    rows: Vec<Vec<BigUint>>,
}

impl BinomialTable {
    pub fn new(max_n: usize) -> Self {
        let mut rows: Vec<Vec<BigUint>> = Vec::with_capacity(max_n + 1);
        for n in 0..=max_n {
            let mut row = vec![BigUint::one(); n + 1];
            for k in 1..n {
                row[k] = &rows[n - 1][k - 1] + &rows[n - 1][k];
            }
            rows.push(row);
        }
        Self { rows }
    }

    /// `C(n, k)`; zero when `k > n`. Panics if `n` exceeds the table.
    pub fn get(&self, n: usize, k: usize) -> BigUint {
        self.rows[n].get(k).cloned().unwrap_or_default()
    }

    /// Row `n` of the triangle, `C(n, 0) ..= C(n, n)`.
    pub fn row(&self, n: usize) -> &[BigUint] {
        &self.rows[n]
    }
}

/// Rank a combination in the combinatorial number system.
///
/// `values` must be strictly increasing. The digit for the value at index `j`
/// is `C(values[j], j + 1)`, so `[0, 1, .., k-1]` has rank zero and the
/// largest value is the most significant digit.
pub fn comb_rank(values: &[usize]) -> Result<BigUint> {
    if values.windows(2).any(|w| w[0] >= w[1]) {
        return Err(RankError::NotStrictlyIncreasing);
    }
    Ok(values
        .iter()
        .enumerate()
        .map(|(j, &value)| binomial(value, j + 1))
        .sum())
}

/// Inverse of [`comb_rank`]: the `k`-subset of `0..n` with the given rank.
///
/// Ranks outside `[0, C(n, k))` are rejected rather than decoded into an
/// arbitrary combination.
pub fn comb_unrank(rank: &BigUint, n: usize, k: usize) -> Result<Vec<usize>> {
    check_rank(rank, &binomial(n, k))?;

    let mut rank = rank.clone();
    let mut values = vec![0usize; k];
    let mut bound = n;
    for digit in (1..=k).rev() {
        // Largest v below bound with C(v, digit) <= rank.
        let (mut lo, mut hi) = (digit - 1, bound - 1);
        while lo < hi {
            let mid = lo + (hi - lo).div_ceil(2);
            if binomial(mid, digit) <= rank {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        values[digit - 1] = lo;
        rank -= binomial(lo, digit);
        bound = lo;
    }
    debug_assert!(rank.is_zero());
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn big(value: u64) -> BigUint {
        BigUint::from(value)
    }

    #[test]
    fn binomial_values() {
        assert_eq!(binomial(0, 0), big(1));
        assert_eq!(binomial(5, 2), big(10));
        assert_eq!(binomial(5, 3), big(10));
        assert_eq!(binomial(5, 6), big(0));
        assert_eq!(
            binomial(100, 50).to_string(),
            "100891344545564193334812497256"
        );
    }

    #[test]
    fn factorial_values() {
        assert_eq!(factorial(0), big(1));
        assert_eq!(factorial(1), big(1));
        assert_eq!(factorial(5), big(120));
        assert_eq!(factorial(25).to_string(), "15511210043330985984000000");
    }

    #[test]
    fn stirling2_values() {
        assert_eq!(stirling2(0, 0), big(1));
        assert_eq!(stirling2(3, 0), big(0));
        assert_eq!(stirling2(3, 2), big(3));
        assert_eq!(stirling2(5, 3), big(25));
        assert_eq!(stirling2(6, 3), big(90));
        assert_eq!(stirling2(10, 4), big(34105));
        assert_eq!(stirling2(4, 5), big(0));
    }

    #[test]
    fn binomial_table_matches_formula() {
        let table = BinomialTable::new(40);
        for n in 0..=40 {
            for k in 0..=n + 1 {
                assert_eq!(table.get(n, k), binomial(n, k), "C({n}, {k})");
            }
        }
    }

    #[test]
    fn first_combination_has_rank_zero() {
        assert_eq!(comb_rank(&[0, 1, 2]).unwrap(), big(0));
        assert_eq!(comb_unrank(&big(0), 5, 3).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn shifted_combination_rank() {
        // C(3,3) + C(2,2) + C(1,1)
        assert_eq!(comb_rank(&[1, 2, 3]).unwrap(), big(3));
        assert_eq!(comb_unrank(&big(3), 5, 3).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn last_combination_has_top_rank() {
        assert_eq!(comb_rank(&[2, 3, 4]).unwrap(), big(9));
    }

    #[test]
    fn combination_roundtrip() {
        let n = 8;
        let k = 3;
        let total = binomial(n, k);
        let mut rank = big(0);
        while rank < total {
            let combo = comb_unrank(&rank, n, k).unwrap();
            assert_eq!(combo.len(), k);
            assert!(combo.windows(2).all(|w| w[0] < w[1]));
            assert!(combo.iter().all(|&v| v < n));
            assert_eq!(comb_rank(&combo).unwrap(), rank);
            rank += 1u32;
        }
    }

    #[test]
    fn empty_combination() {
        assert_eq!(comb_rank(&[]).unwrap(), big(0));
        assert_eq!(comb_unrank(&big(0), 4, 0).unwrap(), Vec::<usize>::new());
        assert_eq!(comb_unrank(&big(0), 0, 0).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn full_combination() {
        assert_eq!(comb_unrank(&big(0), 4, 4).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn unranks_from_huge_universe() {
        let n = 1usize << 62;
        let values = vec![5, 7, n - 1];
        let rank = comb_rank(&values).unwrap();
        assert_eq!(comb_unrank(&rank, n, 3).unwrap(), values);
        assert_eq!(comb_unrank(&big(0), n, 2).unwrap(), vec![0, 1]);
    }

    #[test]
    fn rejects_unsorted_values() {
        assert_eq!(comb_rank(&[3, 1]), Err(RankError::NotStrictlyIncreasing));
        assert_eq!(comb_rank(&[2, 2]), Err(RankError::NotStrictlyIncreasing));
    }

    #[test]
    fn rejects_out_of_range_rank() {
        assert!(matches!(
            comb_unrank(&big(10), 5, 3),
            Err(RankError::RankOutOfRange { .. })
        ));
        assert!(matches!(
            comb_unrank(&big(0), 3, 4),
            Err(RankError::RankOutOfRange { .. })
        ));
    }

    proptest! {
        #[test]
        fn roundtrip_random_subsets(set in prop::collection::btree_set(0usize..200, 0..20)) {
            let values: Vec<usize> = set.into_iter().collect();
            let rank = comb_rank(&values).unwrap();
            prop_assert!(rank < binomial(200, values.len()));
            prop_assert_eq!(comb_unrank(&rank, 200, values.len()).unwrap(), values);
        }
    }
}
