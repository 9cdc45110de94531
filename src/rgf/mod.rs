//! Ranking of set partitions with exactly `k` blocks, written as restricted
//! growth functions (RGFs).
//!
//! An RGF of length `n` assigns each element a 1-indexed block id such that
//! `r[0] = 1` and every id is at most one more than the largest id before it.
//! RGFs are ordered lexicographically and ranked by counting the completions
//! skipped at each position. Those counts come from an [`RgfCounter`], which
//! is either the full table ([`RgfTable`]) or a two-row streaming window
//! ([`RgfRows`]); both yield identical ranks.

mod rows;
mod table;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use crate::error::{RankError, Result, check_rank};

pub use rows::RgfRows;
pub use table::RgfTable;

/// Source of completion counts `T[rem_len][current_max]` for RGFs of a fixed
/// length and block count.
pub trait RgfCounter {
    /// Length of the RGFs this counter ranks.
    fn positions(&self) -> usize;

    /// Exact number of blocks of the RGFs this counter ranks.
    fn blocks(&self) -> usize;

    /// Ways to fill `rem_len` more positions when the largest block id so far
    /// is `current_max`.
    fn weight(&mut self, rem_len: usize, current_max: usize) -> &BigUint;

    /// Number of RGFs of this shape, `S2(positions, blocks)`.
    fn total(&mut self) -> BigUint {
        match self.positions() {
            0 if self.blocks() == 0 => BigUint::from(1u32),
            0 => BigUint::zero(),
            n => self.weight(n - 1, 1).clone(),
        }
    }
}

/// Rank `rgf` among the RGFs of its length with exactly `blocks` blocks.
pub fn rgf_rank(rgf: &[usize], blocks: usize) -> Result<BigUint> {
    rgf_rank_with(&mut RgfTable::new(rgf.len(), blocks), rgf)
}

/// The RGF of length `positions` with exactly `blocks` blocks at `rank`.
pub fn rgf_unrank(rank: &BigUint, positions: usize, blocks: usize) -> Result<Vec<usize>> {
    rgf_unrank_with(&mut RgfTable::new(positions, blocks), rank)
}

pub fn rgf_rank_with<C: RgfCounter + ?Sized>(counter: &mut C, rgf: &[usize]) -> Result<BigUint> {
    if rgf.len() != counter.positions() {
        return Err(RankError::LengthMismatch {
            expected: counter.positions(),
            actual: rgf.len(),
        });
    }
    validate_rgf(rgf, counter.blocks())?;

    let n = rgf.len();
    let mut rank = BigUint::zero();
    let mut current_max = 1;
    for (i, &digit) in rgf.iter().enumerate().skip(1) {
        let rem_len = n - 1 - i;
        let weight = counter.weight(rem_len, current_max);
        if digit == current_max + 1 {
            // Every "join an existing block" branch was skipped.
            rank += weight * current_max;
            current_max += 1;
        } else {
            rank += weight * (digit - 1);
        }
    }
    Ok(rank)
}

pub fn rgf_unrank_with<C: RgfCounter + ?Sized>(counter: &mut C, rank: &BigUint) -> Result<Vec<usize>> {
    check_rank(rank, &counter.total())?;

    let n = counter.positions();
    let mut rgf = vec![1; n];
    let mut rank = rank.clone();
    let mut current_max = 1;
    for i in 1..n {
        let rem_len = n - 1 - i;
        let weight_stay = counter.weight(rem_len, current_max);
        let count_stay = weight_stay * current_max;
        if rank < count_stay {
            let (block, rest) = rank.div_rem(weight_stay);
            rgf[i] = block
                .to_usize()
                .expect("block index is below the current maximum")
                + 1;
            rank = rest;
        } else {
            rgf[i] = current_max + 1;
            rank -= count_stay;
            current_max += 1;
        }
    }
    Ok(rgf)
}

/// Check that `rgf` is canonical and uses exactly `blocks` blocks.
pub fn validate_rgf(rgf: &[usize], blocks: usize) -> Result<()> {
    let Some(&first) = rgf.first() else {
        return if blocks == 0 {
            Ok(())
        } else {
            Err(RankError::InvalidRgf {
                reason: "empty rgf has no blocks",
            })
        };
    };
    if first != 1 {
        return Err(RankError::InvalidRgf {
            reason: "first element must be in block 1",
        });
    }
    let mut max = 1;
    for &digit in &rgf[1..] {
        if digit == 0 || digit > max + 1 {
            return Err(RankError::InvalidRgf {
                reason: "block ids must grow by at most one",
            });
        }
        max = max.max(digit);
    }
    if max != blocks {
        return Err(RankError::InvalidRgf {
            reason: "block count does not match",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinatorics::stirling2;
    use insta::assert_debug_snapshot;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn all_rgfs(n: usize, k: usize) -> Vec<Vec<usize>> {
        let total = stirling2(n, k).to_u64().unwrap();
        (0..total)
            .map(|r| rgf_unrank(&BigUint::from(r), n, k).unwrap())
            .collect()
    }

    #[test]
    fn exhaustive_five_three() {
        let rgfs = all_rgfs(5, 3);
        assert_eq!(rgfs.len(), 25);
        let unique: HashSet<&Vec<usize>> = rgfs.iter().collect();
        assert_eq!(unique.len(), 25);
        for (rank, rgf) in rgfs.iter().enumerate() {
            validate_rgf(rgf, 3).unwrap();
            assert_eq!(rgf_rank(rgf, 3).unwrap(), BigUint::from(rank));
        }
        assert!(rgfs.windows(2).all(|w| w[0] < w[1]), "ranks follow lexicographic order");
        assert_eq!(rgfs[0], vec![1, 1, 1, 2, 3]);
        assert_eq!(rgfs[24], vec![1, 2, 3, 3, 3]);
    }

    #[test]
    fn enumerates_four_two() {
        assert_debug_snapshot!(all_rgfs(4, 2), @r"
        [
            [
                1,
                1,
                1,
                2,
            ],
            [
                1,
                1,
                2,
                1,
            ],
            [
                1,
                1,
                2,
                2,
            ],
            [
                1,
                2,
                1,
                1,
            ],
            [
                1,
                2,
                1,
                2,
            ],
            [
                1,
                2,
                2,
                1,
            ],
            [
                1,
                2,
                2,
                2,
            ],
        ]
        ");
    }

    #[test]
    fn table_and_rows_agree() {
        for n in 0..=8 {
            for k in 0..=n {
                let mut table = RgfTable::new(n, k);
                let mut rows = RgfRows::new(n, k);
                assert_eq!(table.total(), rows.total());
                let total = table.total().to_u64().unwrap();
                for r in 0..total {
                    let rank = BigUint::from(r);
                    let from_table = rgf_unrank_with(&mut table, &rank).unwrap();
                    let from_rows = rgf_unrank_with(&mut rows, &rank).unwrap();
                    assert_eq!(from_table, from_rows);
                    assert_eq!(rgf_rank_with(&mut rows, &from_table).unwrap(), rank);
                }
            }
        }
    }

    #[test]
    fn total_matches_stirling() {
        for (n, k) in [(0, 0), (1, 1), (7, 3), (20, 6), (30, 30)] {
            assert_eq!(RgfRows::new(n, k).total(), stirling2(n, k));
            assert_eq!(RgfTable::new(n, k).total(), stirling2(n, k));
        }
        assert_eq!(RgfRows::new(4, 0).total(), BigUint::zero());
    }

    #[test]
    fn empty_rgf() {
        assert_eq!(rgf_rank(&[], 0).unwrap(), BigUint::zero());
        assert_eq!(rgf_unrank(&BigUint::zero(), 0, 0).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn rejects_non_canonical_rgfs() {
        assert!(matches!(rgf_rank(&[2, 1], 2), Err(RankError::InvalidRgf { .. })));
        assert!(matches!(rgf_rank(&[1, 3, 2], 3), Err(RankError::InvalidRgf { .. })));
        assert!(matches!(rgf_rank(&[1, 0], 1), Err(RankError::InvalidRgf { .. })));
        assert!(matches!(rgf_rank(&[1, 2, 1], 3), Err(RankError::InvalidRgf { .. })));
        assert!(matches!(rgf_rank(&[], 1), Err(RankError::InvalidRgf { .. })));
    }

    #[test]
    fn rejects_length_mismatch() {
        let mut rows = RgfRows::new(4, 2);
        assert_eq!(
            rgf_rank_with(&mut rows, &[1, 2]),
            Err(RankError::LengthMismatch {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn rejects_out_of_range_rank() {
        assert!(matches!(
            rgf_unrank(&BigUint::from(25u32), 5, 3),
            Err(RankError::RankOutOfRange { .. })
        ));
        assert!(matches!(
            rgf_unrank(&BigUint::zero(), 3, 0),
            Err(RankError::RankOutOfRange { .. })
        ));
    }

    fn rgf_strategy() -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(0usize..64, 1..60).prop_map(|choices| {
            let mut rgf = vec![1];
            let mut max = 1;
            for choice in choices {
                let digit = choice % (max + 1) + 1;
                max = max.max(digit);
                rgf.push(digit);
            }
            rgf
        })
    }

    proptest! {
        #[test]
        fn streaming_matches_table_on_long_rgfs(rgf in rgf_strategy()) {
            let blocks = *rgf.iter().max().unwrap();
            let n = rgf.len();
            let from_table = rgf_rank_with(&mut RgfTable::new(n, blocks), &rgf).unwrap();
            let from_rows = rgf_rank_with(&mut RgfRows::new(n, blocks), &rgf).unwrap();
            prop_assert_eq!(&from_table, &from_rows);
            prop_assert!(from_table < stirling2(n, blocks));
            prop_assert_eq!(rgf_unrank_with(&mut RgfRows::new(n, blocks), &from_rows).unwrap(), rgf);
        }
    }
}
