use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::RgfCounter;
use crate::error::{RankError, Result};

/// Fully materialized completion table, `(n + 1) x (k + 2)` entries.
///
/// `T[len][m]` counts the ways to fill `len` more positions of an RGF whose
/// current maximum block is `m` so that exactly `k` blocks are used in the
/// end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgfTable {
    blocks: usize,
    rows: Vec<Vec<BigUint>>,
}

impl RgfTable {
    pub fn new(positions: usize, blocks: usize) -> Self {
        let mut rows = Vec::with_capacity(positions + 1);
        rows.push(base_row(blocks));
        for len in 1..=positions {
            let next = next_row(&rows[len - 1], blocks);
            rows.push(next);
        }
        Self { blocks, rows }
    }

    /// Rebuild a table from previously computed entries, e.g. a cache file.
    ///
    /// Only the shape and the base row are checked; the remaining entries are
    /// trusted to follow the recurrence.
    pub fn from_rows(rows: Vec<Vec<BigUint>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(RankError::MalformedTable { reason: "no rows" });
        };
        let cols = first.len();
        if cols < 2 {
            return Err(RankError::MalformedTable {
                reason: "fewer than two columns",
            });
        }
        if rows.iter().any(|row| row.len() != cols) {
            return Err(RankError::MalformedTable {
                reason: "rows have different lengths",
            });
        }
        let blocks = cols - 2;
        if *first != base_row(blocks) {
            return Err(RankError::MalformedTable {
                reason: "base row is not the unit vector at the block count",
            });
        }
        Ok(Self { blocks, rows })
    }

    pub fn rows(&self) -> &[Vec<BigUint>] {
        &self.rows
    }

    pub fn get(&self, rem_len: usize, current_max: usize) -> &BigUint {
        &self.rows[rem_len][current_max]
    }
}

impl RgfCounter for RgfTable {
    fn positions(&self) -> usize {
        self.rows.len() - 1
    }

    fn blocks(&self) -> usize {
        self.blocks
    }

    fn weight(&mut self, rem_len: usize, current_max: usize) -> &BigUint {
        self.get(rem_len, current_max)
    }
}

/// Row 0: only a prefix that already uses every block completes.
pub(super) fn base_row(blocks: usize) -> Vec<BigUint> {
    let mut row = vec![BigUint::zero(); blocks + 2];
    row[blocks] = BigUint::one();
    row
}

/// `T[len][m] = m * T[len - 1][m] + T[len - 1][m + 1]` for `m` in `1..=k`.
pub(super) fn next_row(prev: &[BigUint], blocks: usize) -> Vec<BigUint> {
    let mut row = vec![BigUint::zero(); blocks + 2];
    for m in 1..=blocks {
        row[m] = &prev[m] * m + &prev[m + 1];
    }
    row
}
