use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use super::RgfCounter;
use super::table::{base_row, next_row};

/// Two-row streaming view of the completion table.
///
/// Only the row for the current remaining length is kept. Moving down a row
/// inverts the recurrence, `T[len - 1][m] = (T[len][m] - T[len - 1][m + 1]) / m`,
/// filling `m` from `k` down to 1. Moving up steps the forward recurrence.
/// Ranking only walks down after one forward pass, so a full rank or unrank
/// costs O(n * k) arithmetic in O(k) space.
#[derive(Clone, Debug)]
pub struct RgfRows {
    positions: usize,
    blocks: usize,
    len: usize,
    cur: Vec<BigUint>,
    scratch: Vec<BigUint>,
}

impl RgfRows {
    pub fn new(positions: usize, blocks: usize) -> Self {
        Self {
            positions,
            blocks,
            len: 0,
            cur: base_row(blocks),
            scratch: vec![BigUint::zero(); blocks + 2],
        }
    }

    /// Position the window on row `len`.
    pub fn seek(&mut self, len: usize) {
        if len > self.len {
            for _ in self.len..len {
                self.cur = next_row(&self.cur, self.blocks);
            }
            self.len = len;
        }
        while self.len > len {
            self.step_down();
        }
    }

    pub fn row(&self) -> &[BigUint] {
        &self.cur
    }

    fn step_down(&mut self) {
        debug_assert!(self.len > 0);
        let k = self.blocks;
        self.scratch[k + 1] = BigUint::zero();
        for m in (1..=k).rev() {
            let numerator = &self.cur[m] - &self.scratch[m + 1];
            let (quotient, remainder) = numerator.div_rem(&BigUint::from(m));
            assert!(
                remainder.is_zero(),
                "inverted completion recurrence must divide exactly (row {}, m = {m})",
                self.len
            );
            self.scratch[m] = quotient;
        }
        // Column 0 is only nonzero in the base row of a zero-block table.
        self.scratch[0] = if self.len == 1 && k == 0 {
            BigUint::one()
        } else {
            BigUint::zero()
        };
        std::mem::swap(&mut self.cur, &mut self.scratch);
        self.len -= 1;
    }
}

impl RgfCounter for RgfRows {
    fn positions(&self) -> usize {
        self.positions
    }

    fn blocks(&self) -> usize {
        self.blocks
    }

    fn weight(&mut self, rem_len: usize, current_max: usize) -> &BigUint {
        self.seek(rem_len);
        &self.cur[current_max]
    }
}
