use num_bigint::BigUint;
use num_traits::Zero;

use crate::combinatorics::{binomial, factorial, stirling2};
use crate::error::{Result, check_rank};

/// Number of length-`len` sequences over an `alphabet`-sized alphabet that use
/// exactly `k` distinct symbols: `C(alphabet, k) * k! * S2(len, k)`.
pub fn section_count(len: usize, alphabet: usize, k: usize) -> BigUint {
    if k > len || k > alphabet {
        return BigUint::zero();
    }
    binomial(alphabet, k) * factorial(k) * stirling2(len, k)
}

/// Number of sequences with fewer than `k` distinct symbols.
pub fn sections_before(len: usize, alphabet: usize, k: usize) -> BigUint {
    (0..k).map(|j| section_count(len, alphabet, j)).sum()
}

/// `alphabet ^ len`, the sum of every section.
pub fn total_sequences(len: usize, alphabet: usize) -> BigUint {
    num_traits::pow(BigUint::from(alphabet), len)
}

/// Find the symbol-count section holding `rank`.
///
/// Returns the distinct-symbol count `k` and the rank's offset inside that
/// section.
pub fn locate_section(rank: &BigUint, len: usize, alphabet: usize) -> Result<(usize, BigUint)> {
    check_rank(rank, &total_sequences(len, alphabet))?;

    let mut before = BigUint::zero();
    for k in 0..=len.min(alphabet) {
        let through = &before + section_count(len, alphabet, k);
        if *rank < through {
            return Ok((k, rank - before));
        }
        before = through;
    }
    unreachable!("sections partition [0, alphabet^len)")
}
