//! Linear-time permutation ranking (Myrvold & Ruskey, 2001).
//!
//! Ranks live in the factorial number system: unranking peels one mixed-radix
//! digit per slot, from radix `P` down to 1, and applies a transposition for
//! each. Ranking replays those transpositions in reverse, keeping the
//! permutation and its inverse in step so each digit is found in O(1).

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use crate::combinatorics::factorial;
use crate::error::{RankError, Result, check_rank};

/// Rank of `perm`, a bijection on `0..perm.len()`, in `[0, P!)`.
pub fn perm_rank(perm: &[usize]) -> Result<BigUint> {
    let len = perm.len();
    let mut perm = perm.to_vec();
    let mut inverse = vec![usize::MAX; len];
    for (i, &image) in perm.iter().enumerate() {
        if image >= len || inverse[image] != usize::MAX {
            return Err(RankError::InvalidPermutation { len });
        }
        inverse[image] = i;
    }

    // digits[i] is the digit of radix len - i.
    let mut digits = Vec::with_capacity(len.saturating_sub(1));
    for n in (2..=len).rev() {
        let s = perm[n - 1];
        let at = inverse[n - 1];
        perm.swap(n - 1, at);
        inverse.swap(s, n - 1);
        digits.push(s);
    }

    // Innermost digit first: rank = ((d_2 * 3 + d_3) * 4 + d_4) ...
    let mut rank = BigUint::zero();
    for (n, &digit) in (2..=len).zip(digits.iter().rev()) {
        rank = rank * n + digit;
    }
    Ok(rank)
}

/// The permutation of `0..len` with the given rank.
pub fn perm_unrank(rank: &BigUint, len: usize) -> Result<Vec<usize>> {
    check_rank(rank, &factorial(len))?;

    let mut perm: Vec<usize> = (0..len).collect();
    let mut rank = rank.clone();
    for n in (1..=len).rev() {
        let (quotient, digit) = rank.div_rem(&BigUint::from(n));
        let digit = digit
            .to_usize()
            .expect("digit is below the radix, which is a usize");
        perm.swap(n - 1, digit);
        rank = quotient;
    }
    Ok(perm)
}

/// Inverse of a permutation given as an image array.
pub fn invert(perm: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; perm.len()];
    for (i, &image) in perm.iter().enumerate() {
        inverse[image] = i;
    }
    inverse
}
