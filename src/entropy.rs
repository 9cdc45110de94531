//! Baselines for judging the sequence codecs: empirical information content
//! and the plain positional (base-`A`) rank.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use crate::error::{RankError, Result, check_rank};
use crate::sections::total_sequences;

/// Occurrences of each symbol of `0..alphabet` in `seq`.
pub fn symbol_counts(seq: &[usize], alphabet: usize) -> Result<Vec<usize>> {
    let mut counts = vec![0; alphabet];
    for &symbol in seq {
        let Some(count) = counts.get_mut(symbol) else {
            return Err(RankError::SymbolOutOfRange { symbol, alphabet });
        };
        *count += 1;
    }
    Ok(counts)
}

/// Bits needed to code a sequence with the given symbol counts under its own
/// empirical distribution: `-sum_s c_s * log2(c_s / n)`.
pub fn information_content(counts: &[usize]) -> f64 {
    let n: usize = counts.iter().sum();
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    -counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| c as f64 * (c as f64 / n).log2())
        .sum::<f64>()
}

/// Rank of `seq` read as a base-`alphabet` numeral, least significant digit
/// first.
pub fn positional_rank(seq: &[usize], alphabet: usize) -> Result<BigUint> {
    let mut rank = BigUint::zero();
    for &symbol in seq.iter().rev() {
        if symbol >= alphabet {
            return Err(RankError::SymbolOutOfRange { symbol, alphabet });
        }
        rank = rank * alphabet + symbol;
    }
    Ok(rank)
}

/// Inverse of [`positional_rank`].
pub fn positional_unrank(rank: &BigUint, len: usize, alphabet: usize) -> Result<Vec<usize>> {
    check_rank(rank, &total_sequences(len, alphabet))?;
    let base = BigUint::from(alphabet);
    let mut rank = rank.clone();
    let mut seq = Vec::with_capacity(len);
    for _ in 0..len {
        let (quotient, digit) = rank.div_rem(&base);
        seq.push(
            digit
                .to_usize()
                .expect("digit is below the alphabet size, which is a usize"),
        );
        rank = quotient;
    }
    Ok(seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_symbols() {
        assert_eq!(symbol_counts(&[2, 0, 2, 2], 4).unwrap(), vec![1, 0, 3, 0]);
        assert_eq!(
            symbol_counts(&[4], 4),
            Err(RankError::SymbolOutOfRange {
                symbol: 4,
                alphabet: 4
            })
        );
    }

    #[test]
    fn information_content_values() {
        assert_eq!(information_content(&[]), 0.0);
        assert_eq!(information_content(&[5, 0]), 0.0);
        assert!((information_content(&[1, 1, 1, 1]) - 8.0).abs() < 1e-12);
        // 2 * 1 + 1 * 2 + 1 * 2 bits.
        assert!((information_content(&[2, 1, 1]) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn positional_rank_is_little_endian() {
        assert_eq!(positional_rank(&[2, 3, 4], 5).unwrap(), BigUint::from(117u32));
        assert_eq!(positional_rank(&[], 5).unwrap(), BigUint::zero());
        assert_eq!(
            positional_unrank(&BigUint::from(117u32), 3, 5).unwrap(),
            vec![2, 3, 4]
        );
        assert!(positional_unrank(&BigUint::from(125u32), 3, 5).is_err());
    }

    #[test]
    fn low_entropy_sequences_have_low_information() {
        let flat = symbol_counts(&[3; 16], 4).unwrap();
        let mixed = symbol_counts(&[0, 1, 2, 3].repeat(4), 4).unwrap();
        assert_eq!(information_content(&flat), 0.0);
        assert!((information_content(&mixed) - 32.0).abs() < 1e-12);
    }
}
