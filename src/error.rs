use num_bigint::BigUint;
use thiserror::Error;

/// Errors raised by the ranking codecs.
///
/// Every error is local to a single rank or unrank call. Counting functions
/// never fail: out-of-domain arguments simply count zero objects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RankError {
    /// The rank does not index any object of the class.
    #[error("rank {rank} is out of range for a class of {count} objects")]
    RankOutOfRange { rank: BigUint, count: BigUint },

    /// A combination must list its values in strictly increasing order.
    #[error("combination values are not strictly increasing")]
    NotStrictlyIncreasing,

    /// A value lies outside the universe it was drawn from.
    #[error("value {value} is not below {bound}")]
    ValueOutOfRange { value: usize, bound: usize },

    /// The input is not a bijection on `0..len`.
    #[error("not a permutation of 0..{len}")]
    InvalidPermutation { len: usize },

    /// The input is not a canonical restricted growth function with the
    /// requested number of blocks.
    #[error("invalid restricted growth function: {reason}")]
    InvalidRgf { reason: &'static str },

    /// A sequence symbol does not belong to the alphabet.
    #[error("symbol {symbol} is outside the alphabet of size {alphabet}")]
    SymbolOutOfRange { symbol: usize, alphabet: usize },

    /// A sequence does not have the length the codec was built for.
    #[error("expected a sequence of length {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Table entries handed to [`crate::rgf::RgfTable::from_rows`] do not
    /// describe a completion table.
    #[error("malformed completion table: {reason}")]
    MalformedTable { reason: &'static str },
}

pub type Result<T> = std::result::Result<T, RankError>;

/// Fail with [`RankError::RankOutOfRange`] unless `rank < count`.
pub(crate) fn check_rank(rank: &BigUint, count: &BigUint) -> Result<()> {
    if rank < count {
        Ok(())
    } else {
        Err(RankError::RankOutOfRange {
            rank: rank.clone(),
            count: count.clone(),
        })
    }
}
