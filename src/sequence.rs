//! Near-entropic ranking of fixed-length sequences.
//!
//! A sequence of length `N` over `0..A` is split into four independent
//! parts:
//!
//! - `k`, the number of distinct symbols, which selects a section;
//! - the set partition of positions by symbol, as an RGF with `k` blocks;
//! - the set of symbols used, as a `k`-combination of `0..A`;
//! - which used symbol was assigned to which block, as a permutation of `k`.
//!
//! Sections are laid out by increasing `k`, so every sequence with fewer
//! distinct symbols ranks below every sequence with more.
//! Inside a section the rank is the mixed-radix number
//! `partition * (k! * C(A, k)) + combination * k! + permutation`.

use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_integer::Integer;
use tracing::debug;

use crate::combinatorics::{binomial, comb_rank, comb_unrank, factorial};
use crate::error::{RankError, Result};
use crate::permutation::{invert, perm_rank, perm_unrank};
use crate::rgf::{RgfRows, RgfTable, rgf_rank_with, rgf_unrank_with};
use crate::sections::{locate_section, sections_before, total_sequences};
use crate::shape::ShapeCodec;

/// How set partitions are ordered inside a symbol-count section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PartitionOrder {
    /// Lexicographic order of restricted growth functions.
    #[default]
    Growth,
    /// Ordered by block sizes, largest blocks first (see [`crate::shape`]).
    Shape,
}

/// Which counter backs [`PartitionOrder::Growth`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RgfStrategy {
    /// Full completion table, `O(N * K)` big integers.
    Table,
    /// Two-row window, `O(K)` big integers.
    #[default]
    Rows,
}

/// Symbol structure of a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Profile {
    /// Block id of every position, numbered by first appearance from 1.
    rgf: Vec<usize>,
    /// Distinct symbols, ascending.
    values: Vec<usize>,
    /// `sym_perm[i]` is the zero-based block id of `values[i]`.
    sym_perm: Vec<usize>,
}

impl Profile {
    fn scan(seq: &[usize], alphabet: usize) -> Result<Self> {
        // Keyed by symbol so the used values come out ascending.
        let mut block_of: BTreeMap<usize, usize> = BTreeMap::new();
        let mut rgf = Vec::with_capacity(seq.len());
        for &symbol in seq {
            if symbol >= alphabet {
                return Err(RankError::SymbolOutOfRange { symbol, alphabet });
            }
            let next = block_of.len() + 1;
            rgf.push(*block_of.entry(symbol).or_insert(next));
        }

        let (values, sym_perm): (Vec<usize>, Vec<usize>) = block_of
            .into_iter()
            .map(|(symbol, block)| (symbol, block - 1))
            .unzip();
        Ok(Self {
            rgf,
            values,
            sym_perm,
        })
    }

    fn symbols(&self) -> usize {
        self.values.len()
    }
}

/// Ranks sequences of a fixed length over a fixed alphabet.
///
/// ```
/// use entrank::SequenceCodec;
/// use num_bigint::BigUint;
///
/// let codec = SequenceCodec::new(3, 5);
/// assert_eq!(codec.rank(&[2, 2, 3]).unwrap(), BigUint::from(16u32));
/// assert_eq!(codec.unrank(&BigUint::from(16u32)).unwrap(), vec![2, 2, 3]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequenceCodec {
    len: usize,
    alphabet: usize,
    order: PartitionOrder,
    strategy: RgfStrategy,
}

impl SequenceCodec {
    pub fn new(len: usize, alphabet: usize) -> Self {
        Self {
            len,
            alphabet,
            order: PartitionOrder::default(),
            strategy: RgfStrategy::default(),
        }
    }

    pub fn with_order(self, order: PartitionOrder) -> Self {
        Self { order, ..self }
    }

    pub fn with_strategy(self, strategy: RgfStrategy) -> Self {
        Self { strategy, ..self }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn alphabet(&self) -> usize {
        self.alphabet
    }

    pub fn order(&self) -> PartitionOrder {
        self.order
    }

    /// `alphabet ^ len`.
    pub fn total(&self) -> BigUint {
        total_sequences(self.len, self.alphabet)
    }

    pub fn rank(&self, seq: &[usize]) -> Result<BigUint> {
        if seq.len() != self.len {
            return Err(RankError::LengthMismatch {
                expected: self.len,
                actual: seq.len(),
            });
        }
        let profile = Profile::scan(seq, self.alphabet)?;
        let k = profile.symbols();

        let partition = self.partition_rank(&profile.rgf, k)?;
        let combination = comb_rank(&profile.values)?;
        let permutation = perm_rank(&profile.sym_perm)?;
        let (comb_radix, stir_radix) = self.radices(k);
        let before = sections_before(self.len, self.alphabet, k);
        debug!(
            symbols = k,
            %before,
            %partition,
            %combination,
            %permutation,
            "ranked sequence"
        );

        Ok(before + partition * stir_radix + combination * comb_radix + permutation)
    }

    pub fn unrank(&self, rank: &BigUint) -> Result<Vec<usize>> {
        let (k, residual) = locate_section(rank, self.len, self.alphabet)?;
        let (comb_radix, stir_radix) = self.radices(k);
        let (partition, within) = residual.div_rem(&stir_radix);
        let (combination, permutation) = within.div_rem(&comb_radix);
        debug!(
            symbols = k,
            %partition,
            %combination,
            %permutation,
            "unranking sequence"
        );

        let values = comb_unrank(&combination, self.alphabet, k)?;
        let block_to_value = invert(&perm_unrank(&permutation, k)?);
        let rgf = self.partition_unrank(&partition, k)?;
        Ok(rgf
            .iter()
            .map(|&block| values[block_to_value[block - 1]])
            .collect())
    }

    /// `(k!, k! * C(alphabet, k))`.
    fn radices(&self, k: usize) -> (BigUint, BigUint) {
        let comb_radix = factorial(k);
        let stir_radix = &comb_radix * binomial(self.alphabet, k);
        (comb_radix, stir_radix)
    }

    fn partition_rank(&self, rgf: &[usize], blocks: usize) -> Result<BigUint> {
        match (self.order, self.strategy) {
            (PartitionOrder::Shape, _) => ShapeCodec::new(self.len, blocks).rank(rgf),
            (PartitionOrder::Growth, RgfStrategy::Table) => {
                rgf_rank_with(&mut RgfTable::new(self.len, blocks), rgf)
            }
            (PartitionOrder::Growth, RgfStrategy::Rows) => {
                rgf_rank_with(&mut RgfRows::new(self.len, blocks), rgf)
            }
        }
    }

    fn partition_unrank(&self, rank: &BigUint, blocks: usize) -> Result<Vec<usize>> {
        match (self.order, self.strategy) {
            (PartitionOrder::Shape, _) => ShapeCodec::new(self.len, blocks).unrank(rank),
            (PartitionOrder::Growth, RgfStrategy::Table) => {
                rgf_unrank_with(&mut RgfTable::new(self.len, blocks), rank)
            }
            (PartitionOrder::Growth, RgfStrategy::Rows) => {
                rgf_unrank_with(&mut RgfRows::new(self.len, blocks), rank)
            }
        }
    }
}

/// Rank of `seq` over an alphabet of `alphabet` symbols.
pub fn sequence_rank(seq: &[usize], alphabet: usize) -> Result<BigUint> {
    SequenceCodec::new(seq.len(), alphabet).rank(seq)
}

/// The sequence of length `len` with the given rank.
pub fn sequence_unrank(rank: &BigUint, len: usize, alphabet: usize) -> Result<Vec<usize>> {
    SequenceCodec::new(len, alphabet).unrank(rank)
}
